// Adapters layer: concrete implementations of the domain ports over HTTP and subprocesses.

pub mod git;
pub mod http;
pub mod scanner;
