pub mod harvester;
pub mod progress;
pub mod sorter;
pub mod url_list;

pub use crate::domain::model::{FetchOutcome, RunSummary, UrlDisposition};
pub use crate::domain::ports::{RepoFetcher, SecretPrompt, TemplateValidator, TokenSource, UrlProbe};
pub use crate::utils::error::Result;
