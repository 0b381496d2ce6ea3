//! Colored progress lines shown to the operator.
//!
//! Diagnostics go through `tracing`; this is only the human-facing report.

use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success_prefix(&self) -> String {
        self.paint("[+]", Color::Green)
    }

    pub fn failure_prefix(&self) -> String {
        self.paint("[-]", Color::Red)
    }

    pub fn url(&self, url: &str) -> String {
        self.paint(url, Color::Yellow)
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", self.success_prefix(), message);
    }

    pub fn failure(&self, message: &str) {
        println!("{} {}", self.failure_prefix(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.paint(message, Color::Cyan));
    }

    pub fn headline(&self, message: &str) {
        println!("{}", self.paint(message, Color::Blue));
    }

    pub fn notice(&self, message: &str) {
        println!("{}", self.paint(message, Color::Green));
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(true)
    }
}
