use crate::domain::model::{AccessCheck, Existence, ToolExit};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait UrlProbe: Send + Sync {
    async fn existence(&self, url: &str) -> Existence;
    async fn access(&self, url: &str, token: &str) -> Result<AccessCheck>;
}

#[async_trait]
pub trait RepoFetcher: Send + Sync {
    async fn shallow_clone(&self, url: &str, dest: &Path) -> Result<ToolExit>;
}

#[async_trait]
pub trait TemplateValidator: Send + Sync {
    async fn validate(&self, dir: &Path) -> Result<ToolExit>;
}

pub trait TokenSource: Send + Sync {
    fn token(&self) -> Result<String>;
}

pub trait SecretPrompt: Send + Sync {
    fn prompt_secret(&self, message: &str) -> Result<String>;
}
