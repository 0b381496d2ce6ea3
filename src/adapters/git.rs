use crate::domain::model::ToolExit;
use crate::domain::ports::RepoFetcher;
use crate::utils::error::{HarvestError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Shallow clones through the `git` command line client.
pub struct GitFetcher {
    program: String,
    depth: u32,
}

impl GitFetcher {
    pub fn new(program: impl Into<String>, depth: u32) -> Self {
        Self {
            program: program.into(),
            depth,
        }
    }

    fn build_command(&self, url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("clone")
            .arg("--depth")
            .arg(self.depth.to_string())
            .arg(url)
            .arg(dest)
            // fail instead of waiting on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new("git", 1)
    }
}

#[async_trait]
impl RepoFetcher for GitFetcher {
    async fn shallow_clone(&self, url: &str, dest: &Path) -> Result<ToolExit> {
        tracing::debug!("Executing {} clone --depth {} {} {}", self.program, self.depth, url, dest.display());

        let status = self
            .build_command(url, dest)
            .status()
            .await
            .map_err(|e| HarvestError::ToolError {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        Ok(ToolExit::from_status(status))
    }
}
