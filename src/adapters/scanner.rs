use crate::domain::model::ToolExit;
use crate::domain::ports::TemplateValidator;
use crate::utils::error::{HarvestError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Runs `<scanner> -validate -t <dir>`; only the exit status matters.
pub struct NucleiValidator {
    program: String,
}

impl NucleiValidator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for NucleiValidator {
    fn default() -> Self {
        Self::new("nuclei")
    }
}

#[async_trait]
impl TemplateValidator for NucleiValidator {
    async fn validate(&self, dir: &Path) -> Result<ToolExit> {
        tracing::debug!("Executing {} -validate -t {}", self.program, dir.display());

        let status = Command::new(&self.program)
            .arg("-validate")
            .arg("-t")
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| HarvestError::ToolError {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        Ok(ToolExit::from_status(status))
    }
}
