//! Access-token resolution backed by a dotenv-style file.
//!
//! Lookup order is process environment, then the env file, then an
//! interactive prompt whose answer (even an empty one) is written back.

use crate::domain::ports::{SecretPrompt, TokenSource};
use crate::utils::error::{HarvestError, Result};
use std::fs;
use std::path::PathBuf;

pub struct CredentialProvider<S: SecretPrompt> {
    env_file: PathBuf,
    key: String,
    prompt: S,
}

impl<S: SecretPrompt> CredentialProvider<S> {
    pub fn new(env_file: impl Into<PathBuf>, key: impl Into<String>, prompt: S) -> Self {
        Self {
            env_file: env_file.into(),
            key: key.into(),
            prompt,
        }
    }

    /// Value stored in the env file, if any and non-empty.
    pub fn stored(&self) -> Result<Option<String>> {
        if !self.env_file.is_file() {
            return Ok(None);
        }

        let entries = dotenvy::from_path_iter(&self.env_file).map_err(|e| {
            HarvestError::ConfigError {
                message: format!("cannot read {}: {}", self.env_file.display(), e),
            }
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| HarvestError::ConfigError {
                message: format!("malformed entry in {}: {}", self.env_file.display(), e),
            })?;
            if key == self.key && !value.is_empty() {
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    /// Write `KEY='value'`, replacing an existing assignment of the key.
    pub fn persist(&self, value: &str) -> Result<()> {
        let existing = match fs::read_to_string(&self.env_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let assignment = format!("{}='{}'", self.key, value);
        let mut replaced = false;
        let mut lines: Vec<String> = existing
            .lines()
            .map(|line| {
                if !replaced && assigns_key(line, &self.key) {
                    replaced = true;
                    assignment.clone()
                } else {
                    line.to_string()
                }
            })
            .collect();

        if !replaced {
            lines.push(assignment);
        }

        if let Some(parent) = self.env_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&self.env_file, content)?;

        tracing::debug!("Stored {} in {}", self.key, self.env_file.display());
        Ok(())
    }
}

impl<S: SecretPrompt> TokenSource for CredentialProvider<S> {
    fn token(&self) -> Result<String> {
        if let Ok(value) = std::env::var(&self.key) {
            if !value.is_empty() {
                tracing::debug!("Using {} from the environment", self.key);
                return Ok(value);
            }
        }

        if let Some(value) = self.stored()? {
            tracing::debug!("Using {} from {}", self.key, self.env_file.display());
            return Ok(value);
        }

        let message = "Enter your Github API Key (or press 'Enter' for unauthenticated search)";
        match self.prompt.prompt_secret(message) {
            Ok(value) => {
                self.persist(&value)?;
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("{}; continuing unauthenticated", e);
                Ok(String::new())
            }
        }
    }
}

fn assigns_key(line: &str, key: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line);
    match line.split_once('=') {
        Some((name, _)) => name.trim() == key,
        None => false,
    }
}

/// Terminal prompt that hides typed input.
#[cfg(feature = "cli")]
pub struct DialoguerPrompt;

#[cfg(feature = "cli")]
impl SecretPrompt for DialoguerPrompt {
    fn prompt_secret(&self, message: &str) -> Result<String> {
        dialoguer::Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| HarvestError::PromptError {
                message: e.to_string(),
            })
    }
}
