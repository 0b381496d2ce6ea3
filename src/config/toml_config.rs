use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "HARVEST_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "harvest.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub workspace: WorkspaceConfig,
    pub tools: ToolsConfig,
    pub credential: CredentialConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: String,
    pub backup_input: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: "nuclei-templates".to_string(),
            backup_input: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub git: String,
    pub scanner: String,
    pub clone_depth: u32,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            scanner: "nuclei".to_string(),
            clone_depth: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    pub env_file: String,
    pub key: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            env_file: ".env".to_string(),
            key: "GITHUB_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl HarvestConfig {
    /// Load from `$HARVEST_CONFIG`, else `./harvest.toml`, else defaults.
    pub fn discover() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                tracing::debug!("Loading settings from {}={}", CONFIG_ENV_VAR, path);
                return Self::from_file(path);
            }
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            tracing::debug!("Loading settings from {}", local.display());
            return Self::from_file(local);
        }

        tracing::debug!("No settings file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| HarvestError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarvestError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for HarvestConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("workspace.root", &self.workspace.root)?;
        validation::validate_non_empty_string("tools.git", &self.tools.git)?;
        validation::validate_non_empty_string("tools.scanner", &self.tools.scanner)?;
        validation::validate_positive_number("tools.clone_depth", self.tools.clone_depth, 1)?;
        validation::validate_path("credential.env_file", &self.credential.env_file)?;
        validation::validate_env_key("credential.key", &self.credential.key)?;
        Ok(())
    }
}
