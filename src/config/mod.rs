#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod toml_config;

use crate::utils::console::Console;
use std::path::{Path, PathBuf};
use toml_config::HarvestConfig;

pub const ATTEMPTED_FILE: &str = "attempted.txt";
pub const FAILED_CLONES_FILE: &str = "failed_clones.txt";
pub const VALIDATED_DIR: &str = "validated";
pub const VALIDATED_LOG: &str = "validated.txt";
pub const NOT_VALIDATED_DIR: &str = "not-validated";
pub const NOT_VALIDATED_LOG: &str = "not-validated.txt";

/// Everything the engine needs to know about one run, resolved up front.
#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub input_file: PathBuf,
    pub workspace_root: PathBuf,
    pub backup_input: bool,
    pub console: Console,
}

impl HarvestSettings {
    pub fn new(input_file: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            workspace_root: workspace_root.into(),
            backup_input: true,
            console: Console::default(),
        }
    }

    pub fn from_config(input_file: impl Into<PathBuf>, config: &HarvestConfig) -> Self {
        Self {
            input_file: input_file.into(),
            workspace_root: PathBuf::from(&config.workspace.root),
            backup_input: config.workspace.backup_input,
            console: Console::new(config.output.color),
        }
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn with_backup(mut self, backup_input: bool) -> Self {
        self.backup_input = backup_input;
        self
    }

    pub fn attempted_file(&self) -> PathBuf {
        self.workspace_root.join(ATTEMPTED_FILE)
    }

    pub fn failed_clones_file(&self) -> PathBuf {
        self.workspace_root.join(FAILED_CLONES_FILE)
    }

    pub fn validated_dir(&self) -> PathBuf {
        self.workspace_root.join(VALIDATED_DIR)
    }

    pub fn not_validated_dir(&self) -> PathBuf {
        self.workspace_root.join(NOT_VALIDATED_DIR)
    }

    pub fn backup_file(&self) -> PathBuf {
        let mut name = self.input_file.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn clone_target(&self, dir_name: &str) -> PathBuf {
        self.workspace_root.join(dir_name)
    }

    pub fn root(&self) -> &Path {
        &self.workspace_root
    }
}
