use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Secret prompt failed: {message}")]
    PromptError { message: String },

    #[error("Failed to run '{program}': {message}")]
    ToolError { program: String, message: String },
}

impl HarvestError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            HarvestError::IoError(e) => format!("File system operation failed: {}", e),
            HarvestError::HttpError(e) => format!("Could not reach the remote host: {}", e),
            HarvestError::ConfigError { message } => {
                format!("The settings file could not be loaded: {}", message)
            }
            HarvestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            HarvestError::PromptError { message } => {
                format!("Could not read the access token: {}", message)
            }
            HarvestError::ToolError { program, message } => {
                format!("External tool '{}' could not be started: {}", program, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarvestError::IoError(_) => {
                "Check that the working directory exists and is writable"
            }
            HarvestError::HttpError(_) => "Check your network connection and try again",
            HarvestError::ConfigError { .. } | HarvestError::InvalidConfigValueError { .. } => {
                "Fix harvest.toml (or the file named by HARVEST_CONFIG) and run again"
            }
            HarvestError::PromptError { .. } => {
                "Store the token in the credential file so no prompt is needed"
            }
            HarvestError::ToolError { .. } => {
                "Make sure git and the template scanner are installed and on PATH"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
