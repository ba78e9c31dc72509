//! Error types for the simdrive CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid replay script: {0}")]
    InvalidScript(String),

    #[error("Terminal unavailable: {0}")]
    TerminalUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Input error: {0}")]
    InputError(#[from] simdrive_input::InputError),

    #[error("Console error: {0}")]
    ConsoleError(#[from] simdrive_console::ConsoleError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfiguration(_)
            | CliError::InvalidScript(_)
            | CliError::JsonError(_)
            | CliError::YamlError(_)
            | CliError::InputError(_) => 4,
            CliError::TerminalUnavailable(_) | CliError::ConsoleError(_) => 5,
            CliError::IoError(_) => 1,
        }
    }
}
