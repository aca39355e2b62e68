//! Error types for the command-line client.

use std::path::PathBuf;

use gbprimepay_http::ClientError;

/// Errors that can end a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`CliConfig`](crate::config::CliConfig).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A boolean override variable holds something other than a boolean.
    #[error("{name} must be a boolean, got {value:?}")]
    InvalidFlag {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A command-line argument could not be turned into a request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Output could not be serialized.
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
