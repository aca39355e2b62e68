//! CLI configuration.
//!
//! Loads configuration from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! token = "$GBP_TOKEN"
//! public_key = "${GBP_PUBLIC_KEY}"
//! secret_key = "$GBP_SECRET_KEY"
//! sandbox = true
//! timeout_secs = 30
//! ```
//!
//! # Environment Variables
//!
//! - `GBPRIMEPAY_CONFIG` - Path to configuration file (default: `gbprimepay.toml`)
//! - `GBPRIMEPAY_TOKEN`, `GBPRIMEPAY_PUBLIC_KEY`, `GBPRIMEPAY_SECRET_KEY` - Override credentials
//! - `GBPRIMEPAY_SANDBOX`, `GBPRIMEPAY_RAW` - Override the mode flags (`true` / `false`)

use std::path::Path;

use gbprimepay::{ClientConfig, Credentials};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CliError;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "gbprimepay.toml";

/// Top-level CLI configuration.
///
/// Every field is optional in the file so that credentials can come from the
/// environment alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Customer key.
    pub token: String,

    /// Public key.
    pub public_key: String,

    /// Secret key.
    pub secret_key: String,

    /// Use the sandbox host (default: `false`).
    pub sandbox: bool,

    /// Print create-payment bodies unmodified (default: `false`).
    pub raw: bool,

    /// Per-request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Overrides the environment's base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
}

impl CliConfig {
    /// Loads configuration from `path`, or from `GBPRIMEPAY_CONFIG`, falling
    /// back to `gbprimepay.toml` in the current directory.
    ///
    /// After loading, `$VAR` / `${VAR}` references are expanded and the
    /// `GBPRIMEPAY_*` variables override the file values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an override
    /// is not a boolean.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = path.map_or_else(
            || {
                std::env::var("GBPRIMEPAY_CONFIG")
                    .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned())
                    .into()
            },
            Path::to_path_buf,
        );
        let lookup = |name: &str| std::env::var(name).ok();
        let mut config = Self::load_from(&path, lookup)?;
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Loads configuration from a specific file path, expanding variables
    /// through `lookup`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            String::new()
        };
        Self::parse(&content, lookup)
    }

    /// Parses TOML text after expanding variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expanded text is not a valid configuration.
    pub fn parse(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let expanded = expand_env_vars(content, lookup);
        Ok(toml::from_str(&expanded)?)
    }

    /// Applies the `GBPRIMEPAY_*` overrides resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidFlag`] if a mode override is not a boolean.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), CliError> {
        if let Some(token) = lookup("GBPRIMEPAY_TOKEN") {
            self.token = token;
        }
        if let Some(key) = lookup("GBPRIMEPAY_PUBLIC_KEY") {
            self.public_key = key;
        }
        if let Some(key) = lookup("GBPRIMEPAY_SECRET_KEY") {
            self.secret_key = key;
        }
        if let Some(value) = lookup("GBPRIMEPAY_SANDBOX") {
            self.sandbox = parse_flag("GBPRIMEPAY_SANDBOX", &value)?;
        }
        if let Some(value) = lookup("GBPRIMEPAY_RAW") {
            self.raw = parse_flag("GBPRIMEPAY_RAW", &value)?;
        }
        Ok(())
    }

    /// Converts into the library's client configuration.
    #[must_use]
    pub fn into_client_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(Credentials::new(
            self.token,
            self.public_key,
            self.secret_key,
        ));
        config.sandbox = self.sandbox;
        config.raw = self.raw;
        config.timeout_secs = self.timeout_secs;
        config.base_url = self.base_url;
        config
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CliError::InvalidFlag {
            name,
            value: value.to_owned(),
        }),
    }
}

/// Expands `$VAR` and `${VAR}` patterns in a string through `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        while let Some(&c) = chars.peek() {
            if braced {
                if c == '}' {
                    chars.next();
                    break;
                }
            } else if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        match (var_name.is_empty(), lookup(&var_name)) {
            (false, Some(val)) => result.push_str(&val),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if braced && !var_name.is_empty() {
                    result.push('}');
                }
            }
        }
    }

    result
}
