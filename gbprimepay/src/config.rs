//! Credentials, environments and client configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use url::Url;

/// Production API host.
pub const PRODUCTION_BASE_URL: &str = "https://api.gbprimepay.com";

/// Sandbox API host.
pub const SANDBOX_BASE_URL: &str = "https://api.globalprimepay.com";

static PRODUCTION_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(PRODUCTION_BASE_URL).expect("production base URL is valid")
});

static SANDBOX_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(SANDBOX_BASE_URL).expect("sandbox base URL is valid"));

/// The GB Prime Pay deployment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live payments.
    #[default]
    Production,
    /// Test payments against the sandbox host.
    Sandbox,
}

impl Environment {
    /// Picks the sandbox when `sandbox` is set, production otherwise.
    #[must_use]
    pub const fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Returns the base URL of this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }

    /// Returns the parsed base URL of this environment.
    #[must_use]
    pub fn url(&self) -> &'static Url {
        match self {
            Self::Production => &PRODUCTION_URL,
            Self::Sandbox => &SANDBOX_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Sandbox => f.write_str("sandbox"),
        }
    }
}

/// Error returned when parsing an unknown environment name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown environment {0:?}, expected \"production\" or \"sandbox\"")]
pub struct EnvironmentError(String);

impl FromStr for Environment {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" | "test" => Ok(Self::Sandbox),
            _ => Err(EnvironmentError(s.to_owned())),
        }
    }
}

/// The three merchant credentials issued by GB Prime Pay.
///
/// No format validation happens here; bad credentials surface as provider
/// errors when a call is made. `Debug` output redacts the token and the
/// secret key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Customer key, sent as a form field on QR and token-validation calls.
    pub token: String,
    /// Public key, used for Basic auth and attached to signed channels.
    pub public_key: String,
    /// Secret key, used for Basic auth and as the checksum key.
    pub secret_key: String,
}

impl Credentials {
    /// Creates a credential set.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Everything needed to build a client.
///
/// # Example
///
/// ```rust
/// use gbprimepay::config::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_value(serde_json::json!({
///     "token": "tok",
///     "public_key": "pub",
///     "secret_key": "sec",
///     "sandbox": true,
/// }))
/// .unwrap();
///
/// assert_eq!(config.base_url().as_str(), "https://api.globalprimepay.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Merchant credentials.
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Use the sandbox host instead of production.
    #[serde(default)]
    pub sandbox: bool,

    /// Return provider responses unmodified from create-payment.
    #[serde(default)]
    pub raw: bool,

    /// Per-request timeout in seconds. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Overrides the environment's base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
}

impl ClientConfig {
    /// Creates a production, decoded-mode configuration.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sandbox: false,
            raw: false,
            timeout_secs: None,
            base_url: None,
        }
    }

    /// Returns the selected environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        Environment::from_sandbox(self.sandbox)
    }

    /// Returns the effective base URL: the override if set, else the environment's.
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment().url().clone())
    }
}
