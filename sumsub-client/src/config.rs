//! Client configuration.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.sumsub.com";

/// Environment variable holding the application token.
pub const ENV_APP_TOKEN: &str = "SUMSUB_APP_TOKEN";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "SUMSUB_SECRET_KEY";
/// Environment variable overriding the API host.
pub const ENV_BASE_URL: &str = "SUMSUB_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SUMSUB_TIMEOUT_SECS";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting could not be parsed.
    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// API credentials.
///
/// The secret key never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    app_token: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Create credentials from an application token and secret key.
    pub fn new(app_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            app_token: app_token.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// The application token sent in `X-App-Token`.
    pub fn app_token(&self) -> &str {
        &self.app_token
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret_key.expose_secret().as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_token", &self.app_token)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Sumsub client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// API host, without a trailing path.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration with default settings for the given credentials.
    pub fn new(app_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(app_token, secret_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("sumsub-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// when present; variables already set in the environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder()
            .app_token(non_empty(ENV_APP_TOKEN).ok_or(ConfigError::Missing(ENV_APP_TOKEN))?)
            .secret_key(non_empty(ENV_SECRET_KEY).ok_or(ConfigError::Missing(ENV_SECRET_KEY))?);

        if let Some(url) = non_empty(ENV_BASE_URL) {
            builder = builder.base_url(url);
        }

        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                reason: format!("{}", e),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Absolute URL for an API path.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    app_token: Option<String>,
    secret_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the application token.
    pub fn app_token(mut self, token: impl Into<String>) -> Self {
        self.app_token = Some(token.into());
        self
    }

    /// Set the secret key used for request signatures.
    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Set the API host.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let app_token = self.app_token.ok_or(ConfigError::Missing("app_token"))?;
        let secret_key = self.secret_key.ok_or(ConfigError::Missing("secret_key"))?;

        let mut config = ClientConfig::new(app_token, secret_key);

        if let Some(base_url) = self.base_url {
            url::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
                key: "base_url",
                reason: e.to_string(),
            })?;
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout = timeout;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}
