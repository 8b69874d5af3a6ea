use std::time::Duration;

use paymaya_types::Environment;

use crate::error::{PaymentsError, Result};

/// Environment variable holding the public (tokenization) key
pub const PUBLIC_KEY_VAR: &str = "PAYMAYA_PUBLIC_KEY";

/// Environment variable holding the secret key
pub const SECRET_KEY_VAR: &str = "PAYMAYA_SECRET_KEY";

/// Environment variable holding the environment flag (`PRODUCTION` or anything else)
pub const ENVIRONMENT_VAR: &str = "PAYMAYA_ENVIRONMENT";

/// Configuration for [`PaymentsApi`](crate::PaymentsApi)
///
/// Read-only once handed to the API manager. Defaults to the sandbox so that
/// a forgotten environment flag never moves real money.
#[derive(Clone)]
pub struct PaymentsConfig {
    /// Key used for payment token creation only
    pub public_key: String,

    /// Key used for every other endpoint
    pub secret_key: String,

    /// Remote environment, selects the base URL
    pub environment: Environment,

    /// Overrides the environment's base URL (local fakes, proxies)
    pub base_url: Option<String>,

    /// Request timeout applied by the HTTP client
    pub timeout: Option<Duration>,
}

impl PaymentsConfig {
    /// Create a sandbox configuration with the given keys
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            environment: Environment::Sandbox,
            base_url: None,
            timeout: None,
        }
    }

    /// Load keys and environment from `PAYMAYA_*` variables.
    ///
    /// A `.env` file in the working directory is read first when present; a
    /// malformed one is a [`PaymentsError::Config`].
    pub fn from_env() -> Result<Self> {
        env_file_outcome(dotenvy::dotenv())?;

        let public_key = std::env::var(PUBLIC_KEY_VAR)
            .map_err(|_| PaymentsError::Config(format!("{PUBLIC_KEY_VAR} is not set")))?;
        let secret_key = std::env::var(SECRET_KEY_VAR)
            .map_err(|_| PaymentsError::Config(format!("{SECRET_KEY_VAR} is not set")))?;
        let flag = std::env::var(ENVIRONMENT_VAR).ok();

        Ok(Self::new(public_key, secret_key)
            .with_environment(Environment::from_optional_flag(flag.as_deref())))
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the environment from a raw flag; only `"PRODUCTION"` selects production
    pub fn with_environment_flag(mut self, flag: &str) -> Self {
        self.environment = Environment::from_flag(flag);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL every endpoint path is appended to, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("public_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .finish()
    }
}

// A missing .env file is fine; anything else is reported.
fn env_file_outcome<T>(outcome: std::result::Result<T, dotenvy::Error>) -> Result<()> {
    match outcome {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(PaymentsError::Config(format!("failed to load .env file: {e}"))),
    }
}
