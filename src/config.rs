//! Form configuration.

use std::time::Duration;
use thiserror::Error;

pub const SUCCESS_CLEAR_ENV: &str = "FORM_SUCCESS_CLEAR_MS";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const DEFAULT_SUCCESS_CLEAR_DELAY: Duration = Duration::from_millis(3000);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FORM_SUCCESS_CLEAR_MS must be a whole number of milliseconds, got {0:?}")]
    InvalidDelay(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Text placed in `#form-success` after a valid submit.
    pub success_message: String,
    /// How long the success message stays up.
    pub success_clear_delay: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            success_clear_delay: DEFAULT_SUCCESS_CLEAR_DELAY,
        }
    }
}

impl FormConfig {
    /// Defaults, with the clear delay overridable through
    /// `FORM_SUCCESS_CLEAR_MS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelay`] if the variable is set but is not
    /// a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SUCCESS_CLEAR_ENV) {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDelay(raw.clone()))?;
            config.success_clear_delay = Duration::from_millis(millis);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            "form config loaded: success clear delay {:?}",
            config.success_clear_delay
        );

        Ok(config)
    }
}
