//! Errors raised while loading Bayline settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings source could not be read or a value had the wrong type.
    #[error("failed to load bayline settings: {0}")]
    Load(#[from] figment::Error),

    /// A section a command needs is missing required values.
    #[error("{section} settings are not configured; set {}", .missing.join(" and "))]
    NotConfigured {
        section: &'static str,
        /// Environment variables that would supply the missing values.
        missing: Vec<&'static str>,
    },

    /// A buffer capacity or timeout below its usable minimum.
    #[error("{field} must be at least {minimum}, got {value}")]
    InvalidValue {
        field: &'static str,
        value: u64,
        minimum: u64,
    },
}

impl ConfigError {
    /// Reject `value` when it is below `minimum`.
    pub(crate) fn check_minimum(field: &'static str, value: u64, minimum: u64) -> Result<(), Self> {
        if value < minimum {
            Err(Self::InvalidValue {
                field,
                value,
                minimum,
            })
        } else {
            Ok(())
        }
    }
}
