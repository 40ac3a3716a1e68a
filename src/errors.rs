//! Error types for the wagerkit account and settlement system
//!
//! Core balance operations fail with [`WagerError`]; scenario loading fails with
//! [`ConfigurationError`]. Both fold into [`WagerkitError`] for callers that
//! drive a whole scenario.

/// Errors raised by balance mutations and round settlement.
///
/// Every failure leaves the affected account untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WagerError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("Insufficient bonus balance: requested {requested}, available {available}")]
    InsufficientBonus { requested: f64, available: f64 },

    #[error("Invalid amount {amount}: must be finite and non-negative")]
    InvalidAmount { amount: f64 },

    #[error("Round has already been settled")]
    AlreadySettled,

    #[error("Wager {wager} outside game limits [{min}, {max}]")]
    WagerOutOfBounds { wager: f64, min: f64, max: f64 },
}

/// Scenario configuration and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Missing required field: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown account id: {0}")]
    UnknownAccount(u32),
}

/// Root error type for wagerkit operations
#[derive(Debug, thiserror::Error)]
pub enum WagerkitError {
    #[error("Wager error: {0}")]
    Wager(#[from] WagerError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl From<toml::de::Error> for WagerkitError {
    fn from(e: toml::de::Error) -> Self {
        WagerkitError::Configuration(ConfigurationError::LoadFailed(format!(
            "Failed to parse TOML: {}",
            e
        )))
    }
}

/// Convenience type alias for Results
pub type WagerkitResult<T> = Result<T, WagerkitError>;
