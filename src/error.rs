//! Error types for contact-sim.
//!
//! The simulation itself never fails: out-of-range inputs are clamped. Errors
//! only surface at the configuration boundary, when a [`SimConfig`] is read,
//! written, or validated.
//!
//! [`SimConfig`]: crate::config::SimConfig

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, saving, or validating a configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read or write a configuration file.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A tuning value is out of its meaningful range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let e = Error::InvalidConfig("window must be > 0".to_string());
        let msg = e.to_string();
        assert!(msg.contains("invalid config"));
        assert!(msg.contains("window"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: Error = parse.into();
        assert!(matches!(e, Error::Json(_)));
        assert!(e.to_string().starts_with("failed to parse config"));
    }
}
