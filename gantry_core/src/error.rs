//! Error types for the GANTRY runtime.

use thiserror::Error;

/// Unified error type for all GANTRY operations.
#[derive(Error, Debug)]
pub enum GantryError {
    /// Topic creation or message transport failed
    #[error("communication error: {0}")]
    Communication(String),

    /// Configuration file or value is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller supplied an out-of-range or malformed value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Actuator or sensor backend failure
    #[error("hardware error: {0}")]
    Hardware(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

impl GantryError {
    pub fn communication(msg: impl Into<String>) -> Self {
        GantryError::Communication(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        GantryError::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GantryError::InvalidInput(msg.into())
    }

    pub fn hardware(msg: impl Into<String>) -> Self {
        GantryError::Hardware(msg.into())
    }
}

/// Result alias used throughout the GANTRY crates.
pub type GantryResult<T> = Result<T, GantryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_produce_matching_variants() {
        assert!(matches!(
            GantryError::config("bad rate"),
            GantryError::Config(_)
        ));
        assert!(matches!(
            GantryError::communication("topic full"),
            GantryError::Communication(_)
        ));
    }

    #[test]
    fn io_errors_convert() {
        fn fails() -> GantryResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(GantryError::Io(_))));
    }
}
