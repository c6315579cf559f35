//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_price_display() {
        let error = DomainError::InvalidPrice(f64::INFINITY);
        assert_eq!(error.to_string(), "Invalid price: inf");
    }

    #[test]
    fn test_format_error_from_fmt() {
        let error: DomainError = std::fmt::Error.into();
        assert!(matches!(error, DomainError::Format(_)));
    }
}
