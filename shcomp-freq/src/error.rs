//! Frequency-side error types.

use shcomp_core::ShcompError;
use thiserror::Error;

/// Frequency table and analysis errors.
#[derive(Debug, Error)]
pub enum FreqError {
    /// Error from the bit channel or chunk codec, including every I/O
    /// failure of an analysis pass.
    #[error(transparent)]
    Core(#[from] ShcompError),

    /// The table could not grow to the requested capacity.
    #[error("Resource exhausted: cannot grow frequency table to {requested} entries")]
    ResourceExhausted {
        /// Capacity that could not be allocated.
        requested: usize,
    },
}

/// Result type for frequency operations.
pub type Result<T> = std::result::Result<T, FreqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: FreqError = ShcompError::invalid_width(0, 16).into();
        assert!(err.to_string().starts_with("Invalid chunk width"));
    }

    #[test]
    fn test_io_error_goes_through_core() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err: FreqError = ShcompError::from(io).into();
        assert!(matches!(err, FreqError::Core(ShcompError::Io(_))));
    }

    #[test]
    fn test_resource_exhausted_display() {
        let err = FreqError::ResourceExhausted { requested: 1 << 40 };
        assert!(err.to_string().contains("Resource exhausted"));
    }
}
