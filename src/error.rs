//! # Error Types
//!
//! This module defines error types used throughout the marblefusion library.

use thiserror::Error;

/// Convenience alias for results carrying a [`FusionError`].
pub type Result<T> = std::result::Result<T, FusionError>;

/// Main error type for marblefusion operations
#[derive(Debug, Error)]
pub enum FusionError {
    /// Palette cannot produce a gradient (too few stops, bad weights, bad hex)
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    /// Parameter that cannot be clamped into a usable value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The external recipe generator produced nothing usable
    #[error("Recipe generation failed: {0}")]
    RecipeGeneration(String),

    /// A newer render superseded this one before it finished
    #[error("Render cancelled: generation {generation} was superseded")]
    Cancelled { generation: u64 },

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FusionError {
    pub fn invalid_palette(msg: impl Into<String>) -> Self {
        Self::InvalidPalette(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn recipe_generation(msg: impl Into<String>) -> Self {
        Self::RecipeGeneration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert!(
            FusionError::invalid_palette("x")
                .to_string()
                .starts_with("Invalid palette:")
        );
        assert!(
            FusionError::recipe_generation("x")
                .to_string()
                .starts_with("Recipe generation failed:")
        );
        assert_eq!(
            FusionError::Cancelled { generation: 3 }.to_string(),
            "Render cancelled: generation 3 was superseded"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FusionError = io.into();
        assert!(matches!(err, FusionError::Io(_)));
    }
}
