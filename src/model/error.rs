//! Error types for the layout engine.
//!
//! # Error Hierarchy
//!
//! - [`CloudError`] - every failure the engine reports
//!   - [`MeasurementError`] - the footprint provider rejected a word
//!   - `PlacementUnresolved` - the spiral search hit its ceiling
//!   - `InvalidConfiguration` - timing or spiral parameters out of range
//!
//! # Recovery Strategy
//!
//! Measurement and placement failures are per-word and non-fatal: the word
//! is reported through a `PlacementFailed` event and the pass moves on.
//! Invalid configuration is rejected up front, before any pass starts.

use crate::model::Word;
use thiserror::Error;

/// Top-level engine error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CloudError {
    /// The footprint provider could not measure a word.
    #[error("Failed to measure label: {0}")]
    Measurement(#[from] MeasurementError),

    /// The spiral search exceeded its iteration or distance ceiling.
    ///
    /// Typical cause: a footprint larger than the canvas, or a canvas
    /// already packed full.
    #[error("No free slot for {word:?} after {iterations} candidates (distance {distance:.2})")]
    PlacementUnresolved {
        /// Word that could not be placed.
        word: Word,
        /// Candidates tested before giving up.
        iterations: u32,
        /// Spiral distance reached when the search stopped.
        distance: f64,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CloudError {
    /// Shorthand for [`CloudError::InvalidConfiguration`].
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

/// Failure reported by a footprint provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{word:?}: {reason}")]
pub struct MeasurementError {
    /// Text of the word being measured.
    pub word: String,
    /// Why measurement failed.
    pub reason: String,
}

impl MeasurementError {
    /// Build a measurement error for `word`.
    pub fn new(word: &Word, reason: impl Into<String>) -> Self {
        Self {
            word: word.as_str().to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_error_converts_into_cloud_error() {
        let word = Word::new("kivy").expect("valid word");
        let err: CloudError = MeasurementError::new(&word, "negative padding").into();

        assert!(matches!(err, CloudError::Measurement(_)));
        assert_eq!(
            err.to_string(),
            "Failed to measure label: \"kivy\": negative padding"
        );
    }

    #[test]
    fn unresolved_message_names_word_and_iterations() {
        let err = CloudError::PlacementUnresolved {
            word: Word::new("huge").expect("valid word"),
            iterations: 500,
            distance: 49.9,
        };
        let message = err.to_string();
        assert!(message.contains("huge"), "got: {message}");
        assert!(message.contains("500"), "got: {message}");
    }
}
