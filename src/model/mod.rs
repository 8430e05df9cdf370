//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors where
//! validation is needed.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod word;

// Re-export for convenience
pub use animation::{AnimatedProperty, Animation, Easing, HighlightEffect, Segment};
pub use error::{CloudError, MeasurementError};
pub use geometry::{Canvas, Footprint, Point, Rect, Transform};
pub use placement::Placement;
pub use word::{InvalidWord, LabelOptions, OptionValue, Word, WordEntry};
