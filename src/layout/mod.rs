//! Placement engine internals (pure core).
//!
//! Leaves first: [`CollisionIndex`] and [`SpiralSearch`] are plain
//! algorithms, [`Clock`] is the cooperative timer queue, and
//! [`PlacementScheduler`] / [`AttentionAnimator`] hold the pass and
//! highlight state that the [`crate::cloud::WordCloud`] engine drives.

pub mod attention;
pub mod cache;
pub mod clock;
pub mod collision;
pub mod config;
pub mod placements;
pub mod scheduler;
pub mod spiral;
pub mod surface;

// Re-export for convenience
pub use attention::AttentionAnimator;
pub use cache::{CachedLabel, LabelCache};
pub use clock::{Clock, PassId, TimerHandle, TimerKind};
pub use collision::CollisionIndex;
pub use config::{duration_from_secs, AttentionParams, LayoutConfig};
pub use placements::PlacementSet;
pub use scheduler::{PassState, PlacementScheduler, TickOutcome, TickReport};
pub use spiral::{SpiralExhausted, SpiralHit, SpiralParams, SpiralSearch};
pub use surface::{FootprintProvider, LabelSurface};
