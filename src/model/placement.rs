//! Committed label positions.

use crate::model::{Footprint, Point, Rect, Transform, Word};
use std::time::Duration;

/// A word that the spiral search found a free slot for.
///
/// Exists only for the pass that created it; the scheduler drops every
/// placement when a pass is superseded or reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Placed word.
    pub word: Word,
    /// Position of the word in the submitted sequence.
    pub index: usize,
    /// Center of the label.
    pub center: Point,
    /// Extent of the label.
    pub footprint: Footprint,
    /// Clock time of the tick that committed the placement.
    pub placed_at: Duration,
    /// Spiral candidates tested before this slot was found (1 = first try).
    pub iterations: u32,
    /// Presentation transform at rest.
    pub transform: Transform,
}

impl Placement {
    /// Rectangle occupied by the label.
    pub fn rect(&self) -> Rect {
        self.footprint.centered_at(self.center)
    }
}
