//! Overlap index over placed label rectangles.

use crate::model::Rect;

/// Rectangles committed in the current pass.
///
/// Linear scan: clouds hold tens to a few hundred labels, and every query
/// happens inside a single tick.
#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    rects: Vec<Rect>,
}

impl CollisionIndex {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `rect` overlaps any stored rectangle. Shared edges do not count.
    pub fn test(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|placed| placed.overlaps(rect))
    }

    /// Store `rect` unconditionally.
    pub fn add(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    /// Forget every rectangle.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Number of stored rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Stored rectangles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Footprint, Point};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Footprint::new(w, h).centered_at(Point::new(x, y))
    }

    #[test]
    fn empty_index_reports_no_collision() {
        let index = CollisionIndex::new();
        assert!(!index.test(&rect(0.0, 0.0, 100.0, 100.0)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_detects_overlap_with_any_rect() {
        let mut index = CollisionIndex::new();
        index.add(rect(0.0, 0.0, 10.0, 2.0));
        index.add(rect(30.0, 0.0, 10.0, 2.0));

        assert!(index.test(&rect(33.0, 1.0, 4.0, 2.0)));
        assert!(!index.test(&rect(15.0, 0.0, 10.0, 2.0)), "touching both neighbours is free");
    }

    #[test]
    fn add_does_not_check_for_overlap() {
        let mut index = CollisionIndex::new();
        index.add(rect(0.0, 0.0, 4.0, 4.0));
        index.add(rect(0.0, 0.0, 4.0, 4.0));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn clear_empties_index() {
        let mut index = CollisionIndex::new();
        index.add(rect(0.0, 0.0, 4.0, 4.0));
        index.clear();

        assert!(index.is_empty());
        assert!(!index.test(&rect(0.0, 0.0, 4.0, 4.0)));
    }
}
