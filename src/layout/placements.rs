//! Placements committed in the current pass.

use crate::model::{Placement, Word};
use std::collections::HashMap;

/// Ordered placement list with at most one placement per word.
#[derive(Debug, Default)]
pub struct PlacementSet {
    placements: Vec<Placement>,
    by_word: HashMap<Word, usize>,
}

impl PlacementSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `placement`. Returns it back if its word is already placed.
    pub fn insert(&mut self, placement: Placement) -> Result<&Placement, Placement> {
        if self.by_word.contains_key(&placement.word) {
            return Err(placement);
        }
        self.by_word
            .insert(placement.word.clone(), self.placements.len());
        self.placements.push(placement);
        Ok(&self.placements[self.placements.len() - 1])
    }

    /// Placement of `word`, if committed.
    pub fn get(&self, word: &Word) -> Option<&Placement> {
        self.by_word.get(word).map(|&i| &self.placements[i])
    }

    /// Placements in commit order.
    pub fn as_slice(&self) -> &[Placement] {
        &self.placements
    }

    /// Iterate in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    /// Number of placed words.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// True when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Drop every placement.
    pub fn clear(&mut self) {
        self.placements.clear();
        self.by_word.clear();
    }
}
