//! Test doubles for the layout core.
//!
//! [`RecordingSurface`] measures words from a fixed size table and records
//! every call the engine makes, so tests can assert on the exact sequence of
//! collaborator interactions.

use crate::layout::{FootprintProvider, LabelSurface};
use crate::model::{Animation, Footprint, LabelOptions, MeasurementError, Placement, Word};
use std::collections::HashMap;

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// `measure_footprint(word)`
    Measure(String),
    /// `insert_visual(placement)`
    Insert(String),
    /// `remove_all_visuals()`
    RemoveAll,
    /// `play_entrance_animation(word)`
    Entrance(String),
    /// `play_highlight_animation(word)`
    Highlight(String),
}

/// Fake surface with configurable footprints.
#[derive(Debug)]
pub struct RecordingSurface {
    /// Size returned for words missing from `sizes`.
    pub default_size: Footprint,
    /// Per-word sizes.
    pub sizes: HashMap<String, Footprint>,
    /// Words whose measurement fails.
    pub unmeasurable: Vec<String>,
    /// Every call, in order.
    pub calls: Vec<SurfaceCall>,
    /// Visuals currently shown.
    pub visible: Vec<Placement>,
}

impl RecordingSurface {
    /// Surface that measures every word as `default_size`.
    pub fn uniform(width: f64, height: f64) -> Self {
        Self {
            default_size: Footprint::new(width, height),
            sizes: HashMap::new(),
            unmeasurable: Vec::new(),
            calls: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Override the footprint of one word.
    #[allow(dead_code)] // Per-word sizes are exercised by the integration fixtures
    pub fn with_size(mut self, word: &str, width: f64, height: f64) -> Self {
        self.sizes
            .insert(word.to_string(), Footprint::new(width, height));
        self
    }

    /// Make measurement of `word` fail.
    pub fn with_unmeasurable(mut self, word: &str) -> Self {
        self.unmeasurable.push(word.to_string());
        self
    }

    /// Number of `measure_footprint` calls.
    pub fn measure_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Measure(_)))
            .count()
    }

    /// Words inserted, in call order.
    pub fn inserted(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Insert(w) => Some(w.clone()),
                _ => None,
            })
            .collect()
    }

    /// Words highlighted, in call order.
    pub fn highlighted(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Highlight(w) => Some(w.clone()),
                _ => None,
            })
            .collect()
    }
}

impl FootprintProvider for RecordingSurface {
    fn measure_footprint(
        &mut self,
        word: &Word,
        _options: &LabelOptions,
    ) -> Result<Footprint, MeasurementError> {
        self.calls.push(SurfaceCall::Measure(word.to_string()));
        if self.unmeasurable.iter().any(|w| w == word.as_str()) {
            return Err(MeasurementError::new(word, "unmeasurable in test"));
        }
        Ok(self
            .sizes
            .get(word.as_str())
            .copied()
            .unwrap_or(self.default_size))
    }
}

impl LabelSurface for RecordingSurface {
    fn insert_visual(&mut self, placement: &Placement) {
        self.calls.push(SurfaceCall::Insert(placement.word.to_string()));
        if !self.visible.iter().any(|p| p.word == placement.word) {
            self.visible.push(placement.clone());
        }
    }

    fn remove_all_visuals(&mut self) {
        self.calls.push(SurfaceCall::RemoveAll);
        self.visible.clear();
    }

    fn play_entrance_animation(&mut self, word: &Word, _animation: &Animation) {
        self.calls.push(SurfaceCall::Entrance(word.to_string()));
    }

    fn play_highlight_animation(&mut self, word: &Word, _animation: &Animation) {
        self.calls.push(SurfaceCall::Highlight(word.to_string()));
    }
}

/// Build word entries from plain strings.
pub fn entries(words: &[&str]) -> Vec<crate::model::WordEntry> {
    words
        .iter()
        .map(|w| crate::model::WordEntry::parse(*w).expect("valid test word"))
        .collect()
}
