//! Shared fixtures for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wordcloud::layout::{FootprintProvider, LabelSurface};
use wordcloud::model::{
    Animation, Footprint, LabelOptions, MeasurementError, Placement, Word, WordEntry,
};
use wordcloud::CloudEvent;

/// Surface with a fixed footprint table that records what it was asked to do.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub default_size: Footprint,
    pub sizes: HashMap<String, Footprint>,
    pub measured: Vec<String>,
    pub inserted: Vec<String>,
    pub highlighted: Vec<String>,
    pub visible: Vec<Placement>,
    pub clears: usize,
}

impl FakeSurface {
    pub fn uniform(width: f64, height: f64) -> Self {
        Self {
            default_size: Footprint::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, word: &str, width: f64, height: f64) -> Self {
        self.sizes.insert(word.to_string(), Footprint::new(width, height));
        self
    }
}

impl FootprintProvider for FakeSurface {
    fn measure_footprint(
        &mut self,
        word: &Word,
        _options: &LabelOptions,
    ) -> Result<Footprint, MeasurementError> {
        self.measured.push(word.to_string());
        Ok(self
            .sizes
            .get(word.as_str())
            .copied()
            .unwrap_or(self.default_size))
    }
}

impl LabelSurface for FakeSurface {
    fn insert_visual(&mut self, placement: &Placement) {
        self.inserted.push(placement.word.to_string());
        self.visible.push(placement.clone());
    }

    fn remove_all_visuals(&mut self) {
        self.clears += 1;
        self.visible.clear();
    }

    fn play_entrance_animation(&mut self, _word: &Word, _animation: &Animation) {}

    fn play_highlight_animation(&mut self, word: &Word, _animation: &Animation) {
        self.highlighted.push(word.to_string());
    }
}

/// Parse plain strings into word entries.
pub fn entries(words: &[&str]) -> Vec<WordEntry> {
    words
        .iter()
        .map(|w| WordEntry::parse(*w).expect("valid test word"))
        .collect()
}

/// Shared event log filled by a listener.
pub type EventLog = Rc<RefCell<Vec<CloudEvent>>>;

/// Listener closure appending every event to `log`.
pub fn recorder(log: &EventLog) -> impl FnMut(&CloudEvent) + 'static {
    let log = Rc::clone(log);
    move |event| log.borrow_mut().push(event.clone())
}
