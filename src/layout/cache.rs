//! Footprint cache keyed by word.
//!
//! Entries survive pass resets so unchanged words are not re-measured. An
//! entry is dropped when its word leaves the active set, and re-measured when
//! the word's effective options differ from the ones it was measured with.
//! Failed measurements are cached too: providers are deterministic.

use crate::layout::FootprintProvider;
use crate::model::{Footprint, LabelOptions, MeasurementError, Word};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One cached measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedLabel {
    /// Effective options the footprint was measured with.
    pub options: LabelOptions,
    /// Measurement outcome.
    pub footprint: Result<Footprint, MeasurementError>,
}

/// Word → measured footprint.
#[derive(Debug, Default)]
pub struct LabelCache {
    entries: HashMap<Word, CachedLabel>,
    measurements: usize,
}

impl LabelCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached footprint for `word`, measuring it first if missing or stale.
    pub fn resolve<P>(
        &mut self,
        word: &Word,
        options: &LabelOptions,
        provider: &mut P,
    ) -> Result<Footprint, MeasurementError>
    where
        P: FootprintProvider + ?Sized,
    {
        if let Some(cached) = self.entries.get(word) {
            if &cached.options == options {
                return cached.footprint.clone();
            }
            debug!(word = %word, "Label options changed, re-measuring");
        }

        let footprint = provider
            .measure_footprint(word, options)
            .and_then(|footprint| {
                if footprint.is_valid() {
                    Ok(footprint)
                } else {
                    Err(MeasurementError::new(
                        word,
                        format!("provider returned invalid footprint {footprint:?}"),
                    ))
                }
            });
        self.measurements += 1;
        self.entries.insert(
            word.clone(),
            CachedLabel {
                options: options.clone(),
                footprint: footprint.clone(),
            },
        );
        footprint
    }

    /// Cached outcome for `word`, without measuring.
    pub fn get(&self, word: &Word) -> Option<&CachedLabel> {
        self.entries.get(word)
    }

    /// Drop entries for words not in `active` and return those words.
    pub fn retain_active(&mut self, active: &HashSet<&Word>) -> Vec<Word> {
        let evicted: Vec<Word> = self
            .entries
            .keys()
            .filter(|word| !active.contains(word))
            .cloned()
            .collect();
        for word in &evicted {
            self.entries.remove(word);
        }
        evicted
    }

    /// Number of cached words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Provider calls made over the cache's lifetime.
    pub fn measurement_count(&self) -> usize {
        self.measurements
    }
}
