//! Capability interface between the layout core and the presentation layer.
//!
//! The core never draws. It asks a [`FootprintProvider`] how big a label
//! will be and tells a [`LabelSurface`] where labels go and which effects to
//! play. Both calls are synchronous; animations are fire-and-forget.

use crate::model::{Animation, Footprint, LabelOptions, MeasurementError, Placement, Word};
use std::time::Duration;

/// Measures the rendered extent of a label.
pub trait FootprintProvider {
    /// Footprint of `word` drawn with `options`.
    ///
    /// Must be deterministic for identical inputs: the scheduler caches the
    /// result and never asks twice for the same `(word, options)`.
    fn measure_footprint(
        &mut self,
        word: &Word,
        options: &LabelOptions,
    ) -> Result<Footprint, MeasurementError>;

    /// `word` left the active set; per-word state kept for it can go.
    fn release_footprint(&mut self, _word: &Word) {}
}

/// Receives placed labels and visual effects.
pub trait LabelSurface {
    /// Reveal `placement.word` at `placement.center`. Calling twice with the
    /// same placement has no further effect.
    fn insert_visual(&mut self, placement: &Placement);

    /// Remove every label from the presentation layer.
    fn remove_all_visuals(&mut self);

    /// Start the entrance effect on a freshly inserted label.
    fn play_entrance_animation(&mut self, word: &Word, animation: &Animation);

    /// Start the attention effect on a placed label.
    fn play_highlight_animation(&mut self, word: &Word, animation: &Animation);

    /// Virtual time of the timer about to be handled. Effects started while
    /// handling it belong to this instant.
    fn sync_time(&mut self, _now: Duration) {}
}
