//! Terminal implementation of the collaborator traits.
//!
//! One canvas unit is one terminal cell. A label's footprint is its display
//! width plus horizontal padding on both sides, by one row plus vertical
//! padding. Animations are recorded with their start time and sampled when a
//! frame is drawn.

use crate::layout::{FootprintProvider, LabelSurface};
use crate::model::{
    Animation, Footprint, LabelOptions, MeasurementError, OptionValue, Placement, Transform, Word,
};
use crate::view::styles::label_style;
use ratatui::style::Style;
use std::collections::HashMap;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Presentation settings derived from a word's effective options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLook {
    /// Blank cells left and right of the text.
    pub padding_x: u16,
    /// Blank rows above and below the text.
    pub padding_y: u16,
    /// Base text style.
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
struct Playback {
    animation: Animation,
    started: Duration,
}

/// A label currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Where the engine put it.
    pub placement: Placement,
    /// How to draw it.
    pub look: LabelLook,
    entrance: Option<Playback>,
    highlight: Option<Playback>,
}

impl Label {
    /// Transform at `now`, with entrance and highlight animations applied.
    pub fn transform_at(&self, now: Duration) -> Transform {
        let mut transform = self.placement.transform;
        for playback in [&self.entrance, &self.highlight].into_iter().flatten() {
            playback
                .animation
                .apply(now.saturating_sub(playback.started), &mut transform);
        }
        transform
    }

    fn is_animating(&self, now: Duration) -> bool {
        [&self.entrance, &self.highlight]
            .into_iter()
            .flatten()
            .any(|p| !p.animation.is_finished(now.saturating_sub(p.started)))
    }
}

/// Cell-grid surface shared by the TUI and headless modes.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    labels: Vec<Label>,
    looks: HashMap<Word, LabelLook>,
    now: Duration,
}

impl TerminalSurface {
    /// Empty surface at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time new animations start at and frames are sampled at.
    pub fn set_time(&mut self, now: Duration) {
        self.now = now;
    }

    /// Current surface time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Some animation is still playing.
    pub fn is_animating(&self) -> bool {
        self.labels.iter().any(|l| l.is_animating(self.now))
    }

    fn label_mut(&mut self, word: &Word) -> Option<&mut Label> {
        self.labels.iter_mut().find(|l| &l.placement.word == word)
    }
}

impl FootprintProvider for TerminalSurface {
    fn measure_footprint(
        &mut self,
        word: &Word,
        options: &LabelOptions,
    ) -> Result<Footprint, MeasurementError> {
        let padding_x = padding(word, options, "padding_x")?;
        let padding_y = padding(word, options, "padding_y")?;
        let width = word.as_str().width() + 2 * usize::from(padding_x);
        let height = 1 + 2 * usize::from(padding_y);

        self.looks.insert(
            word.clone(),
            LabelLook {
                padding_x,
                padding_y,
                style: label_style(options),
            },
        );
        Ok(Footprint::new(width as f64, height as f64))
    }

    fn release_footprint(&mut self, word: &Word) {
        self.looks.remove(word);
    }
}

fn padding(word: &Word, options: &LabelOptions, key: &str) -> Result<u16, MeasurementError> {
    match options.get(key) {
        None => Ok(0),
        Some(OptionValue::Number(n)) if n.is_finite() && *n >= 0.0 && *n <= f64::from(u16::MAX) => {
            Ok(n.round() as u16)
        }
        Some(other) => Err(MeasurementError::new(
            word,
            format!("{key} must be a non-negative number of cells, got {other:?}"),
        )),
    }
}

impl LabelSurface for TerminalSurface {
    fn insert_visual(&mut self, placement: &Placement) {
        let look = self.looks.get(&placement.word).copied().unwrap_or(LabelLook {
            padding_x: 0,
            padding_y: 0,
            style: Style::default(),
        });
        let label = Label {
            placement: placement.clone(),
            look,
            entrance: None,
            highlight: None,
        };
        match self.label_mut(&placement.word) {
            Some(existing) => *existing = label,
            None => self.labels.push(label),
        }
    }

    fn remove_all_visuals(&mut self) {
        self.labels.clear();
    }

    fn sync_time(&mut self, now: Duration) {
        self.now = now;
    }

    fn play_entrance_animation(&mut self, word: &Word, animation: &Animation) {
        let started = self.now;
        if let Some(label) = self.label_mut(word) {
            label.entrance = Some(Playback {
                animation: animation.clone(),
                started,
            });
        }
    }

    fn play_highlight_animation(&mut self, word: &Word, animation: &Animation) {
        let started = self.now;
        if let Some(label) = self.label_mut(word) {
            label.highlight = Some(Playback {
                animation: animation.clone(),
                started,
            });
        }
    }
}
