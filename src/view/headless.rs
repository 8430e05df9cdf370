//! Headless layout.
//!
//! Runs one pass on the virtual clock, without a terminal, and reports the
//! result as serializable data.

use crate::cloud::{CloudEvent, WordCloud};
use crate::layout::LayoutConfig;
use crate::model::{Canvas, CloudError, WordEntry};
use crate::view::surface::TerminalSurface;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

/// A placed label, in canvas cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    /// Label text.
    pub word: String,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Footprint width.
    pub width: f64,
    /// Footprint height.
    pub height: f64,
    /// Spiral candidates tested.
    pub iterations: u32,
}

/// A word that got no placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedLabel {
    /// Label text.
    pub word: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of a headless pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDump {
    /// Area the labels were laid out on.
    pub canvas: Canvas,
    /// Placements in commit order.
    pub placements: Vec<PlacedLabel>,
    /// Skipped words in pass order.
    pub failures: Vec<FailedLabel>,
}

/// Lay out `words` on `canvas` and return the finished pass.
///
/// # Errors
///
/// [`CloudError::InvalidConfiguration`] if `config` or `canvas` is invalid.
pub fn lay_out(
    config: LayoutConfig,
    canvas: Canvas,
    words: Vec<WordEntry>,
    seed: Option<u64>,
) -> Result<LayoutDump, CloudError> {
    let budget = pass_budget(&config, words.len());
    let surface = TerminalSurface::new();
    let mut cloud = match seed {
        Some(seed) => WordCloud::seeded(config, canvas, surface, seed)?,
        None => WordCloud::new(config, canvas, surface)?,
    };

    let failures = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&failures);
    cloud.on_event(move |event| {
        if let CloudEvent::PlacementFailed { word, error } = event {
            sink.borrow_mut().push(FailedLabel {
                word: word.to_string(),
                reason: error.to_string(),
            });
        }
    });

    cloud.submit(words);
    if !cloud.advance_until_idle(budget) {
        warn!(?budget, "Headless pass did not finish in time");
    }

    let placements = cloud
        .placements()
        .iter()
        .map(|p| PlacedLabel {
            word: p.word.to_string(),
            x: p.center.x,
            y: p.center.y,
            width: p.footprint.width,
            height: p.footprint.height,
            iterations: p.iterations,
        })
        .collect();
    let failures = failures.borrow().clone();
    Ok(LayoutDump {
        canvas: cloud.canvas(),
        placements,
        failures,
    })
}

/// Virtual time a pass over `count` words needs: the debounce plus one tick
/// per word, plus one spare tick.
fn pass_budget(config: &LayoutConfig, count: usize) -> Duration {
    let ticks = u32::try_from(count.saturating_add(1)).unwrap_or(u32::MAX);
    config
        .tick_interval
        .checked_mul(ticks)
        .and_then(|t| t.checked_add(config.debounce))
        .unwrap_or(Duration::MAX)
}
