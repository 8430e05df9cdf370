//! Engine configuration and validation.

use crate::layout::SpiralParams;
use crate::model::{Animation, CloudError, HighlightEffect, LabelOptions};
use std::time::Duration;

/// Default time between two word placements.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Default settle time between the last submit and the pass start.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Default mean delay between two attention highlights.
pub const DEFAULT_HIGHLIGHT_MEAN: Duration = Duration::from_millis(500);

/// Default standard deviation of the highlight delay.
pub const DEFAULT_HIGHLIGHT_STD_DEV: Duration = Duration::from_millis(300);

/// Attention loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AttentionParams {
    /// Run the highlight loop after each completed pass.
    pub enabled: bool,
    /// Mean of the Gaussian reschedule delay.
    pub mean: Duration,
    /// Standard deviation of the reschedule delay.
    pub std_dev: Duration,
    /// Effect played on the chosen word.
    pub animation: Animation,
}

impl Default for AttentionParams {
    fn default() -> Self {
        Self {
            enabled: true,
            mean: DEFAULT_HIGHLIGHT_MEAN,
            std_dev: DEFAULT_HIGHLIGHT_STD_DEV,
            animation: HighlightEffect::default().animation(),
        }
    }
}

/// Everything the engine needs besides the word list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Interval between layout ticks; one word is placed per tick.
    pub tick_interval: Duration,
    /// Delay absorbing bursts of submissions into one pass.
    pub debounce: Duration,
    /// Spiral shape and search ceiling.
    pub spiral: SpiralParams,
    /// Reject candidates that stick out of the canvas.
    pub clip_to_canvas: bool,
    /// Options applied to every word under its own overrides.
    pub label_options: LabelOptions,
    /// Effect played when a label is inserted.
    pub entrance: Animation,
    /// Random highlight loop.
    pub attention: AttentionParams,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            debounce: DEFAULT_DEBOUNCE,
            spiral: SpiralParams::default(),
            clip_to_canvas: true,
            label_options: LabelOptions::default(),
            entrance: Animation::pop_in(),
            attention: AttentionParams::default(),
        }
    }
}

impl LayoutConfig {
    /// Reject configurations that would stall or spin the scheduler.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<(), CloudError> {
        if self.tick_interval.is_zero() {
            return Err(CloudError::invalid_config("tick_interval must be positive"));
        }
        let spiral = &self.spiral;
        if !(spiral.angle_step.is_finite() && spiral.angle_step > 0.0) {
            return Err(CloudError::invalid_config(format!(
                "angle_step must be positive and finite, got {}",
                spiral.angle_step
            )));
        }
        if !(spiral.distance_step.is_finite() && spiral.distance_step > 0.0) {
            return Err(CloudError::invalid_config(format!(
                "distance_step must be positive and finite, got {}",
                spiral.distance_step
            )));
        }
        if spiral.max_iterations == 0 {
            return Err(CloudError::invalid_config("max_iterations must be at least 1"));
        }
        if let Some(max) = spiral.max_distance {
            if !(max.is_finite() && max >= 0.0) {
                return Err(CloudError::invalid_config(format!(
                    "max_distance must be finite and non-negative, got {max}"
                )));
            }
        }
        if self.attention.enabled && self.attention.mean.is_zero() {
            return Err(CloudError::invalid_config(
                "highlight mean delay must be positive while attention is enabled",
            ));
        }
        Ok(())
    }
}

/// Convert configuration seconds into a [`Duration`].
///
/// # Errors
///
/// [`CloudError::InvalidConfiguration`] for negative, NaN or overflowing input.
pub fn duration_from_secs(field: &str, secs: f64) -> Result<Duration, CloudError> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        CloudError::invalid_config(format!(
            "{field} must be a finite, non-negative number of seconds, got {secs}"
        ))
    })
}
