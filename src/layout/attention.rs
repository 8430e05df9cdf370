//! Random highlight loop over placed words.
//!
//! Once a pass drains, the animator highlights one placed word picked
//! uniformly at random, then schedules itself again after a Gaussian delay
//! (absolute value, so never negative). Cancelling clears the pending timer
//! so a superseded scene never receives a highlight.

use crate::layout::{AttentionParams, Clock, LabelSurface, PlacementSet, TimerHandle, TimerKind};
use crate::model::{Animation, CloudError, Word};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;
use tracing::debug;

/// Highlight loop state.
#[derive(Debug)]
pub struct AttentionAnimator<R> {
    rng: R,
    delay: Normal<f64>,
    animation: Animation,
    highlighted: Option<Word>,
    pending: Option<TimerHandle>,
}

impl<R: Rng> AttentionAnimator<R> {
    /// Animator drawing from `rng`.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] if the delay distribution cannot
    /// be built.
    pub fn new(params: &AttentionParams, rng: R) -> Result<Self, CloudError> {
        Ok(Self {
            rng,
            delay: delay_distribution(params)?,
            animation: params.animation.clone(),
            highlighted: None,
            pending: None,
        })
    }

    /// Apply new delay and effect settings. The running loop picks them up
    /// at its next reschedule.
    pub fn configure(&mut self, params: &AttentionParams) -> Result<(), CloudError> {
        self.delay = delay_distribution(params)?;
        self.animation = params.animation.clone();
        Ok(())
    }

    /// Start the loop: highlight now, then keep rescheduling.
    pub fn start<S>(&mut self, placed: &PlacementSet, surface: &mut S, clock: &mut Clock)
    where
        S: LabelSurface + ?Sized,
    {
        self.cancel(clock);
        self.fire(placed, surface, clock);
    }

    /// Highlight a random placed word and schedule the next fire.
    ///
    /// An empty placement set highlights nothing but still reschedules.
    pub fn fire<S>(
        &mut self,
        placed: &PlacementSet,
        surface: &mut S,
        clock: &mut Clock,
    ) -> Option<Word>
    where
        S: LabelSurface + ?Sized,
    {
        if let Some(handle) = self.pending.take() {
            clock.cancel(handle);
        }
        let chosen = placed
            .as_slice()
            .choose(&mut self.rng)
            .map(|p| p.word.clone());
        if let Some(word) = &chosen {
            surface.play_highlight_animation(word, &self.animation);
            debug!(word = %word, "Highlighted word");
        }
        self.highlighted = chosen.clone();

        let delay = self.next_delay();
        self.pending = Some(clock.schedule_once(delay, TimerKind::Attention));
        chosen
    }

    /// Stop the loop. Safe to call when not running.
    pub fn cancel(&mut self, clock: &mut Clock) {
        if let Some(handle) = self.pending.take() {
            clock.cancel(handle);
        }
        self.highlighted = None;
    }

    /// Sample the next reschedule delay.
    pub fn next_delay(&mut self) -> Duration {
        let secs = self.delay.sample(&mut self.rng).abs();
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// Whether `handle` is this animator's pending timer.
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.pending == Some(handle)
    }

    /// The loop has a reschedule pending.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Word chosen by the most recent fire.
    pub fn highlighted(&self) -> Option<&Word> {
        self.highlighted.as_ref()
    }
}

fn delay_distribution(params: &AttentionParams) -> Result<Normal<f64>, CloudError> {
    Normal::new(params.mean.as_secs_f64(), params.std_dev.as_secs_f64())
        .map_err(|err| CloudError::invalid_config(format!("highlight delay: {err}")))
}
