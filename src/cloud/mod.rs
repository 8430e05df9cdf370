//! Word cloud engine.
//!
//! [`WordCloud`] wires the pure layout pieces together: it owns the virtual
//! [`Clock`], the [`PlacementScheduler`], the [`AttentionAnimator`] and the
//! collaborator surface, and turns fired timers into placements, highlights
//! and [`CloudEvent`]s.
//!
//! Time only moves when the host calls [`WordCloud::advance`] (or
//! [`WordCloud::advance_until_idle`]). Every timer callback runs to
//! completion before the next one, so a superseded pass can never interleave
//! with the pass that replaced it.

mod events;

pub use events::{CloudEvent, ListenerId, Listeners};

use crate::layout::{
    AttentionAnimator, Clock, CollisionIndex, FootprintProvider, LabelSurface, LayoutConfig,
    PassState, PlacementScheduler, PlacementSet, TickOutcome, TimerHandle, TimerKind,
};
use crate::model::{Canvas, CloudError, LabelOptions, Word, WordEntry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Incremental, collision-free word cloud layout.
pub struct WordCloud<S, R = StdRng> {
    config: LayoutConfig,
    surface: S,
    clock: Clock,
    scheduler: PlacementScheduler,
    animator: AttentionAnimator<R>,
    listeners: Listeners,
}

impl<S> WordCloud<S, StdRng>
where
    S: FootprintProvider + LabelSurface,
{
    /// Engine with an entropy-seeded random source.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] if `config` or `canvas` is invalid.
    pub fn new(config: LayoutConfig, canvas: Canvas, surface: S) -> Result<Self, CloudError> {
        Self::with_rng(config, canvas, surface, StdRng::from_entropy())
    }

    /// Engine with a reproducible random source.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] if `config` or `canvas` is invalid.
    pub fn seeded(
        config: LayoutConfig,
        canvas: Canvas,
        surface: S,
        seed: u64,
    ) -> Result<Self, CloudError> {
        Self::with_rng(config, canvas, surface, StdRng::seed_from_u64(seed))
    }
}

impl<S, R> WordCloud<S, R>
where
    S: FootprintProvider + LabelSurface,
    R: Rng,
{
    /// Engine drawing highlight choices and delays from `rng`.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] if `config` or `canvas` is invalid.
    pub fn with_rng(
        config: LayoutConfig,
        canvas: Canvas,
        surface: S,
        rng: R,
    ) -> Result<Self, CloudError> {
        config.validate()?;
        validate_canvas(canvas)?;
        let animator = AttentionAnimator::new(&config.attention, rng)?;
        Ok(Self {
            scheduler: PlacementScheduler::new(&config, canvas),
            config,
            surface,
            clock: Clock::new(),
            animator,
            listeners: Listeners::default(),
        })
    }

    // ===== Listeners =====

    /// Register an event callback.
    pub fn on_event(&mut self, listener: impl FnMut(&CloudEvent) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister an event callback.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // ===== Commands =====

    /// Replace the word set. A pass starts once submissions have been quiet
    /// for the debounce interval.
    ///
    /// Any pass in flight is abandoned and the highlight loop stops.
    pub fn submit<I, W>(&mut self, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<WordEntry>,
    {
        let entries: Vec<WordEntry> = words.into_iter().map(Into::into).collect();
        debug!(count = entries.len(), "Words submitted");
        self.teardown();
        self.scheduler
            .submit(entries, &mut self.surface, &mut self.clock);
    }

    /// Replace the global label options.
    ///
    /// Words whose effective options changed are re-measured, and a
    /// populated scene is laid out again with the new footprints.
    pub fn set_label_options(&mut self, options: LabelOptions) {
        self.config.label_options = options.clone();
        self.scheduler
            .set_label_options(options, &mut self.surface);
        if self.scheduler.is_populated() {
            self.relayout();
        }
    }

    /// Move or resize the layout area and re-lay a populated scene.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] for a degenerate canvas.
    pub fn set_canvas(&mut self, canvas: Canvas) -> Result<(), CloudError> {
        validate_canvas(canvas)?;
        if canvas == self.scheduler.canvas() {
            return Ok(());
        }
        info!(width = canvas.width, height = canvas.height, "Canvas changed");
        self.scheduler.set_canvas(canvas);
        if self.scheduler.is_populated() {
            self.relayout();
        }
        Ok(())
    }

    /// Start a fresh pass now over the current word set, skipping the
    /// debounce.
    pub fn relayout(&mut self) {
        self.teardown();
        self.begin_pass();
    }

    /// Stop everything and clear the scene. The word set and the footprint
    /// cache are kept, so [`relayout`](Self::relayout) restores the cloud.
    pub fn reset(&mut self) {
        self.animator.cancel(&mut self.clock);
        self.scheduler.reset(&mut self.surface, &mut self.clock);
        debug!("Cloud reset");
    }

    /// Swap in a new configuration. Timing and spiral changes apply from the
    /// next pass. Changed label options behave like
    /// [`set_label_options`](Self::set_label_options): a populated scene is
    /// laid out again so no queued word keeps the old options.
    ///
    /// # Errors
    ///
    /// [`CloudError::InvalidConfiguration`] if `config` is invalid. The
    /// previous configuration stays in effect.
    pub fn update_config(&mut self, config: LayoutConfig) -> Result<(), CloudError> {
        config.validate()?;
        self.animator.configure(&config.attention)?;
        if !config.attention.enabled {
            self.animator.cancel(&mut self.clock);
        }
        let options_changed = config.label_options != self.config.label_options;
        self.scheduler.configure(&config);
        self.config = config;
        if options_changed {
            self.scheduler
                .set_label_options(self.config.label_options.clone(), &mut self.surface);
            if self.scheduler.is_populated() {
                self.relayout();
            }
        }
        Ok(())
    }

    // ===== Time =====

    /// Move virtual time forward by `dt`, firing every timer that falls due
    /// in deadline order. Returns how many timers fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let target = self.clock.now() + dt;
        let mut fired = 0;
        while let Some((handle, kind)) = self.clock.pop_due(target) {
            self.dispatch(handle, kind);
            fired += 1;
        }
        self.clock.advance_to(target);
        fired
    }

    /// Fire timers until no submission is settling and no pass is running,
    /// without moving further than `limit` past the current time.
    ///
    /// Returns `true` if the engine went idle within the limit.
    pub fn advance_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = self.clock.now() + limit;
        while self.is_busy() {
            let Some((handle, kind)) = self.clock.pop_due(deadline) else {
                self.clock.advance_to(deadline);
                return false;
            };
            self.dispatch(handle, kind);
        }
        true
    }

    /// Deadline of the next pending timer, in virtual time.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.clock.next_deadline()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    fn dispatch(&mut self, handle: TimerHandle, kind: TimerKind) {
        self.surface.sync_time(self.clock.now());
        match kind {
            TimerKind::Debounce => {
                if !self.scheduler.owns_debounce(handle) {
                    warn!(?handle, "Ignoring stale debounce timer");
                    return;
                }
                self.scheduler.debounce_fired();
                self.begin_pass();
            }
            TimerKind::LayoutTick(pass) => {
                if !self.scheduler.owns_tick(handle, pass) {
                    warn!(?handle, pass = pass.0, "Ignoring stale layout tick");
                    self.clock.cancel(handle);
                    return;
                }
                self.tick();
            }
            TimerKind::Attention => {
                if !self.animator.owns(handle) {
                    warn!(?handle, "Ignoring stale highlight timer");
                    return;
                }
                self.animator.fire(
                    self.scheduler.placements(),
                    &mut self.surface,
                    &mut self.clock,
                );
            }
        }
    }

    fn begin_pass(&mut self) {
        self.scheduler
            .begin_pass(&mut self.surface, &mut self.clock);
    }

    fn tick(&mut self) {
        let Some(report) = self.scheduler.tick(&mut self.surface, &mut self.clock) else {
            return;
        };
        if let TickOutcome::Failed { word, error } = report.outcome {
            self.listeners
                .emit(&CloudEvent::PlacementFailed { word, error });
        }
        if report.drained {
            self.listeners.emit(&CloudEvent::PostPopulate);
            if self.config.attention.enabled {
                self.animator.start(
                    self.scheduler.placements(),
                    &mut self.surface,
                    &mut self.clock,
                );
            }
        }
    }

    /// Announce and stop whatever depends on the current scene.
    fn teardown(&mut self) {
        if self.scheduler.is_populated() {
            self.listeners.emit(&CloudEvent::PrePopulate);
        }
        self.animator.cancel(&mut self.clock);
    }

    fn is_busy(&self) -> bool {
        matches!(
            self.scheduler.state(),
            PassState::Debouncing | PassState::Running(_)
        )
    }

    // ===== Accessors =====

    /// Current pass state.
    pub fn state(&self) -> PassState {
        self.scheduler.state()
    }

    /// Placements of the current pass.
    pub fn placements(&self) -> &PlacementSet {
        self.scheduler.placements()
    }

    /// Rectangles claimed by the current pass.
    pub fn collision_index(&self) -> &CollisionIndex {
        self.scheduler.collision_index()
    }

    /// Underlying scheduler, for inspection.
    pub fn scheduler(&self) -> &PlacementScheduler {
        &self.scheduler
    }

    /// Word highlighted most recently by the attention loop.
    pub fn highlighted(&self) -> Option<&Word> {
        self.animator.highlighted()
    }

    /// The attention loop has a highlight scheduled.
    pub fn is_highlighting(&self) -> bool {
        self.animator.is_running()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.clock.pending_count()
    }

    /// Layout area.
    pub fn canvas(&self) -> Canvas {
        self.scheduler.canvas()
    }

    /// Active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Collaborator surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable collaborator surface, for host-side state such as frame time.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

fn validate_canvas(canvas: Canvas) -> Result<(), CloudError> {
    if canvas.is_valid() {
        Ok(())
    } else {
        Err(CloudError::invalid_config(format!(
            "canvas must have finite, non-negative size, got {}x{}",
            canvas.width, canvas.height
        )))
    }
}

impl<S: std::fmt::Debug, R> std::fmt::Debug for WordCloud<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCloud")
            .field("state", &self.scheduler.state())
            .field("placed", &self.scheduler.placements().len())
            .field("now", &self.clock.now())
            .field("listeners", &self.listeners)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "cloud_tests.rs"]
mod tests;
