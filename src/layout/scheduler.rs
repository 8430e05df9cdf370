//! Incremental placement scheduler.
//!
//! A pass places the active words one per tick, in submission order. Each
//! tick resolves the word's footprint from the cache, runs the spiral search
//! from the canvas center against the collision index, and commits the
//! result. The scheduler never emits events itself: [`tick`] returns a
//! [`TickReport`] and the engine turns it into listener calls.
//!
//! [`tick`]: PlacementScheduler::tick

use crate::layout::{
    Clock, CollisionIndex, FootprintProvider, LabelCache, LabelSurface, LayoutConfig, PassId,
    PlacementSet, SpiralSearch, TimerHandle, TimerKind,
};
use crate::model::{
    Animation, Canvas, CloudError, LabelOptions, Placement, Transform, Word, WordEntry,
};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lifecycle of the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// Nothing scheduled, nothing placed.
    Idle,
    /// Waiting for submissions to settle before starting a pass.
    Debouncing,
    /// Placing words, one per tick.
    Running(PassId),
    /// Every word of the pass has been handled.
    Drained(PassId),
}

/// Result of handling one word.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The word was committed.
    Placed(Placement),
    /// The word was skipped.
    Failed {
        /// Word that did not get a placement.
        word: Word,
        /// Measurement failure or exhausted search.
        error: CloudError,
    },
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Pass the tick belonged to.
    pub pass: PassId,
    /// Outcome for the word handled by this tick.
    pub outcome: TickOutcome,
    /// The queue is empty and the tick timer has been cancelled.
    pub drained: bool,
}

#[derive(Debug, Clone)]
struct PendingWord {
    index: usize,
    word: Word,
    options: LabelOptions,
}

/// Owns per-pass layout state, the collision index, placements and the
/// footprint cache.
#[derive(Debug)]
pub struct PlacementScheduler {
    active: Vec<WordEntry>,
    base_options: LabelOptions,
    cache: LabelCache,
    index: CollisionIndex,
    placements: PlacementSet,
    pending: VecDeque<PendingWord>,
    search: SpiralSearch,
    canvas: Canvas,
    clip_to_canvas: bool,
    tick_interval: Duration,
    debounce: Duration,
    entrance: Animation,
    state: PassState,
    last_pass: PassId,
    debounce_timer: Option<TimerHandle>,
    tick_timer: Option<TimerHandle>,
}

impl PlacementScheduler {
    /// Scheduler for `canvas`. `config` must already be validated.
    pub fn new(config: &LayoutConfig, canvas: Canvas) -> Self {
        Self {
            active: Vec::new(),
            base_options: config.label_options.clone(),
            cache: LabelCache::new(),
            index: CollisionIndex::new(),
            placements: PlacementSet::new(),
            pending: VecDeque::new(),
            search: SpiralSearch::new(config.spiral),
            canvas,
            clip_to_canvas: config.clip_to_canvas,
            tick_interval: config.tick_interval,
            debounce: config.debounce,
            entrance: config.entrance.clone(),
            state: PassState::Idle,
            last_pass: PassId::default(),
            debounce_timer: None,
            tick_timer: None,
        }
    }

    /// Apply new timing, spiral and option settings.
    ///
    /// Takes effect from the next pass; a running pass keeps its tick timer.
    pub fn configure(&mut self, config: &LayoutConfig) {
        self.base_options = config.label_options.clone();
        self.search = SpiralSearch::new(config.spiral);
        self.clip_to_canvas = config.clip_to_canvas;
        self.tick_interval = config.tick_interval;
        self.debounce = config.debounce;
        self.entrance = config.entrance.clone();
    }

    /// Replace the active word set and schedule a pass after the debounce.
    ///
    /// Cancels any pass in flight. Repeated words keep their first position.
    /// Footprints are measured here, once per distinct `(word, options)`.
    pub fn submit<P>(&mut self, entries: Vec<WordEntry>, provider: &mut P, clock: &mut Clock)
    where
        P: FootprintProvider + ?Sized,
    {
        self.discard_pass(clock);

        let mut seen = HashSet::new();
        let total = entries.len();
        self.active = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.word.clone()))
            .collect();
        if self.active.len() != total {
            debug!(
                submitted = total,
                distinct = self.active.len(),
                "Dropped repeated words from submission"
            );
        }

        let active: HashSet<&Word> = self.active.iter().map(|e| &e.word).collect();
        for word in self.cache.retain_active(&active) {
            provider.release_footprint(&word);
        }
        self.measure_active(provider);

        self.debounce_timer = Some(clock.schedule_once(self.debounce, TimerKind::Debounce));
        self.state = PassState::Debouncing;
    }

    /// Replace the global label options and re-measure words whose
    /// effective options changed. Does not start a pass.
    pub fn set_label_options<P>(&mut self, options: LabelOptions, provider: &mut P)
    where
        P: FootprintProvider + ?Sized,
    {
        self.base_options = options;
        self.measure_active(provider);
    }

    fn measure_active<P>(&mut self, provider: &mut P)
    where
        P: FootprintProvider + ?Sized,
    {
        for entry in &self.active {
            let options = self.base_options.merged(&entry.options);
            if let Err(err) = self.cache.resolve(&entry.word, &options, provider) {
                debug!(word = %entry.word, error = %err, "Measurement failed");
            }
        }
    }

    /// Start a pass immediately: clear the scene and arm the tick timer.
    ///
    /// Returns `None` when there is nothing to place; no pass is started and
    /// the scheduler goes back to idle.
    pub fn begin_pass<S>(&mut self, surface: &mut S, clock: &mut Clock) -> Option<PassId>
    where
        S: LabelSurface + ?Sized,
    {
        self.discard_pass(clock);
        surface.remove_all_visuals();

        if self.active.is_empty() {
            debug!("No words to lay out");
            self.state = PassState::Idle;
            return None;
        }

        let base = &self.base_options;
        self.pending = self
            .active
            .iter()
            .enumerate()
            .map(|(index, entry)| PendingWord {
                index,
                word: entry.word.clone(),
                options: base.merged(&entry.options),
            })
            .collect();

        self.last_pass = PassId(self.last_pass.0 + 1);
        let pass = self.last_pass;
        self.tick_timer = Some(clock.schedule_interval(self.tick_interval, TimerKind::LayoutTick(pass)));
        self.state = PassState::Running(pass);
        info!(
            pass = pass.0,
            words = self.pending.len(),
            canvas = ?self.canvas,
            "Layout pass started"
        );
        Some(pass)
    }

    /// Place the next pending word.
    ///
    /// Returns `None` if no pass is running.
    pub fn tick<S>(&mut self, surface: &mut S, clock: &mut Clock) -> Option<TickReport>
    where
        S: FootprintProvider + LabelSurface + ?Sized,
    {
        let PassState::Running(pass) = self.state else {
            return None;
        };
        let Some(next) = self.pending.pop_front() else {
            self.finish_pass(pass, clock);
            return None;
        };

        let outcome = match self.cache.resolve(&next.word, &next.options, surface) {
            Err(err) => TickOutcome::Failed {
                word: next.word,
                error: CloudError::Measurement(err),
            },
            Ok(footprint) => {
                let index = &self.index;
                let canvas = self.canvas;
                let clip = self.clip_to_canvas;
                let found = self.search.find(canvas.center(), footprint, |rect| {
                    index.test(rect) || (clip && !canvas.contains(rect))
                });
                match found {
                    Ok(hit) => {
                        let placement = Placement {
                            word: next.word,
                            index: next.index,
                            center: hit.center,
                            footprint,
                            placed_at: clock.now(),
                            iterations: hit.iterations,
                            transform: Transform::default(),
                        };
                        self.commit(placement, surface)
                    }
                    Err(exhausted) => TickOutcome::Failed {
                        word: next.word.clone(),
                        error: CloudError::PlacementUnresolved {
                            word: next.word,
                            iterations: exhausted.iterations,
                            distance: exhausted.distance,
                        },
                    },
                }
            }
        };

        match &outcome {
            TickOutcome::Placed(p) => debug!(
                word = %p.word,
                x = p.center.x,
                y = p.center.y,
                iterations = p.iterations,
                "Placed word"
            ),
            TickOutcome::Failed { word, error } => {
                warn!(word = %word, error = %error, "Word could not be placed")
            }
        }

        let drained = self.pending.is_empty();
        if drained {
            self.finish_pass(pass, clock);
        }
        Some(TickReport {
            pass,
            outcome,
            drained,
        })
    }

    fn commit<S>(&mut self, placement: Placement, surface: &mut S) -> TickOutcome
    where
        S: LabelSurface + ?Sized,
    {
        let word = placement.word.clone();
        match self.placements.insert(placement) {
            Ok(committed) => {
                self.index.add(committed.rect());
                surface.insert_visual(committed);
                surface.play_entrance_animation(&word, &self.entrance);
                TickOutcome::Placed(committed.clone())
            }
            Err(duplicate) => TickOutcome::Failed {
                word,
                error: CloudError::PlacementUnresolved {
                    word: duplicate.word,
                    iterations: duplicate.iterations,
                    distance: 0.0,
                },
            },
        }
    }

    fn finish_pass(&mut self, pass: PassId, clock: &mut Clock) {
        if let Some(handle) = self.tick_timer.take() {
            clock.cancel(handle);
        }
        self.state = PassState::Drained(pass);
        info!(
            pass = pass.0,
            placed = self.placements.len(),
            "Layout pass drained"
        );
    }

    /// Cancel timers and drop the queue, placements and collision index.
    /// The active word set and the cache are kept.
    pub fn reset<S>(&mut self, surface: &mut S, clock: &mut Clock)
    where
        S: LabelSurface + ?Sized,
    {
        self.discard_pass(clock);
        surface.remove_all_visuals();
        self.state = PassState::Idle;
    }

    fn discard_pass(&mut self, clock: &mut Clock) {
        if let Some(handle) = self.debounce_timer.take() {
            clock.cancel(handle);
        }
        if let Some(handle) = self.tick_timer.take() {
            clock.cancel(handle);
        }
        self.pending.clear();
        self.index.clear();
        self.placements.clear();
    }

    /// Whether `handle` is the debounce timer this scheduler is waiting on.
    pub fn owns_debounce(&self, handle: TimerHandle) -> bool {
        self.debounce_timer == Some(handle)
    }

    /// Whether `handle` is the tick timer of the running pass `pass`.
    pub fn owns_tick(&self, handle: TimerHandle, pass: PassId) -> bool {
        self.state == PassState::Running(pass) && self.tick_timer == Some(handle)
    }

    /// Forget the fired debounce timer before starting the pass.
    pub fn debounce_fired(&mut self) {
        self.debounce_timer = None;
    }

    /// A pass is running or has drained, so there is a scene to tear down.
    pub fn is_populated(&self) -> bool {
        matches!(self.state, PassState::Running(_) | PassState::Drained(_))
    }

    /// Current pass state.
    pub fn state(&self) -> PassState {
        self.state
    }

    /// Placements committed in the current pass.
    pub fn placements(&self) -> &PlacementSet {
        &self.placements
    }

    /// Collision index of the current pass.
    pub fn collision_index(&self) -> &CollisionIndex {
        &self.index
    }

    /// Footprint cache.
    pub fn cache(&self) -> &LabelCache {
        &self.cache
    }

    /// Words still waiting for a tick.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Active words in submission order, repeats removed.
    pub fn active_words(&self) -> impl Iterator<Item = &Word> {
        self.active.iter().map(|e| &e.word)
    }

    /// Layout area.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Move or resize the layout area. Takes effect from the next pass.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
