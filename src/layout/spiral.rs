//! Spiral search for a free label slot.
//!
//! Candidate `k` sits at angle `k * angle_step` and distance
//! `k * distance_step` from the origin, so the search walks an Archimedean
//! spiral outward and returns the first candidate that is not blocked.
//! Angle and distance are local to one search: every word starts again at
//! the origin.

use crate::model::{Footprint, Point, Rect};
use std::f64::consts::PI;

/// Default angular increment per candidate (radians).
pub const DEFAULT_ANGLE_STEP: f64 = PI / 100.0;

/// Default radial increment per candidate (canvas units).
pub const DEFAULT_DISTANCE_STEP: f64 = 0.1;

/// Default ceiling on candidates tested for one word.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20_000;

/// Spiral shape and search ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    /// Angle added per candidate. Smaller values pack denser but slower.
    pub angle_step: f64,
    /// Distance added per candidate.
    pub distance_step: f64,
    /// Maximum candidates tested before giving up.
    pub max_iterations: u32,
    /// Optional maximum distance from the origin.
    pub max_distance: Option<f64>,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            distance_step: DEFAULT_DISTANCE_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_distance: None,
        }
    }
}

/// A point on the spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralCandidate {
    /// Candidate number, starting at 0 for the origin itself.
    pub step: u32,
    /// Accumulated angle.
    pub angle: f64,
    /// Accumulated distance.
    pub distance: f64,
    /// Resulting label center.
    pub center: Point,
}

/// Infinite iterator over spiral candidates around an origin.
#[derive(Debug, Clone)]
pub struct SpiralCandidates {
    origin: Point,
    angle_step: f64,
    distance_step: f64,
    step: u32,
}

impl Iterator for SpiralCandidates {
    type Item = SpiralCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.step;
        self.step = self.step.checked_add(1)?;
        let angle = f64::from(step) * self.angle_step;
        let distance = f64::from(step) * self.distance_step;
        Some(SpiralCandidate {
            step,
            angle,
            distance,
            center: Point::new(
                self.origin.x + angle.cos() * distance,
                self.origin.y + angle.sin() * distance,
            ),
        })
    }
}

/// Successful search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralHit {
    /// Free center found.
    pub center: Point,
    /// Candidates tested, including the winning one.
    pub iterations: u32,
    /// Distance of the winning candidate from the origin.
    pub distance: f64,
}

/// The search hit its ceiling without finding a free slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralExhausted {
    /// Candidates tested.
    pub iterations: u32,
    /// Distance of the last candidate tested.
    pub distance: f64,
}

/// Stateless spiral search with fixed parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiralSearch {
    params: SpiralParams,
}

impl SpiralSearch {
    /// Search using `params`.
    pub fn new(params: SpiralParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &SpiralParams {
        &self.params
    }

    /// Unbounded candidate sequence around `origin`.
    pub fn candidates(&self, origin: Point) -> SpiralCandidates {
        SpiralCandidates {
            origin,
            angle_step: self.params.angle_step,
            distance_step: self.params.distance_step,
            step: 0,
        }
    }

    /// Find the first candidate whose rectangle `is_blocked` rejects as free.
    pub fn find<F>(
        &self,
        origin: Point,
        footprint: Footprint,
        mut is_blocked: F,
    ) -> Result<SpiralHit, SpiralExhausted>
    where
        F: FnMut(&Rect) -> bool,
    {
        let mut tested = 0;
        let mut last_distance = 0.0;
        for candidate in self
            .candidates(origin)
            .take(self.params.max_iterations as usize)
        {
            if self
                .params
                .max_distance
                .is_some_and(|max| candidate.distance > max)
            {
                break;
            }
            tested += 1;
            last_distance = candidate.distance;
            if !is_blocked(&footprint.centered_at(candidate.center)) {
                return Ok(SpiralHit {
                    center: candidate.center,
                    iterations: tested,
                    distance: candidate.distance,
                });
            }
        }
        Err(SpiralExhausted {
            iterations: tested,
            distance: last_distance,
        })
    }
}
