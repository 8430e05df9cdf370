//! Animation descriptors for entrance and highlight effects.
//!
//! The engine only hands these to the label surface; sampling happens in
//! the presentation layer at render time.

use crate::model::Transform;
use std::f64::consts::PI;
use std::str::FromStr;
use std::time::Duration;

/// Transform field an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    /// [`Transform::zoom`]
    Zoom,
    /// [`Transform::offset_y`]
    OffsetY,
    /// [`Transform::tint`]
    Tint,
}

impl AnimatedProperty {
    /// Value of the property on an untransformed label.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Zoom | Self::Tint => 1.0,
            Self::OffsetY => 0.0,
        }
    }

    fn write(self, transform: &mut Transform, value: f64) {
        match self {
            Self::Zoom => transform.zoom = value,
            Self::OffsetY => transform.offset_y = value,
            Self::Tint => transform.tint = value,
        }
    }
}

/// Progress curve of one animation segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Decelerating quadratic.
    OutQuad,
    /// Overshoot with a decaying oscillation.
    OutElastic,
    /// Bounces against the target value.
    OutBounce,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => -t * (t - 2.0),
            Self::OutElastic => {
                if t >= 1.0 {
                    return 1.0;
                }
                let period = 0.3;
                let shift = period / 4.0;
                2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin() + 1.0
            }
            Self::OutBounce => out_bounce(t),
        }
    }
}

fn out_bounce(t: f64) -> f64 {
    const K: f64 = 7.5625;
    if t < 1.0 / 2.75 {
        K * t * t
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        K * t * t + 0.75
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        K * t * t + 0.9375
    } else {
        let t = t - 2.625 / 2.75;
        K * t * t + 0.984375
    }
}

/// One leg of an animation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Target value, or `None` to hold the current value.
    pub to: Option<f64>,
    /// Length of the segment.
    pub duration: Duration,
    /// Progress curve.
    pub easing: Easing,
}

impl Segment {
    /// Move to `to` over `duration`.
    pub fn to(to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            to: Some(to),
            duration,
            easing,
        }
    }

    /// Hold for `duration`.
    pub fn hold(duration: Duration) -> Self {
        Self {
            to: None,
            duration,
            easing: Easing::Linear,
        }
    }
}

/// A sequence of segments animating one transform property.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Property being animated.
    pub property: AnimatedProperty,
    /// Starting value; `None` starts from the property's rest value.
    pub from: Option<f64>,
    /// Segments played back to back.
    pub segments: Vec<Segment>,
}

impl Animation {
    /// Entrance effect: grow from nothing to full size.
    pub fn pop_in() -> Self {
        Self {
            property: AnimatedProperty::Zoom,
            from: Some(0.0),
            segments: vec![Segment::to(1.0, Duration::from_millis(500), Easing::OutQuad)],
        }
    }

    /// No movement: the property stays at its rest value.
    pub fn still() -> Self {
        Self {
            property: AnimatedProperty::Zoom,
            from: None,
            segments: Vec::new(),
        }
    }

    /// Highlight effect: elastic zoom pulse.
    pub fn zoom_pulse() -> Self {
        Self {
            property: AnimatedProperty::Zoom,
            from: None,
            segments: vec![
                Segment::to(1.1, Duration::from_millis(700), Easing::OutElastic),
                Segment::hold(Duration::from_millis(300)),
                Segment::to(1.0, Duration::from_millis(300), Easing::OutQuad),
            ],
        }
    }

    /// Highlight effect: jump up and bounce back.
    pub fn bounce() -> Self {
        Self {
            property: AnimatedProperty::OffsetY,
            from: None,
            segments: vec![
                Segment::to(25.0, Duration::from_millis(100), Easing::OutQuad),
                Segment::to(0.0, Duration::from_millis(500), Easing::OutBounce),
            ],
        }
    }

    /// Highlight effect: brighten and fade back.
    pub fn flash() -> Self {
        Self {
            property: AnimatedProperty::Tint,
            from: None,
            segments: vec![
                Segment::to(5.0, Duration::from_millis(100), Easing::OutQuad),
                Segment::to(1.0, Duration::from_millis(500), Easing::OutBounce),
            ],
        }
    }

    /// Total playback time.
    pub fn duration(&self) -> Duration {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Whether playback is over after `elapsed`.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration()
    }

    /// Property value after `elapsed` of playback.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let mut value = self.from.unwrap_or(self.property.rest_value());
        let mut remaining = elapsed;
        for segment in &self.segments {
            let target = segment.to.unwrap_or(value);
            if remaining >= segment.duration {
                value = target;
                remaining -= segment.duration;
                continue;
            }
            let t = remaining.as_secs_f64() / segment.duration.as_secs_f64();
            return value + (target - value) * segment.easing.apply(t);
        }
        value
    }

    /// Write the sampled value into `transform`.
    pub fn apply(&self, elapsed: Duration, transform: &mut Transform) {
        self.property.write(transform, self.sample(elapsed));
    }
}

/// Named highlight effects selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightEffect {
    /// [`Animation::zoom_pulse`]
    #[default]
    Zoom,
    /// [`Animation::bounce`]
    Bounce,
    /// [`Animation::flash`]
    Flash,
}

impl HighlightEffect {
    /// All accepted names, for CLI validation.
    pub const NAMES: [&'static str; 3] = ["zoom", "bounce", "flash"];

    /// The animation this effect plays.
    pub fn animation(self) -> Animation {
        match self {
            Self::Zoom => Animation::zoom_pulse(),
            Self::Bounce => Animation::bounce(),
            Self::Flash => Animation::flash(),
        }
    }

    /// Configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zoom => "zoom",
            Self::Bounce => "bounce",
            Self::Flash => "flash",
        }
    }
}

impl FromStr for HighlightEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zoom" => Ok(Self::Zoom),
            "bounce" => Ok(Self::Bounce),
            "flash" => Ok(Self::Flash),
            other => Err(format!(
                "unknown highlight effect {other:?} (expected one of {})",
                Self::NAMES.join(", ")
            )),
        }
    }
}
