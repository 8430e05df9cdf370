//! Word cloud layout engine.
//!
//! Words are placed one per tick along an Archimedean spiral from the canvas
//! center, skipping any position whose rectangle would overlap a label that
//! is already placed. Once a pass is complete, a random label is highlighted
//! every so often.
//!
//! The engine is a pure core ([`model`], [`layout`], [`cloud`]) driven by a
//! virtual clock. Presentation is supplied through two narrow traits,
//! [`layout::FootprintProvider`] and [`layout::LabelSurface`]; [`view`]
//! implements them for a terminal.

pub mod cloud;
pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod view;

pub use cloud::{CloudEvent, ListenerId, WordCloud};

#[cfg(test)]
mod test_harness;
