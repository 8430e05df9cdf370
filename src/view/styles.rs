//! Label styling.
//!
//! Maps label options and animated transforms onto terminal styles.
//! Terminal cells cannot scale or tint, so zoom and tint become modifiers.

use crate::model::{LabelOptions, OptionValue, Transform};
use crate::view::constants::{EMPHASIS_ZOOM, FLASH_TINT, MIN_VISIBLE_ZOOM, OFFSET_PER_ROW};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use tracing::warn;

// ===== Base style =====

/// Style requested by a label's options.
///
/// Recognised keys: `color` and `background` (color names or `#rrggbb`),
/// `bold` (bool). Unknown colors are ignored with a warning.
pub fn label_style(options: &LabelOptions) -> Style {
    let mut style = Style::default();
    if let Some(color) = color_option(options, "color") {
        style = style.fg(color);
    }
    if let Some(color) = color_option(options, "background") {
        style = style.bg(color);
    }
    if matches!(options.get("bold"), Some(OptionValue::Bool(true))) {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

fn color_option(options: &LabelOptions, key: &str) -> Option<Color> {
    let text = options.get(key)?.as_text()?;
    match Color::from_str(text) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!(key, value = text, "Ignoring unknown color");
            None
        }
    }
}

// ===== Animated transform =====

/// How a label looks at one instant of its animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Whether the label is drawn at all.
    pub visible: bool,
    /// Rows to shift the label up.
    pub rise: i64,
    /// Final style.
    pub style: Style,
}

/// Combine a base style with an animated transform.
pub fn appearance(base: Style, transform: &Transform) -> Appearance {
    let mut style = base;
    if transform.zoom < 1.0 {
        style = style.add_modifier(Modifier::DIM);
    } else if transform.zoom > EMPHASIS_ZOOM {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if transform.tint > FLASH_TINT {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Appearance {
        visible: transform.zoom >= MIN_VISIBLE_ZOOM,
        rise: (transform.offset_y / OFFSET_PER_ROW).round() as i64,
        style,
    }
}
