//! Cloud widget.
//!
//! Draws every label of a [`TerminalSurface`] at its placement. Canvas
//! coordinates are floored to cells, which keeps non-overlapping rectangles
//! on disjoint cells.

use crate::view::styles::appearance;
use crate::view::surface::{Label, TerminalSurface};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::time::Duration;

/// Renders placed labels into the area they were laid out for.
#[derive(Debug, Clone, Copy)]
pub struct CloudWidget<'a> {
    surface: &'a TerminalSurface,
}

impl<'a> CloudWidget<'a> {
    /// Widget over `surface`, sampled at the surface's current time.
    pub fn new(surface: &'a TerminalSurface) -> Self {
        Self { surface }
    }
}

impl Widget for CloudWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let now = self.surface.now();
        for label in self.surface.labels() {
            render_label(label, now, area, buf);
        }
    }
}

fn render_label(label: &Label, now: Duration, area: Rect, buf: &mut Buffer) {
    let look = appearance(label.look.style, &label.transform_at(now));
    if !look.visible {
        return;
    }

    let placement = &label.placement;
    let left = (placement.center.x - placement.footprint.width / 2.0).floor() as i64;
    let top = (placement.center.y - placement.footprint.height / 2.0).floor() as i64;
    let x = i64::from(area.x) + left + i64::from(label.look.padding_x);
    let y = i64::from(area.y) + top + i64::from(label.look.padding_y) - look.rise;

    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if x >= area.right() || y < area.y || y >= area.bottom() || x < area.x {
        return;
    }
    let max_width = usize::from(area.right() - x);
    buf.set_stringn(x, y, placement.word.as_str(), max_width, look.style);
}
