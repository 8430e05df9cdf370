//! Layout and timing constants for TUI rendering.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line below the cloud for pass progress and key hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Longest wait for terminal input before the next frame is drawn.
///
/// About 60 frames per second while animations play.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Vertical animation offset (canvas units) that moves a label by one row.
pub const OFFSET_PER_ROW: f64 = 12.5;

/// Labels zoomed below this factor are not drawn at all.
pub const MIN_VISIBLE_ZOOM: f64 = 0.5;

/// Zoom above which a label is drawn emphasised.
pub const EMPHASIS_ZOOM: f64 = 1.05;

/// Tint above which a label is drawn flashing.
pub const FLASH_TINT: f64 = 1.5;
