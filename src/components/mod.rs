//! Reusable UI components.
//!
//! - `modal` - the newsletter modal controller and renderer
//! - `help_overlay` - the `?` keybinding overlay

pub mod help_overlay;
pub mod modal;

use ratatui::layout::Rect;

/// Center a box of the given size inside `parent`, clamped to fit.
pub(crate) fn centered_rect(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);
    let x = parent.x + (parent.width.saturating_sub(width)) / 2;
    let y = parent.y + (parent.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
