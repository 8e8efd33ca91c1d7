//! User interface rendering module
//!
//! Organized into submodules:
//! - `header` - title bar and entrance-animated navigation
//! - `sections` - the scrollable page body (reveals, counters)
//!
//! Overlays (modal, help) render on top of this and live in `components`.

mod header;
mod sections;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::animate::{EntranceSequencer, RevealAnimator};
use crate::page::Page;
use crate::theme::{Colors, Styles, UiConstants};

/// Stateless page renderer; overlays are drawn by the app afterwards.
pub struct UiRenderer;

impl UiRenderer {
    /// Render header, body, and status bar.
    pub fn render(
        f: &mut Frame,
        page: &Page,
        entrance: &EntranceSequencer,
        reveals: &RevealAnimator,
        scroll_offset: usize,
        status: &str,
        now_ms: f64,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
            ])
            .split(f.area());

        // Page background.
        f.render_widget(
            ratatui::widgets::Block::default().style(Style::default().bg(Colors::BG_PRIMARY)),
            f.area(),
        );

        header::render(f, chunks[0], page, entrance, now_ms);
        sections::render(f, chunks[1], page, reveals, scroll_offset);
        render_status_bar(f, chunks[2], status);
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, status: &str) {
    let hint = "? help | q quit";
    let pad = (area.width as usize)
        .saturating_sub(status.len() + hint.len() + 2)
        .max(1);
    let line = Line::from(vec![
        Span::styled(format!(" {}", status), Styles::text_muted()),
        Span::raw(" ".repeat(pad)),
        Span::styled(hint, Styles::nav_hint()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
