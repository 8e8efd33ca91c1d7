//! Newsletter modal controller.
//!
//! Hidden at startup; opens from the nav action, closes on Esc or on a
//! mouse click outside the content box. The content rect is recorded at
//! render time so the outside-click hit test matches what is actually on
//! screen, padding included.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::page::ModalSpec;
use crate::theme::{Colors, Styles, UiConstants};

/// Open/close state plus the rendered content geometry.
#[derive(Debug, Default)]
pub struct ModalController {
    visible: bool,
    content_rect: Option<Rect>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.content_rect = None;
    }

    /// True when a click at (col, row) should dismiss the modal: it is
    /// visible, has been rendered at least once, and the click landed
    /// outside the content box.
    pub fn click_dismisses(&self, col: u16, row: u16) -> bool {
        if !self.visible {
            return false;
        }
        match self.content_rect {
            Some(rect) => !contains(rect, col, row),
            None => false,
        }
    }

    /// Render the modal over the page and record its content rect.
    pub fn render(&mut self, f: &mut Frame, spec: &ModalSpec, submitted: bool) {
        let area = f.area();
        let width = (area.width * UiConstants::MODAL_WIDTH_PCT / 100)
            .max(UiConstants::MODAL_MIN_WIDTH);
        let rect = centered_rect(area, width, UiConstants::MODAL_HEIGHT);
        self.content_rect = Some(rect);

        f.render_widget(Clear, rect);

        let block = Block::default()
            .title(format!(" {} ", spec.title))
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Style::default().bg(Colors::BG_SECONDARY));

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(""));
        for body_line in &spec.body {
            lines.push(Line::from(Span::styled(body_line.clone(), Styles::text())));
        }
        lines.push(Line::from(""));
        if submitted {
            lines.push(Line::from(Span::styled(
                "Subscribed - press Esc to close",
                Styles::success(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                spec.prompt.clone(),
                Styles::nav_hint(),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, rect);
    }
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
