//! Help overlay component
//!
//! Displays the keybinding reference in a floating window.

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::theme::{Colors, Styles};

const BINDINGS: &[(&str, &str)] = &[
    ("Up/Down", "Scroll one row"),
    ("PgUp/PgDn", "Scroll one page"),
    ("Home/End", "Jump to top / bottom"),
    ("n", "Open the newsletter modal"),
    ("r", "Restart all animations"),
    ("?", "Toggle this help"),
    ("Esc", "Close modal / help"),
    ("q", "Quit"),
];

/// Help overlay component
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the help overlay centered over the page.
    pub fn render(f: &mut Frame) {
        let height = BINDINGS.len() as u16 + 6;
        let rect = centered_rect(f.area(), 44, height);

        f.render_widget(Clear, rect);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            "  statdeck help  ",
            Style::default()
                .fg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        for (key, description) in BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<10}", key),
                    Style::default()
                        .fg(Colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*description, Styles::text()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press ? or Esc to close",
            Styles::text_muted(),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Style::default().bg(Colors::BG_SECONDARY));

        f.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Left),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_cover_core_keys() {
        let keys: Vec<&str> = BINDINGS.iter().map(|(k, _)| *k).collect();
        assert!(keys.contains(&"q"));
        assert!(keys.contains(&"?"));
        assert!(keys.contains(&"r"));
        assert!(keys.contains(&"n"));
    }
}
