//! Scrollable page body rendering.
//!
//! Walks the page layout and draws whatever falls inside the viewport:
//! section titles, plain text, headings, and stat counters (whose text the
//! counter engine rewrites every frame). Reveal styles translate elements
//! down and fade them toward the background while they animate in.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::animate::{RevealAnimator, RevealStyle};
use crate::page::{ElementId, ElementKind, Page};
use crate::theme::{fade, Colors, Styles};

/// Left margin for body content, in columns.
const BODY_INDENT: u16 = 2;

pub fn render(
    f: &mut Frame,
    area: Rect,
    page: &Page,
    reveals: &RevealAnimator,
    scroll_offset: usize,
) {
    if area.height == 0 || area.width <= BODY_INDENT {
        return;
    }
    let layout = page.layout();
    let scroll = scroll_offset as f64;

    // Section titles.
    for (index, section) in page.sections.iter().enumerate() {
        let Some(top) = layout.section_top(index) else {
            continue;
        };
        if let Some(y) = viewport_row(top - scroll, area) {
            draw_line(
                f,
                area,
                y,
                &section.title,
                Styles::section_title(),
            );
        }
    }

    // Elements, with reveal styling applied.
    let mut flat_index = 0usize;
    for section in &page.sections {
        for element in &section.elements {
            let id = ElementId(flat_index);
            flat_index += 1;
            if !element.visible {
                continue;
            }
            let Some((top, _bottom)) = layout.rect(id) else {
                continue;
            };

            let style = reveals.style(id).unwrap_or(RevealStyle {
                opacity: 1.0,
                translate_y: 0.0,
            });
            if style.opacity <= 0.0 {
                continue;
            }

            let row = top - scroll + style.translate_y;
            let Some(y) = viewport_row(row, area) else {
                continue;
            };

            let base = match element.kind {
                ElementKind::Heading => Styles::heading(),
                ElementKind::Stat => Styles::stat(),
                ElementKind::Text => Styles::text(),
            };
            let faded = apply_opacity(base, style.opacity);
            draw_line(f, area, y, &element.text, faded);
        }
    }
}

/// Map a viewport-relative row onto a drawable row inside `area`.
fn viewport_row(row: f64, area: Rect) -> Option<u16> {
    let row = row.round();
    if row < 0.0 || row >= f64::from(area.height) {
        return None;
    }
    Some(area.y + row as u16)
}

fn apply_opacity(style: Style, opacity: f64) -> Style {
    match style.fg {
        Some(color) => style.fg(fade(color, opacity)),
        None => style.fg(fade(Colors::FG_PRIMARY, opacity)),
    }
}

fn draw_line(f: &mut Frame, area: Rect, y: u16, text: &str, style: Style) {
    let width = area.width - BODY_INDENT;
    let shown: String = text.chars().take(width as usize).collect();
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(shown, style))),
        Rect::new(area.x + BODY_INDENT, y, width, 1),
    );
}
