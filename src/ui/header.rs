//! Title bar and navigation header rendering.
//!
//! The entrance sequencer supplies per-item opacity and slide offsets; the
//! fade ramp translates opacity into a color blend, and the slide offset
//! moves items down within the header rows while they settle.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::animate::EntranceSequencer;
use crate::page::Page;
use crate::theme::{fade, Colors, Styles};

/// Column gap between nav items.
const ITEM_GAP: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, page: &Page, entrance: &EntranceSequencer, now_ms: f64) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Styles::border_inactive());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    // Title row fades with the bar itself.
    let bar_opacity = entrance.bar_opacity(now_ms);
    let title_style = Style::default()
        .fg(fade(Colors::PRIMARY, bar_opacity))
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", page.title),
            title_style,
        ))),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    // Nav items slide up into the row under the title.
    let nav_base_y = inner.y + 1;
    let mut x = inner.x + 1;
    for (index, item) in page.nav.iter().enumerate() {
        let label = if item.opens_modal {
            format!("[{}]", item.label)
        } else {
            item.label.clone()
        };
        let width = label.len() as u16;
        if x + width > inner.x + inner.width {
            break;
        }

        let style = entrance.item_style(index, now_ms);
        let opacity = bar_opacity * style.opacity;
        let y = nav_base_y + style.translate_y.round() as u16;
        // Items mid-slide may briefly sit below the header; clip them.
        if y < area.y + area.height && opacity > 0.0 {
            let color = if item.opens_modal {
                fade(Colors::SECONDARY, opacity)
            } else {
                fade(Colors::FG_PRIMARY, opacity)
            };
            f.render_widget(
                Paragraph::new(Span::styled(label, Style::default().fg(color))),
                Rect::new(x, y, width, 1),
            );
        }
        x += width + ITEM_GAP;
    }
}
