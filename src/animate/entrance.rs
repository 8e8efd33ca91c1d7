//! Staggered entrance sequence for the navigation header.
//!
//! On startup (and whenever the terminal grows past the width threshold) the
//! header bar fades in, then each nav item slides up into place with a fixed
//! per-item delay. Items are ordered by their `order` attribute; items
//! without one (or with an unparseable one) sort last, in document order.
//!
//! Narrow terminals skip the sequence entirely (everything renders fully
//! shown), mirroring how the effect is a wide-layout nicety, not content.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animate::easing::Easing;
use crate::page::Page;

/// Order key assigned to nav items with a missing or unusable `order`.
const UNORDERED: i64 = 999;

/// Entrance sequence configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Header bar fade-in length in milliseconds.
    pub fade_duration_ms: u64,
    /// Delay between successive nav items.
    pub stagger_delay_ms: u64,
    /// Rows each item slides up from.
    pub slide_rows: f64,
    /// Per-item animation length.
    pub item_duration_ms: u64,
    /// Minimum terminal width for the sequence to run at all.
    pub min_cols: u16,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: 150,
            stagger_delay_ms: 25,
            slide_rows: 2.0,
            item_duration_ms: 250,
            min_cols: 80,
        }
    }
}

/// Render-facing style for one nav item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    pub opacity: f64,
    pub translate_y: f64,
}

impl ItemStyle {
    const SHOWN: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
    };
}

#[derive(Debug)]
struct ScheduledItem {
    nav_index: usize,
    /// Start time relative to the beginning of the sequence.
    start_at_ms: f64,
}

/// Timeline driver for the header entrance.
pub struct EntranceSequencer {
    config: EntranceConfig,
    schedule: Vec<ScheduledItem>,
    begun_ms: Option<f64>,
    enabled: bool,
}

impl EntranceSequencer {
    pub fn new(config: EntranceConfig) -> Self {
        Self {
            config,
            schedule: Vec::new(),
            begun_ms: None,
            enabled: false,
        }
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> EntranceConfig {
        self.config
    }

    /// Build the timeline and start it at `now_ms`.
    ///
    /// Below the width threshold the sequence is disabled and every style
    /// query reports fully shown.
    pub fn init(&mut self, page: &Page, cols: u16, now_ms: f64) {
        self.schedule.clear();
        if cols < self.config.min_cols {
            self.enabled = false;
            self.begun_ms = None;
            debug!(cols, "terminal too narrow, entrance sequence skipped");
            return;
        }

        let mut indices: Vec<usize> = (0..page.nav.len()).collect();
        indices.sort_by_key(|&i| order_key(page.nav[i].order.as_deref()));

        let base = self.config.fade_duration_ms as f64 / 2.0;
        self.schedule = indices
            .into_iter()
            .enumerate()
            .map(|(position, nav_index)| ScheduledItem {
                nav_index,
                start_at_ms: base + position as f64 * self.config.stagger_delay_ms as f64,
            })
            .collect();
        self.enabled = true;
        self.begun_ms = Some(now_ms);
        debug!(items = self.schedule.len(), "entrance sequence started");
    }

    /// Whether the sequence runs at the given width; used by the resize
    /// handler to detect threshold crossings.
    pub fn wide_enough(&self, cols: u16) -> bool {
        cols >= self.config.min_cols
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Header bar fade progress at `now_ms`.
    pub fn bar_opacity(&self, now_ms: f64) -> f64 {
        let Some(begun) = self.begun_ms else {
            return 1.0;
        };
        if !self.enabled {
            return 1.0;
        }
        ((now_ms - begun) / self.config.fade_duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Style for a nav item at `now_ms`.
    pub fn item_style(&self, nav_index: usize, now_ms: f64) -> ItemStyle {
        if !self.enabled {
            return ItemStyle::SHOWN;
        }
        let Some(begun) = self.begun_ms else {
            return ItemStyle::SHOWN;
        };
        let Some(item) = self.schedule.iter().find(|s| s.nav_index == nav_index) else {
            return ItemStyle::SHOWN;
        };

        let local = now_ms - begun - item.start_at_ms;
        let t = (local / self.config.item_duration_ms as f64).clamp(0.0, 1.0);
        let eased = Easing::Power1Out.apply(t);
        ItemStyle {
            opacity: eased,
            translate_y: self.config.slide_rows * (1.0 - eased),
        }
    }

    /// True once the bar and every item have finished animating.
    pub fn is_complete(&self, now_ms: f64) -> bool {
        if !self.enabled {
            return true;
        }
        let Some(begun) = self.begun_ms else {
            return true;
        };
        let last_end = self
            .schedule
            .iter()
            .map(|s| s.start_at_ms + self.config.item_duration_ms as f64)
            .fold(self.config.fade_duration_ms as f64, f64::max);
        now_ms - begun >= last_end
    }

    /// Nav indices in animation order, earliest first.
    pub fn animation_order(&self) -> Vec<usize> {
        self.schedule.iter().map(|s| s.nav_index).collect()
    }
}

/// Order attribute parse: leading integer, where missing, malformed, or
/// zero all sort last.
fn order_key(attr: Option<&str>) -> i64 {
    let Some(attr) = attr else {
        return UNORDERED;
    };
    let s = attr.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return UNORDERED;
    }
    match s[..i].parse::<i64>() {
        Ok(0) | Err(_) => UNORDERED,
        Ok(v) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::NavItem;

    fn nav(label: &str, order: Option<&str>) -> NavItem {
        NavItem {
            label: label.to_string(),
            order: order.map(String::from),
            opens_modal: false,
        }
    }

    fn page_with_nav(items: Vec<NavItem>) -> Page {
        let mut page = Page::default();
        page.title = "t".to_string();
        page.nav = items;
        page
    }

    #[test]
    fn test_order_key_fallbacks() {
        assert_eq!(order_key(Some("3")), 3);
        assert_eq!(order_key(Some(" 12th ")), 12);
        assert_eq!(order_key(Some("first")), UNORDERED);
        assert_eq!(order_key(Some("0")), UNORDERED);
        assert_eq!(order_key(None), UNORDERED);
    }

    #[test]
    fn test_animation_order_sorts_by_attribute() {
        let page = page_with_nav(vec![
            nav("b", Some("2")),
            nav("unordered", None),
            nav("a", Some("1")),
        ]);
        let mut seq = EntranceSequencer::new(EntranceConfig::default());
        seq.init(&page, 120, 0.0);
        assert_eq!(seq.animation_order(), vec![2, 0, 1]);
    }

    #[test]
    fn test_unordered_items_keep_document_order() {
        let page = page_with_nav(vec![
            nav("x", None),
            nav("y", Some("junk")),
            nav("z", None),
        ]);
        let mut seq = EntranceSequencer::new(EntranceConfig::default());
        seq.init(&page, 120, 0.0);
        assert_eq!(seq.animation_order(), vec![0, 1, 2]);
    }

    #[test]
    fn test_narrow_terminal_skips_sequence() {
        let page = page_with_nav(vec![nav("a", Some("1"))]);
        let mut seq = EntranceSequencer::new(EntranceConfig::default());
        seq.init(&page, 40, 0.0);
        assert!(!seq.enabled());
        assert_eq!(seq.item_style(0, 0.0), ItemStyle::SHOWN);
        assert_eq!(seq.bar_opacity(0.0), 1.0);
        assert!(seq.is_complete(0.0));
    }

    #[test]
    fn test_stagger_timing() {
        let page = page_with_nav(vec![nav("a", Some("1")), nav("b", Some("2"))]);
        let config = EntranceConfig::default();
        let mut seq = EntranceSequencer::new(config);
        seq.init(&page, 120, 1000.0);

        // At start: bar transparent, items not yet moving.
        assert_eq!(seq.bar_opacity(1000.0), 0.0);
        assert_eq!(seq.item_style(0, 1000.0).opacity, 0.0);

        // First item begins at fade/2; second a stagger later.
        let first_start = 1000.0 + config.fade_duration_ms as f64 / 2.0;
        let second_start = first_start + config.stagger_delay_ms as f64;
        assert!(seq.item_style(0, first_start + 50.0).opacity > 0.0);
        assert_eq!(seq.item_style(1, second_start).opacity, 0.0);
        assert!(seq.item_style(1, second_start + 50.0).opacity > 0.0);

        // Everything settles.
        assert!(seq.is_complete(2000.0));
        assert_eq!(seq.item_style(1, 2000.0), ItemStyle::SHOWN);
    }
}
