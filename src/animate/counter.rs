//! Progressive counter animation engine.
//!
//! Discovers stat elements marked as counters, watches for them entering the
//! viewport, and animates their displayed value from zero to a target with a
//! quartic ease-out, formatting large magnitudes with K/M suffixes.
//!
//! The engine is an explicit instance object: it owns its tracked set and its
//! watcher registrations, and is advanced by the application's per-frame
//! driver ([`CounterAnimator::on_frame`]). There is no global state, and no
//! operation here returns an error: counters are decorative, so every
//! failure (unparseable target, missing element, malformed attribute)
//! degrades to "do nothing" for that element without disturbing the others.
//!
//! # Lifecycle
//!
//! ```text
//! bind -> start_watching -> (notify_scroll/notify_resize)* -> on_frame ...
//!                                                      reset -> bind -> ...
//! ```
//!
//! A launched interpolation (a "flight") lives outside the tracked set:
//! `reset()` empties the set and restores original text, but an in-flight
//! interpolation keeps running and its final exact write can land after the
//! reset. That race mirrors the frame-callback chain it models and is
//! covered by tests rather than papered over.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animate::easing::ease_out_quart;
use crate::page::{Element, ElementId, Page, PageLayout, Viewport};

/// Counter engine configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Default animation length in milliseconds.
    pub duration_ms: u64,
    /// Rows shaved off the top and bottom viewport edges before the
    /// intersection test; an element must overlap the shrunk band to trigger.
    pub trigger_offset: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            trigger_offset: 100.0,
        }
    }
}

/// One entry in the tracked set.
#[derive(Debug)]
struct Tracked {
    element: ElementId,
    /// Set once per viewport-entry cycle; cleared only by `reset`.
    animated: bool,
}

/// An in-flight interpolation, advanced once per frame until completion.
#[derive(Debug)]
struct Flight {
    element: ElementId,
    start_ms: f64,
    target: f64,
    decimals: usize,
    duration_ms: u64,
}

/// One scroll+resize registration made by `start_watching`.
///
/// Registrations stack: calling `start_watching` twice without an
/// intervening `stop_watching` leaves two live registrations, matching the
/// explicit caller contract that duplicate-protection is not provided here.
#[derive(Debug)]
struct Watcher;

/// Scroll-triggered counter animator.
pub struct CounterAnimator {
    config: CounterConfig,
    tracked: Vec<Tracked>,
    flights: Vec<Flight>,
    watchers: Vec<Watcher>,
    /// Leading-edge throttle: set by scroll/resize notifications, consumed
    /// by the next frame so event bursts coalesce into one check per frame.
    check_queued: bool,
}

impl CounterAnimator {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            tracked: Vec::new(),
            flights: Vec::new(),
            watchers: Vec::new(),
            check_queued: false,
        }
    }

    /// A copy of the current configuration, not a live reference.
    pub fn config(&self) -> CounterConfig {
        self.config
    }

    /// Scan the page for counter-marked elements and track them.
    ///
    /// Captures each element's original text exactly once: a second `bind`
    /// without an intervening `reset` neither overwrites the captured text
    /// nor duplicates the tracked entry.
    pub fn bind(&mut self, page: &mut Page) {
        let ids: Vec<ElementId> = page
            .elements()
            .filter(|(_, e)| e.counter)
            .map(|(id, _)| id)
            .collect();

        for id in ids {
            if let Some(element) = page.element_mut(id) {
                if element.captured_original.is_none() {
                    element.captured_original = Some(element.text.clone());
                }
            }
            if !self.tracked.iter().any(|t| t.element == id) {
                self.tracked.push(Tracked {
                    element: id,
                    animated: false,
                });
            }
        }
        debug!(tracked = self.tracked.len(), "bound counter elements");
    }

    /// Register scroll and resize watchers. No-op when nothing is tracked.
    pub fn start_watching(&mut self) {
        if self.tracked.is_empty() {
            return;
        }
        self.watchers.push(Watcher);
    }

    /// Remove the registration made by the most recent `start_watching`.
    pub fn stop_watching(&mut self) {
        self.watchers.pop();
    }

    /// Scroll event entry point. Queues at most one visibility check.
    pub fn notify_scroll(&mut self) {
        self.request_check();
    }

    /// Resize event entry point. Queues at most one visibility check.
    pub fn notify_resize(&mut self) {
        self.request_check();
    }

    fn request_check(&mut self) {
        if self.watchers.is_empty() {
            return;
        }
        self.check_queued = true;
    }

    /// Check every un-animated tracked element against the viewport band and
    /// launch interpolations for those that entered it.
    ///
    /// The flag flips before the launch attempt, so an element whose target
    /// turns out to be unparseable still consumes its one trigger (and stays
    /// visually untouched).
    pub fn check_and_animate(
        &mut self,
        page: &mut Page,
        layout: &PageLayout,
        view: Viewport,
        now_ms: f64,
    ) {
        // Snapshot: launching mutates flights, never the tracked set, but
        // iterating a snapshot keeps the set safe from mutate-during-iterate
        // if a launch path ever grows one.
        let pending: Vec<ElementId> = self
            .tracked
            .iter()
            .filter(|t| !t.animated)
            .map(|t| t.element)
            .collect();

        for id in pending {
            let Some(rect) = layout.rect(id) else {
                continue;
            };
            if !in_trigger_band(rect, view, self.config.trigger_offset) {
                continue;
            }
            if let Some(entry) = self.tracked.iter_mut().find(|t| t.element == id) {
                entry.animated = true;
            }
            self.launch(page, id, now_ms);
        }
    }

    /// Launch the interpolation for one element regardless of its flag
    /// state. Requires a finite target; aborts silently otherwise.
    pub fn animate_one(&mut self, page: &Page, id: ElementId, now_ms: f64) {
        self.launch(page, id, now_ms);
    }

    /// Programmatic trigger by element name: binds the element if needed,
    /// clears its flag, and launches. Silent no-op when the name does not
    /// resolve or the element is not marked as a counter.
    pub fn animate_counter(&mut self, page: &mut Page, name: &str, now_ms: f64) {
        let Some(id) = page.find(name) else {
            return;
        };
        let Some(element) = page.element_mut(id) else {
            return;
        };
        if !element.counter {
            return;
        }
        if element.captured_original.is_none() {
            element.captured_original = Some(element.text.clone());
        }
        match self.tracked.iter_mut().find(|t| t.element == id) {
            Some(entry) => entry.animated = false,
            None => self.tracked.push(Tracked {
                element: id,
                animated: false,
            }),
        }
        self.launch(page, id, now_ms);
    }

    fn launch(&mut self, page: &Page, id: ElementId, now_ms: f64) {
        let Some(element) = page.element(id) else {
            return;
        };
        let Some(target) = resolve_target(element) else {
            debug!(element = id.0, "counter target not parseable, skipping");
            return;
        };
        let decimals = resolve_decimals(element, target);
        let duration_ms = resolve_duration(element, self.config.duration_ms);

        self.flights.push(Flight {
            element: id,
            start_ms: now_ms,
            target,
            decimals,
            duration_ms,
        });
        debug!(element = id.0, value = target, decimals, duration_ms, "counter launched");
    }

    /// Per-frame driver: runs the queued visibility check, then advances
    /// every in-flight interpolation by one step.
    pub fn on_frame(&mut self, page: &mut Page, layout: &PageLayout, view: Viewport, now_ms: f64) {
        if self.check_queued {
            self.check_queued = false;
            self.check_and_animate(page, layout, view, now_ms);
        }

        let mut i = 0;
        while i < self.flights.len() {
            let flight = &self.flights[i];
            let progress =
                ((now_ms - flight.start_ms) / flight.duration_ms as f64).clamp(0.0, 1.0);

            if progress < 1.0 {
                let eased = ease_out_quart(progress);
                let raw = flight.target * eased;
                // Floor (not round) for integer counters so the displayed
                // value never shows the target before progress reaches 1.
                let display = if flight.decimals > 0 {
                    round_to(raw, flight.decimals)
                } else {
                    raw.floor()
                };
                let text = format_value(display, flight.decimals);
                page.set_text(flight.element, text);
                i += 1;
            } else {
                // Final write is the exact formatted target, immune to any
                // floating-point drift accumulated along the way.
                let flight = self.flights.remove(i);
                page.set_text(flight.element, format_value(flight.target, flight.decimals));
            }
        }
    }

    /// Restore originals, clear flags, and empty the tracked set.
    ///
    /// In-flight interpolations are NOT cancelled: an already-launched
    /// flight runs to completion and its final write can overwrite the
    /// restored text. Watchers are untouched.
    pub fn reset(&mut self, page: &mut Page) {
        for entry in &self.tracked {
            let original = page
                .element(entry.element)
                .and_then(|e| e.captured_original.clone());
            if let Some(original) = original {
                page.set_text(entry.element, original);
            }
        }
        self.tracked.clear();
    }

    /// Full restart: drop all watchers, reset, rebind, re-watch, and run the
    /// eager visibility check so already-visible counters animate without
    /// waiting for a scroll event.
    pub fn restart(&mut self, page: &mut Page, layout: &PageLayout, view: Viewport, now_ms: f64) {
        self.watchers.clear();
        self.check_queued = false;
        self.reset(page);
        self.bind(page);
        if self.tracked.is_empty() {
            return;
        }
        self.watchers.push(Watcher);
        self.check_and_animate(page, layout, view, now_ms);
    }

    /// Number of tracked elements.
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Whether the given element's one-shot flag has been consumed.
    pub fn is_animated(&self, id: ElementId) -> bool {
        self.tracked
            .iter()
            .any(|t| t.element == id && t.animated)
    }

    /// Number of interpolations currently in flight.
    pub fn active_flights(&self) -> usize {
        self.flights.len()
    }

    /// Number of live watcher registrations.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }
}

/// Viewport band test: the element's box must overlap the viewport shrunk by
/// `offset` rows on both the top and bottom edges.
fn in_trigger_band(rect: (f64, f64), view: Viewport, offset: f64) -> bool {
    let (top, bottom) = view.relative(rect);
    top <= view.height - offset && bottom >= offset
}

/// Resolve an element's target value: explicit attribute first, then the
/// displayed text. `None` means the counter is skipped entirely.
fn resolve_target(element: &Element) -> Option<f64> {
    element
        .counter_value
        .as_deref()
        .and_then(extract_numeric)
        .or_else(|| extract_numeric(&element.text))
}

/// Extract the first signed or unsigned decimal number from a string.
///
/// Whitespace is stripped and comma decimal separators are normalized to a
/// period before scanning, so "1 234,5" parses as 1234.5.
pub fn extract_numeric(source: &str) -> Option<f64> {
    let normalized: String = source
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let bytes = normalized.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let starts_number = bytes[i].is_ascii_digit()
            || (bytes[i] == b'-' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit());
        if !starts_number {
            i += 1;
            continue;
        }

        let start = i;
        if bytes[i] == b'-' {
            i += 1;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        return normalized[start..i].parse::<f64>().ok().filter(|v| v.is_finite());
    }
    None
}

/// Resolve decimal places: explicit attribute wins (malformed or negative
/// collapses to 0), else the fractional digits of the source string, else
/// the fractional digits of the target itself.
fn resolve_decimals(element: &Element, target: f64) -> usize {
    if let Some(attr) = &element.counter_decimals {
        return parse_int_prefix(attr)
            .filter(|v| *v >= 0)
            .map(|v| v as usize)
            .unwrap_or(0);
    }

    let source = element
        .counter_value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&element.text);
    if let Some(count) = fractional_digits_in(source) {
        return count;
    }

    let rendered = format!("{}", target);
    rendered.split('.').nth(1).map(|d| d.len()).unwrap_or(0)
}

/// Per-element duration override; zero, negative, or malformed values fall
/// back to the configured default.
fn resolve_duration(element: &Element, default_ms: u64) -> u64 {
    element
        .counter_duration
        .as_deref()
        .and_then(parse_int_prefix)
        .filter(|v| *v > 0)
        .map(|v| v as u64)
        .unwrap_or(default_ms)
}

/// Digits following the first `.` or `,` that has at least one digit after
/// it, e.g. "45,5%" -> 1 and "1.25s" -> 2.
fn fractional_digits_in(source: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    for i in 0..bytes.len() {
        if (bytes[i] == b'.' || bytes[i] == b',')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_digit()
        {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            return Some(j - i - 1);
        }
    }
    None
}

/// Leading-integer parse: optional sign plus digit prefix, ignoring any
/// trailing garbage ("250ms" -> 250). `None` when no digits lead.
fn parse_int_prefix(source: &str) -> Option<i64> {
    let s = source.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut sign = 1i64;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        if bytes[i] == b'-' {
            sign = -1;
        }
        i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return None;
    }
    s[start..i].parse::<i64>().ok().map(|v| sign * v)
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a value for display: >= 1,000,000 as "x.yM", >= 1,000 as "xK",
/// otherwise fixed decimals or a rounded integer.
///
/// Suffix formatting takes precedence over `decimals`: 1500 with two
/// decimal places still renders "2K", never "1500.00".
pub fn format_value(value: f64, decimals: usize) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else if decimals > 0 {
        format!("{:.*}", decimals, value)
    } else {
        format!("{}", value.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numeric_basics() {
        assert_eq!(extract_numeric("1234"), Some(1234.0));
        assert_eq!(extract_numeric("  42 users"), Some(42.0));
        assert_eq!(extract_numeric("-3.5"), Some(-3.5));
        assert_eq!(extract_numeric("no digits"), None);
        assert_eq!(extract_numeric(""), None);
    }

    #[test]
    fn test_extract_numeric_normalizes_commas_and_whitespace() {
        assert_eq!(extract_numeric("45,5"), Some(45.5));
        assert_eq!(extract_numeric("1 234,5"), Some(1234.5));
    }

    #[test]
    fn test_extract_numeric_takes_first_number() {
        assert_eq!(extract_numeric("10 out of 20"), Some(10.0));
        assert_eq!(extract_numeric("v1.2.3"), Some(1.2));
    }

    #[test]
    fn test_extract_numeric_sign_handling() {
        assert_eq!(extract_numeric("--5"), Some(-5.0));
        assert_eq!(extract_numeric("+7"), Some(7.0));
        assert_eq!(extract_numeric("-"), None);
    }

    #[test]
    fn test_format_value_boundaries() {
        assert_eq!(format_value(999.0, 0), "999");
        assert_eq!(format_value(1000.0, 0), "1K");
        assert_eq!(format_value(999_999.0, 0), "1000K");
        assert_eq!(format_value(1_000_000.0, 0), "1.0M");
    }

    #[test]
    fn test_format_value_suffix_beats_decimals() {
        assert_eq!(format_value(1500.0, 2), "2K");
    }

    #[test]
    fn test_format_value_decimals_and_negatives() {
        assert_eq!(format_value(45.5, 1), "45.5");
        assert_eq!(format_value(12.345, 2), "12.35");
        // Signed comparison: negative magnitudes never take a suffix.
        assert_eq!(format_value(-2500.0, 0), "-2500");
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("250"), Some(250));
        assert_eq!(parse_int_prefix(" 250ms"), Some(250));
        assert_eq!(parse_int_prefix("-12"), Some(-12));
        assert_eq!(parse_int_prefix("2.7"), Some(2));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn test_fractional_digits_in() {
        assert_eq!(fractional_digits_in("45,5%"), Some(1));
        assert_eq!(fractional_digits_in("1.25s"), Some(2));
        assert_eq!(fractional_digits_in("1000"), None);
        assert_eq!(fractional_digits_in("trailing dot."), None);
    }

    #[test]
    fn test_resolve_decimals_priority() {
        let mut element = Element::stat("99,95%");
        // Inferred from the text's fractional digits.
        assert_eq!(resolve_decimals(&element, 99.95), 2);

        // Explicit attribute wins.
        element.counter_decimals = Some("1".to_string());
        assert_eq!(resolve_decimals(&element, 99.95), 1);

        // Malformed attribute collapses to zero, not to the inferred count.
        element.counter_decimals = Some("many".to_string());
        assert_eq!(resolve_decimals(&element, 99.95), 0);
    }

    #[test]
    fn test_resolve_decimals_from_target_fraction() {
        let mut element = Element::stat("count");
        element.counter_value = Some("7.25".to_string());
        assert_eq!(resolve_decimals(&element, 7.25), 2);

        let mut whole = Element::stat("count");
        whole.counter_value = Some("7".to_string());
        assert_eq!(resolve_decimals(&whole, 7.0), 0);
    }

    #[test]
    fn test_resolve_duration_fallbacks() {
        let mut element = Element::stat("5");
        assert_eq!(resolve_duration(&element, 2000), 2000);

        element.counter_duration = Some("750".to_string());
        assert_eq!(resolve_duration(&element, 2000), 750);

        element.counter_duration = Some("0".to_string());
        assert_eq!(resolve_duration(&element, 2000), 2000);

        element.counter_duration = Some("soon".to_string());
        assert_eq!(resolve_duration(&element, 2000), 2000);
    }

    #[test]
    fn test_trigger_band_edges() {
        let view = Viewport::new(50.0, 0.0);
        // Band is [10, 40] with a 10-row offset.
        assert!(in_trigger_band((39.0, 41.0), view, 10.0));
        assert!(in_trigger_band((40.0, 42.0), view, 10.0));
        assert!(!in_trigger_band((41.0, 43.0), view, 10.0));
        assert!(in_trigger_band((8.0, 10.0), view, 10.0));
        assert!(!in_trigger_band((7.0, 9.0), view, 10.0));
    }

    #[test]
    fn test_config_returns_copy() {
        let animator = CounterAnimator::new(CounterConfig::default());
        let mut copy = animator.config();
        copy.duration_ms = 1;
        assert_eq!(animator.config().duration_ms, 2000);
    }
}
