//! Scroll-triggered reveal engine.
//!
//! Elements carrying the reveal marker start transparent and offset
//! downward, then ease into place once they scroll past their trigger
//! position. Each element resolves its own offset/duration/delay/ease/start
//! configuration from raw attributes at rebuild time, with defaults for
//! anything absent or malformed.
//!
//! Unlike counters this engine re-evaluates trigger positions every frame;
//! it owns its own scheduling and shares no state with the counter animator.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animate::easing::Easing;
use crate::page::{ElementId, Page, PageLayout, Viewport};

/// Defaults applied when an element omits or mangles a reveal attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealDefaults {
    /// Initial downward offset in rows.
    pub offset_rows: f64,
    /// Animation duration in milliseconds.
    pub duration_ms: u64,
    /// Delay before the animation starts once triggered.
    pub delay_ms: u64,
    /// Named easing curve.
    pub ease: String,
    /// Fraction of the viewport height the element's top must pass to
    /// trigger (the "top 80%" notation).
    pub start_pct: f64,
    /// Whether reveals fire once or re-arm when scrolled back out.
    pub once: bool,
}

impl Default for RevealDefaults {
    fn default() -> Self {
        Self {
            offset_rows: 4.0,
            duration_ms: 800,
            delay_ms: 0,
            ease: Easing::default().to_string(),
            start_pct: 0.8,
            once: true,
        }
    }
}

/// Fully-resolved per-element reveal settings.
#[derive(Debug, Clone)]
struct RevealSpec {
    offset: f64,
    duration_ms: u64,
    delay_ms: u64,
    ease: Easing,
    start_pct: f64,
    once: bool,
}

/// Render-facing output of the engine for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0.0 = invisible, 1.0 = fully shown.
    pub opacity: f64,
    /// Downward displacement in rows.
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy)]
enum RevealPhase {
    Hidden,
    Delayed { since_ms: f64 },
    Running { start_ms: f64 },
    Shown,
}

struct RevealEntry {
    element: ElementId,
    spec: RevealSpec,
    phase: RevealPhase,
    style: RevealStyle,
}

/// Scroll-position-driven opacity/translate reveal animator.
pub struct RevealAnimator {
    defaults: RevealDefaults,
    entries: Vec<RevealEntry>,
}

impl RevealAnimator {
    pub fn new(defaults: RevealDefaults) -> Self {
        Self {
            defaults,
            entries: Vec::new(),
        }
    }

    /// Drop all entries and re-scan the page for reveal-marked elements.
    pub fn rebuild(&mut self, page: &Page) {
        self.entries.clear();
        for (id, element) in page.elements() {
            if !element.reveal {
                continue;
            }
            let spec = RevealSpec {
                offset: element
                    .reveal_offset
                    .as_deref()
                    .and_then(parse_float_prefix)
                    .filter(|v| *v != 0.0)
                    .unwrap_or(self.defaults.offset_rows),
                duration_ms: element
                    .reveal_duration
                    .as_deref()
                    .and_then(parse_float_prefix)
                    .filter(|v| *v > 0.0)
                    .map(|v| v as u64)
                    .unwrap_or(self.defaults.duration_ms),
                delay_ms: element
                    .reveal_delay
                    .as_deref()
                    .and_then(parse_float_prefix)
                    .filter(|v| *v > 0.0)
                    .map(|v| v as u64)
                    .unwrap_or(self.defaults.delay_ms),
                ease: element
                    .reveal_ease
                    .as_deref()
                    .map(Easing::parse_or_default)
                    .unwrap_or_else(|| Easing::parse_or_default(&self.defaults.ease)),
                start_pct: element
                    .reveal_start
                    .as_deref()
                    .and_then(parse_start_pct)
                    .unwrap_or(self.defaults.start_pct),
                // Only the literal "false" re-arms; anything else is one-shot.
                once: element
                    .reveal_once
                    .as_deref()
                    .map(|v| v.trim() != "false")
                    .unwrap_or(self.defaults.once),
            };
            let style = RevealStyle {
                opacity: 0.0,
                translate_y: spec.offset,
            };
            self.entries.push(RevealEntry {
                element: id,
                spec,
                phase: RevealPhase::Hidden,
                style,
            });
        }
        debug!(entries = self.entries.len(), "rebuilt reveal entries");
    }

    /// Advance every entry's state machine and cache its render style.
    pub fn on_frame(&mut self, layout: &PageLayout, view: Viewport, now_ms: f64) {
        for entry in &mut self.entries {
            let triggered = layout
                .rect(entry.element)
                .map(|rect| view.relative(rect).0 <= view.height * entry.spec.start_pct)
                .unwrap_or(false);

            entry.phase = match entry.phase {
                RevealPhase::Hidden => {
                    if triggered {
                        if entry.spec.delay_ms > 0 {
                            RevealPhase::Delayed { since_ms: now_ms }
                        } else {
                            RevealPhase::Running { start_ms: now_ms }
                        }
                    } else {
                        RevealPhase::Hidden
                    }
                }
                RevealPhase::Delayed { since_ms } => {
                    if !triggered && !entry.spec.once {
                        RevealPhase::Hidden
                    } else if now_ms - since_ms >= entry.spec.delay_ms as f64 {
                        RevealPhase::Running { start_ms: now_ms }
                    } else {
                        RevealPhase::Delayed { since_ms }
                    }
                }
                RevealPhase::Running { start_ms } => {
                    if now_ms - start_ms >= entry.spec.duration_ms as f64 {
                        RevealPhase::Shown
                    } else {
                        RevealPhase::Running { start_ms }
                    }
                }
                RevealPhase::Shown => {
                    if !entry.spec.once && !triggered {
                        RevealPhase::Hidden
                    } else {
                        RevealPhase::Shown
                    }
                }
            };

            entry.style = match entry.phase {
                RevealPhase::Hidden | RevealPhase::Delayed { .. } => RevealStyle {
                    opacity: 0.0,
                    translate_y: entry.spec.offset,
                },
                RevealPhase::Running { start_ms } => {
                    let t = ((now_ms - start_ms) / entry.spec.duration_ms as f64).clamp(0.0, 1.0);
                    let eased = entry.spec.ease.apply(t);
                    RevealStyle {
                        opacity: eased,
                        translate_y: entry.spec.offset * (1.0 - eased),
                    }
                }
                RevealPhase::Shown => RevealStyle {
                    opacity: 1.0,
                    translate_y: 0.0,
                },
            };
        }
    }

    /// Current style for an element; `None` when it is not a reveal target.
    pub fn style(&self, id: ElementId) -> Option<RevealStyle> {
        self.entries
            .iter()
            .find(|e| e.element == id)
            .map(|e| e.style)
    }

    /// Number of tracked reveal entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Leading-float parse in the parseFloat spirit: "2.5s" -> 2.5.
fn parse_float_prefix(source: &str) -> Option<f64> {
    let s = source.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i == digits_start {
        return None;
    }
    s[..i].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a "top 80%" style trigger-start position into a viewport fraction.
fn parse_start_pct(source: &str) -> Option<f64> {
    source
        .split_whitespace()
        .find(|token| token.ends_with('%'))
        .and_then(|token| token.trim_end_matches('%').parse::<f64>().ok())
        .map(|pct| pct / 100.0)
        .filter(|v| v.is_finite())
}
