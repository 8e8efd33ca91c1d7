//! Property-Based Tests for statdeck
//!
//! Uses proptest for testing invariants and edge cases:
//! - numeric extraction is total (never panics) and only yields finite values
//! - suffix formatting ranges are exhaustive
//! - easing curves stay bounded and monotonic
//! - completed animations always display the exact formatted target

use proptest::prelude::*;

use statdeck::animate::counter::{extract_numeric, format_value, CounterAnimator, CounterConfig};
use statdeck::animate::{ease_out_quart, Easing};
use statdeck::page::{Element, ElementId, Page, Section, Viewport};
use statdeck::scrolling::ScrollState;

// =============================================================================
// Numeric Extraction Property Tests
// =============================================================================

proptest! {
    /// extract_numeric accepts any string without panicking, and anything
    /// it does return is finite.
    #[test]
    fn extraction_is_total(input in ".*") {
        if let Some(value) = extract_numeric(&input) {
            prop_assert!(value.is_finite());
        }
    }

    /// Rendering an integer and extracting it round-trips exactly.
    #[test]
    fn extraction_roundtrips_integers(value in 0i64..1_000_000) {
        prop_assert_eq!(extract_numeric(&value.to_string()), Some(value as f64));
    }

    /// A comma decimal separator parses the same as a period.
    #[test]
    fn comma_and_period_parse_alike(whole in 0u32..1000, frac in 0u32..10) {
        let with_comma = format!("{},{}", whole, frac);
        let with_period = format!("{}.{}", whole, frac);
        prop_assert_eq!(extract_numeric(&with_comma), extract_numeric(&with_period));
    }
}

// =============================================================================
// Suffix Formatting Property Tests
// =============================================================================

proptest! {
    /// Below 1000: plain integer rendering, no suffix.
    #[test]
    fn format_below_one_thousand_is_plain(value in 0u32..1000) {
        let text = format_value(f64::from(value), 0);
        prop_assert_eq!(text, value.to_string());
    }

    /// [1000, 1_000_000): always the K suffix.
    #[test]
    fn format_thousands_take_k_suffix(value in 1000u32..1_000_000) {
        let text = format_value(f64::from(value), 0);
        prop_assert!(text.ends_with('K'), "{} rendered as {}", value, text);
        prop_assert!(!text.contains('.'));
    }

    /// At or above 1_000_000: always the M suffix with one decimal.
    #[test]
    fn format_millions_take_m_suffix(value in 1_000_000u64..2_000_000_000) {
        let text = format_value(value as f64, 0);
        prop_assert!(text.ends_with('M'), "{} rendered as {}", value, text);
        prop_assert!(text.contains('.'));
    }

    /// The suffix branches ignore the decimals setting entirely.
    #[test]
    fn format_suffix_beats_decimals(value in 1000u32..1_000_000, decimals in 1usize..4) {
        prop_assert_eq!(
            format_value(f64::from(value), decimals),
            format_value(f64::from(value), 0)
        );
    }
}

// =============================================================================
// Easing Property Tests
// =============================================================================

proptest! {
    /// ease_out_quart stays within [0, 1] on [0, 1].
    #[test]
    fn ease_out_quart_is_bounded(t in 0.0f64..=1.0) {
        let eased = ease_out_quart(t);
        prop_assert!((0.0..=1.0).contains(&eased));
    }

    /// ease_out_quart is monotonically non-decreasing.
    #[test]
    fn ease_out_quart_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease_out_quart(lo) <= ease_out_quart(hi));
    }

    /// Every named curve is bounded on [0, 1] and hits both endpoints.
    #[test]
    fn named_easings_are_bounded(t in 0.0f64..=1.0) {
        for easing in [
            Easing::Linear,
            Easing::Power1Out,
            Easing::Power2Out,
            Easing::Power3Out,
            Easing::Power4Out,
        ] {
            let eased = easing.apply(t);
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&eased));
            prop_assert!((easing.apply(0.0)).abs() < 1e-12);
            prop_assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
        }
    }
}

// =============================================================================
// Animation End-State Property Tests
// =============================================================================

fn single_counter_page(target: u32) -> Page {
    let mut page = Page::default();
    page.title = "p".to_string();
    page.sections.push(Section {
        title: "s".to_string(),
        elements: vec![Element::stat(target.to_string())],
    });
    page
}

proptest! {
    /// After the full duration elapses, the displayed text is the exact
    /// formatted target for any non-negative integer target.
    #[test]
    fn completed_animation_displays_exact_target(target in 0u32..100_000) {
        let mut page = single_counter_page(target);
        let layout = page.layout();
        let view = Viewport::new(40.0, 0.0);
        let mut counters = CounterAnimator::new(CounterConfig {
            duration_ms: 2000,
            trigger_offset: 2.0,
        });

        counters.bind(&mut page);
        counters.animate_one(&page, ElementId(0), 0.0);
        counters.on_frame(&mut page, &layout, view, 1000.0);
        counters.on_frame(&mut page, &layout, view, 2000.0);

        prop_assert_eq!(
            page.element(ElementId(0)).unwrap().text.clone(),
            format_value(f64::from(target), 0)
        );
        prop_assert_eq!(counters.active_flights(), 0);
    }
}

// =============================================================================
// Scroll State Property Tests
// =============================================================================

proptest! {
    /// The scroll offset never exceeds content_height - viewport_height
    /// regardless of the movement sequence.
    #[test]
    fn scroll_offset_stays_clamped(
        content in 0usize..500,
        viewport in 1usize..100,
        moves in proptest::collection::vec(0u8..6, 0..40),
    ) {
        let mut scroll = ScrollState::new(content, viewport);
        let max = content.saturating_sub(viewport);
        for m in moves {
            match m {
                0 => { scroll.scroll_up(); }
                1 => { scroll.scroll_down(); }
                2 => { scroll.page_up(); }
                3 => { scroll.page_down(); }
                4 => { scroll.home(); }
                _ => { scroll.end(); }
            }
            prop_assert!(scroll.offset() <= max);
        }
    }
}
