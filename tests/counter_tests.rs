//! Counter engine integration tests
//!
//! Drives the counter animator through its public API with a synthetic
//! clock: every test steps `on_frame` by hand, so timing is exact and no
//! terminal is involved.

use statdeck::animate::counter::{format_value, CounterAnimator, CounterConfig};
use statdeck::page::{Element, ElementId, Page, Section, Viewport};

/// Page with a single counter element as element 0.
fn counter_page(element: Element) -> Page {
    let mut page = Page::default();
    page.title = "test".to_string();
    page.sections.push(Section {
        title: "stats".to_string(),
        elements: vec![element],
    });
    page
}

/// Config with a small trigger offset so a 40-row viewport has a usable
/// band; duration stays at the 2000 ms default.
fn test_config() -> CounterConfig {
    CounterConfig {
        duration_ms: 2000,
        trigger_offset: 2.0,
    }
}

/// Viewport whose band comfortably contains the first element (top row 2).
fn open_view() -> Viewport {
    Viewport::new(40.0, 0.0)
}

#[test]
fn test_final_text_is_exact_and_intermediates_monotonic() {
    for target in [0u32, 1, 7, 999] {
        let mut page = counter_page(Element::stat(target.to_string()));
        let mut counters = CounterAnimator::new(test_config());
        let layout = page.layout();
        let id = ElementId(0);

        counters.bind(&mut page);
        counters.animate_one(&page, id, 0.0);

        let mut last = -1.0f64;
        let mut t = 0.0;
        while t <= 2100.0 {
            counters.on_frame(&mut page, &layout, open_view(), t);
            let shown: f64 = page.element(id).unwrap().text.parse().unwrap();
            assert!(
                shown >= last,
                "display went backwards for target {}: {} -> {}",
                target,
                last,
                shown
            );
            last = shown;
            t += 100.0;
        }

        assert_eq!(page.element(id).unwrap().text, format_value(f64::from(target), 0));
        assert_eq!(counters.active_flights(), 0);
    }
}

#[test]
fn test_bind_is_idempotent() {
    let mut page = counter_page(Element::stat("42"));
    let mut counters = CounterAnimator::new(test_config());

    counters.bind(&mut page);
    assert_eq!(counters.tracked_count(), 1);
    assert_eq!(
        page.element(ElementId(0)).unwrap().captured_original.as_deref(),
        Some("42")
    );

    // Mutate the displayed text, then bind again: the captured original
    // must survive and the element must not be tracked twice.
    page.set_text(ElementId(0), "999".to_string());
    counters.bind(&mut page);
    assert_eq!(counters.tracked_count(), 1);
    assert_eq!(
        page.element(ElementId(0)).unwrap().captured_original.as_deref(),
        Some("42")
    );
}

#[test]
fn test_bind_then_reset_roundtrip() {
    let mut page = counter_page(Element::stat("1234 users"));
    let mut counters = CounterAnimator::new(test_config());

    counters.bind(&mut page);
    counters.reset(&mut page);

    assert_eq!(page.element(ElementId(0)).unwrap().text, "1234 users");
    assert_eq!(counters.tracked_count(), 0);
}

#[test]
fn test_suffix_boundaries() {
    assert_eq!(format_value(999.0, 0), "999");
    assert_eq!(format_value(1000.0, 0), "1K");
    // Just below a million still takes the K branch, and 999.999 fixed to
    // zero decimals rolls over to "1000K".
    assert_eq!(format_value(999_999.0, 0), "1000K");
    assert_eq!(format_value(999_999.99, 0), "1000K");
    assert_eq!(format_value(1_000_000.0, 0), "1.0M");
}

#[test]
fn test_value_override_attribute_renders_suffix() {
    let mut element = Element::stat("our users");
    element.counter_value = Some("1234".to_string());
    let mut page = counter_page(element);
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();

    counters.bind(&mut page);
    counters.animate_one(&page, ElementId(0), 0.0);
    counters.on_frame(&mut page, &layout, open_view(), 2500.0);

    assert_eq!(page.element(ElementId(0)).unwrap().text, "1K");
}

#[test]
fn test_comma_decimal_text_infers_one_decimal() {
    let mut page = counter_page(Element::stat("45,5"));
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();

    counters.bind(&mut page);
    counters.animate_one(&page, ElementId(0), 0.0);
    counters.on_frame(&mut page, &layout, open_view(), 2500.0);

    assert_eq!(page.element(ElementId(0)).unwrap().text, "45.5");
}

#[test]
fn test_viewport_band_triggers_exactly_once() {
    let mut page = counter_page(Element::stat("500"));
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();

    counters.bind(&mut page);
    counters.start_watching();
    assert_eq!(counters.watcher_count(), 1);

    counters.notify_scroll();
    counters.on_frame(&mut page, &layout, open_view(), 0.0);
    assert!(counters.is_animated(ElementId(0)));
    assert_eq!(counters.active_flights(), 1);

    // Still in view, already flagged: another scroll must not relaunch.
    counters.notify_scroll();
    counters.on_frame(&mut page, &layout, open_view(), 50.0);
    assert_eq!(counters.active_flights(), 1);
}

#[test]
fn test_default_trigger_offset_band() {
    // With the default 100-row offset a 300-row viewport has band
    // [100, 200]. Put the counter at absolute row 150 via a spacer.
    let mut spacer = Element::text("");
    spacer.height = 148;
    let mut page = Page::default();
    page.title = "test".to_string();
    page.sections.push(Section {
        title: "stats".to_string(),
        elements: vec![spacer, Element::stat("7")],
    });
    let layout = page.layout();
    let counter_id = ElementId(1);
    assert_eq!(layout.rect(counter_id), Some((150.0, 151.0)));

    let mut counters = CounterAnimator::new(CounterConfig::default());
    counters.bind(&mut page);

    // In the band: triggers.
    counters.check_and_animate(&mut page, &layout, Viewport::new(300.0, 0.0), 0.0);
    assert!(counters.is_animated(counter_id));

    // Same geometry but scrolled so the element sits above the band.
    let mut counters = CounterAnimator::new(CounterConfig::default());
    counters.bind(&mut page);
    counters.check_and_animate(&mut page, &layout, Viewport::new(300.0, 120.0), 0.0);
    assert!(!counters.is_animated(counter_id));
}

#[test]
fn test_events_without_watchers_are_ignored() {
    let mut page = counter_page(Element::stat("500"));
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();

    counters.bind(&mut page);
    // No start_watching: scroll notifications must not queue a check.
    counters.notify_scroll();
    counters.on_frame(&mut page, &layout, open_view(), 0.0);
    assert!(!counters.is_animated(ElementId(0)));
    assert_eq!(counters.active_flights(), 0);
}

#[test]
fn test_start_watching_requires_tracked_elements() {
    let mut counters = CounterAnimator::new(test_config());
    counters.start_watching();
    assert_eq!(counters.watcher_count(), 0);
}

#[test]
fn test_duplicate_watch_registrations_stack() {
    let mut page = counter_page(Element::stat("500"));
    let mut counters = CounterAnimator::new(test_config());

    counters.bind(&mut page);
    counters.start_watching();
    counters.start_watching();
    assert_eq!(counters.watcher_count(), 2);

    counters.stop_watching();
    assert_eq!(counters.watcher_count(), 1);
}

#[test]
fn test_reset_mid_flight_then_rebind_reanimates_from_zero() {
    let mut element = Element::stat("originally 100");
    element.counter_value = Some("100".to_string());
    element.counter_duration = Some("1000".to_string());
    let mut page = counter_page(element);
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();
    let id = ElementId(0);

    counters.bind(&mut page);
    counters.animate_one(&page, id, 0.0);
    counters.on_frame(&mut page, &layout, open_view(), 500.0);
    let mid_value: f64 = page.element(id).unwrap().text.parse().unwrap();
    assert!(mid_value > 50.0);

    counters.reset(&mut page);
    assert_eq!(page.element(id).unwrap().text, "originally 100");

    // Rebind and re-trigger: the new interpolation starts over from zero
    // (its write lands after the still-running old flight's).
    counters.bind(&mut page);
    counters.check_and_animate(&mut page, &layout, open_view(), 600.0);
    counters.on_frame(&mut page, &layout, open_view(), 633.0);
    let restarted: f64 = page.element(id).unwrap().text.parse().unwrap();
    assert!(
        restarted < mid_value,
        "expected a fresh start, got {} after {}",
        restarted,
        mid_value
    );

    // Both chains run to completion; the end state is the exact target.
    counters.on_frame(&mut page, &layout, open_view(), 3000.0);
    assert_eq!(page.element(id).unwrap().text, "100");
    assert_eq!(counters.active_flights(), 0);
}

#[test]
fn test_reset_does_not_cancel_inflight_interpolation() {
    // Accepted limitation: the final exact write of an already-launched
    // interpolation races a concurrent reset and overwrites the restored
    // original text.
    let mut element = Element::stat("42 point of sale");
    element.counter_value = Some("42".to_string());
    element.counter_duration = Some("500".to_string());
    let mut page = counter_page(element);
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();
    let id = ElementId(0);

    counters.bind(&mut page);
    counters.animate_one(&page, id, 0.0);
    counters.on_frame(&mut page, &layout, open_view(), 250.0);

    counters.reset(&mut page);
    assert_eq!(page.element(id).unwrap().text, "42 point of sale");
    assert_eq!(counters.active_flights(), 1);

    counters.on_frame(&mut page, &layout, open_view(), 600.0);
    assert_eq!(page.element(id).unwrap().text, "42");
}

#[test]
fn test_unparseable_target_consumes_trigger_silently() {
    let mut page = counter_page(Element::stat("no digits at all"));
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();
    let id = ElementId(0);

    counters.bind(&mut page);
    counters.check_and_animate(&mut page, &layout, open_view(), 0.0);

    assert!(counters.is_animated(id));
    assert_eq!(counters.active_flights(), 0);
    assert_eq!(page.element(id).unwrap().text, "no digits at all");
}

#[test]
fn test_malformed_decimals_attribute_collapses_to_integer() {
    let mut element = Element::stat("count");
    element.counter_value = Some("42.75".to_string());
    element.counter_decimals = Some("lots".to_string());
    let mut page = counter_page(element);
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();

    counters.bind(&mut page);
    counters.animate_one(&page, ElementId(0), 0.0);
    counters.on_frame(&mut page, &layout, open_view(), 2500.0);

    assert_eq!(page.element(ElementId(0)).unwrap().text, "43");
}

#[test]
fn test_malformed_duration_attribute_uses_default() {
    let mut element = Element::stat("80");
    element.counter_duration = Some("soonish".to_string());
    let mut page = counter_page(element);
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();
    let id = ElementId(0);

    counters.bind(&mut page);
    counters.animate_one(&page, id, 0.0);

    // Still mid-flight just before the 2000 ms default elapses.
    counters.on_frame(&mut page, &layout, open_view(), 1999.0);
    assert_eq!(counters.active_flights(), 1);

    counters.on_frame(&mut page, &layout, open_view(), 2000.0);
    assert_eq!(counters.active_flights(), 0);
    assert_eq!(page.element(id).unwrap().text, "80");
}

#[test]
fn test_animate_counter_by_name() {
    let mut element = Element::stat("12");
    element.name = Some("sales".to_string());
    let mut page = counter_page(element);
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();

    // Unknown names and non-counter elements are silent no-ops.
    counters.animate_counter(&mut page, "nope", 0.0);
    assert_eq!(counters.active_flights(), 0);

    counters.animate_counter(&mut page, "sales", 0.0);
    assert_eq!(counters.active_flights(), 1);
    // The programmatic trigger also binds the element.
    assert_eq!(counters.tracked_count(), 1);

    counters.on_frame(&mut page, &layout, open_view(), 2500.0);
    assert_eq!(page.element(ElementId(0)).unwrap().text, "12");
}

#[test]
fn test_restart_rebinds_and_reanimates() {
    let mut page = counter_page(Element::stat("60"));
    let mut counters = CounterAnimator::new(test_config());
    let layout = page.layout();
    let id = ElementId(0);

    counters.bind(&mut page);
    counters.start_watching();
    counters.start_watching();
    counters.check_and_animate(&mut page, &layout, open_view(), 0.0);
    counters.on_frame(&mut page, &layout, open_view(), 2500.0);
    assert_eq!(page.element(id).unwrap().text, "60");

    counters.restart(&mut page, &layout, open_view(), 3000.0);
    // All stacked registrations collapse into the single fresh one.
    assert_eq!(counters.watcher_count(), 1);
    assert!(counters.is_animated(id));
    assert_eq!(counters.active_flights(), 1);

    counters.on_frame(&mut page, &layout, open_view(), 5600.0);
    assert_eq!(page.element(id).unwrap().text, "60");
}
