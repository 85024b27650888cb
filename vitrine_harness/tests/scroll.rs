// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-derived state on a simulated page.

use vitrine_core::backend::Target;
use vitrine_core::config::ReactorConfig;
use vitrine_core::reactor::NAVBAR_SCROLLED_CLASS;
use vitrine_debug::recorder::RecorderSink;
use vitrine_harness::SimPage;

fn sectioned_page() -> SimPage<RecorderSink> {
    SimPage::with_sink(ReactorConfig::portfolio(), RecorderSink::new())
        .with_navbar()
        .with_sections([("A", 0.0), ("B", 800.0), ("C", 1600.0)])
        .with_nav_links(["#A", "#B", "#C"])
}

#[test]
fn offset_750_activates_b() {
    let mut page = sectioned_page();
    page.scroll_to(750.0);
    assert_eq!(page.active_section(), Some("B"));
    assert_eq!(page.active_links(), [1]);
    assert_eq!(page.sink().section_path(), [Some(1)]);
}

#[test]
fn section_boundaries_follow_lookahead() {
    let mut page = sectioned_page();
    page.scroll_to(599.0);
    assert_eq!(page.active_section(), Some("A"));
    page.scroll_to(600.0);
    assert_eq!(page.active_section(), Some("B"));
    page.scroll_to(1400.0);
    assert_eq!(page.active_section(), Some("C"));
    page.scroll_to(0.0);
    assert_eq!(page.active_section(), Some("A"));
    assert_eq!(page.active_links(), [0], "exactly one link stays active");
    assert_eq!(page.sink().section_path(), [Some(0), Some(1), Some(2), Some(0)]);
}

#[test]
fn section_tops_are_read_fresh() {
    let mut page = sectioned_page();
    page.scroll_to(750.0);
    assert_eq!(page.active_section(), Some("B"));
    page.move_section(1, 1200.0);
    page.scroll_to(750.0);
    assert_eq!(page.active_section(), Some("A"));
    assert_eq!(page.active_links(), [0]);
}

#[test]
fn above_every_section_activates_none() {
    let mut page = SimPage::new(ReactorConfig::portfolio())
        .with_sections([("about", 500.0)])
        .with_nav_links(["#about"]);
    page.scroll_to(100.0);
    assert_eq!(page.active_section(), None);
    assert!(page.active_links().is_empty());
    page.scroll_to(300.0);
    assert_eq!(page.active_section(), Some("about"));
}

#[test]
fn navbar_threshold() {
    let mut page = sectioned_page();
    page.scroll_to(99.0);
    assert!(!page.has_class(Target::Navbar, NAVBAR_SCROLLED_CLASS));
    page.scroll_to(101.0);
    assert!(page.has_class(Target::Navbar, NAVBAR_SCROLLED_CLASS));
    page.scroll_to(100.0);
    assert!(
        !page.has_class(Target::Navbar, NAVBAR_SCROLLED_CLASS),
        "the threshold itself is not past it"
    );
}

#[test]
fn scroll_top_threshold() {
    let mut page = SimPage::new(ReactorConfig::portfolio()).with_scroll_top();
    page.scroll_to(299.0);
    assert_eq!(page.style(Target::ScrollTop, "opacity"), Some("0"));
    assert_eq!(page.style(Target::ScrollTop, "visibility"), Some("hidden"));
    page.scroll_to(301.0);
    assert_eq!(page.style(Target::ScrollTop, "opacity"), Some("1"));
    assert_eq!(page.style(Target::ScrollTop, "visibility"), Some("visible"));
}

#[test]
fn progress_endpoints_and_linearity() {
    let mut page = SimPage::new(ReactorConfig::portfolio())
        .with_progress_bar()
        .with_viewport(1280.0, 800.0)
        .with_scroll_height(2800.0);

    page.scroll_to(0.0);
    assert_eq!(page.style(Target::ProgressBar, "width"), Some("0%"));
    page.scroll_to(2000.0);
    assert_eq!(page.style(Target::ProgressBar, "width"), Some("100%"));

    for offset in [100.0, 500.0, 1000.0, 1500.0, 1999.0] {
        page.scroll_to(offset);
        let progress = page.reactor().scroll_state().map(|s| s.progress);
        let expected = 100.0 * offset / 2000.0;
        assert!(
            progress.is_some_and(|p| (p - expected).abs() < 1e-9),
            "offset {offset}: got {progress:?}, want {expected}"
        );
    }
    page.scroll_to(1000.0);
    assert_eq!(page.style(Target::ProgressBar, "width"), Some("50%"));
}

#[test]
fn unchanged_state_applies_nothing() {
    let mut page = sectioned_page();
    page.scroll_to(750.0);
    let applied = page.batches_applied();
    page.scroll_to(750.0);
    assert_eq!(page.batches_applied(), applied, "same offset, same state");
}
