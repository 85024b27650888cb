// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Absent markup and component independence.

use kurbo::Rect;

use vitrine_core::backend::Target;
use vitrine_core::config::{PageMarkup, ReactorConfig};
use vitrine_core::reactor::NAVBAR_SCROLLED_CLASS;
use vitrine_core::time::Duration;
use vitrine_harness::SimPage;

#[test]
fn missing_targets_are_no_ops() {
    // No navbar, progress bar, scroll-to-top button or links.
    let mut page = SimPage::new(ReactorConfig::portfolio()).with_sections([("work", 0.0)]);
    page.scroll_to(500.0);

    let state = page.reactor().scroll_state().copied();
    assert!(state.is_some_and(|s| s.navbar_scrolled && s.scroll_top_visible));
    assert!(page.element(Target::Navbar).is_none());
    assert!(!page.has_class(Target::Navbar, NAVBAR_SCROLLED_CLASS));
    assert_eq!(page.style(Target::ProgressBar, "width"), None);
    assert_eq!(page.active_section(), Some("work"));
    assert!(page.active_links().is_empty());
}

#[test]
fn links_without_sections_stay_inactive() {
    let mut page = SimPage::new(ReactorConfig::portfolio())
        .with_nav_links(["#home", "https://example.com", "#"]);
    page.scroll_to(900.0);
    assert!(page.active_links().is_empty());
}

#[test]
fn reveals_work_on_a_page_without_navigation() {
    let markup = PageMarkup::detail();
    let mut page = SimPage::new(ReactorConfig::portfolio())
        .with_progress_bar()
        .with_scroll_top();
    let gallery = markup
        .reveal_groups
        .iter()
        .find(|g| g.selector == ".gallery-item")
        .copied()
        .unwrap();
    let ids = page.register_reveal(gallery, &[Rect::new(0.0, 100.0, 300.0, 400.0)]);

    page.scroll_to(0.0);
    assert!(page.is_revealed(ids[0]));
    assert_eq!(page.style(Target::ProgressBar, "width"), Some("0%"));
    assert_eq!(page.active_section(), None);
}

#[test]
fn resize_does_not_disturb_scroll_state() {
    let mut page = SimPage::new(ReactorConfig::portfolio())
        .with_navbar()
        .with_sections([("A", 0.0), ("B", 800.0)])
        .with_nav_links(["#A", "#B"]);
    page.scroll_to(750.0);
    page.resize();
    page.advance(Duration::from_millis(300));
    assert_eq!(page.resize_notifications().len(), 1);
    assert_eq!(page.active_section(), Some("B"));
    assert!(page.has_class(Target::Navbar, NAVBAR_SCROLLED_CLASS));
}
