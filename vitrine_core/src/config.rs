// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the reactor and the page markup it binds to.
//!
//! There are no configuration files or environment variables: every knob is a
//! `Copy` struct with `const fn` presets matching the portfolio pages.

use alloc::format;
use alloc::string::String;

use kurbo::Insets;

use crate::reveal::{ObservePolicy, RevealEffect, RevealGroup, RevealMotion, RevealTrigger};
use crate::time::Duration;

/// Options for the viewport-intersection primitive.
///
/// `root_margin` follows CSS `rootMargin` semantics: positive values grow the
/// viewport, negative values shrink it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element's area that must be visible (0.0–1.0).
    pub threshold: f64,
    /// Adjustment applied to the viewport before intersecting.
    pub root_margin: Insets,
}

impl ObserverOptions {
    /// Options for scroll reveals: 10% visible, viewport bottom pulled up by
    /// 100px.
    #[must_use]
    pub const fn reveal() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Insets {
                x0: 0.0,
                y0: 0.0,
                x1: 0.0,
                y1: -100.0,
            },
        }
    }

    /// Options for lazily loaded images: any intersection, no margin.
    #[must_use]
    pub const fn lazy_image() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Insets {
                x0: 0.0,
                y0: 0.0,
                x1: 0.0,
                y1: 0.0,
            },
        }
    }

    /// Renders the margin as a CSS `rootMargin` string (top right bottom left).
    #[must_use]
    pub fn root_margin_css(&self) -> String {
        let m = self.root_margin;
        format!("{}px {}px {}px {}px", m.y0, m.x1, m.y1, m.x0)
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::reveal()
    }
}

/// Thresholds and timings for the scroll/visibility reactor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactorConfig {
    /// Scroll offset above which the navbar carries its `scrolled` class.
    pub navbar_threshold: f64,
    /// Scroll offset above which the scroll-to-top button is shown.
    pub scroll_top_threshold: f64,
    /// Lookahead added to the scroll offset when picking the active section.
    pub section_lookahead: f64,
    /// Quiet window for the debounced resize notification.
    pub resize_quiet: Duration,
}

impl ReactorConfig {
    /// The values used by the portfolio pages.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            navbar_threshold: 100.0,
            scroll_top_threshold: 300.0,
            section_lookahead: 200.0,
            resize_quiet: Duration::from_millis(250),
        }
    }
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

const RISE: RevealMotion = RevealMotion::Rise { distance: 30.0 };
const SLIDE: RevealMotion = RevealMotion::Slide { distance: 30.0 };
const TRANSITION: Duration = Duration::from_millis(600);
const EASE_OUT: Option<&str> = Some("ease-out");

/// Selectors and reveal groups for one page template.
#[derive(Clone, Copy, Debug)]
pub struct PageMarkup {
    /// The navigation bar that receives the `scrolled` class.
    pub navbar: Option<&'static str>,
    /// Sections taking part in navigation highlighting.
    pub sections: Option<&'static str>,
    /// Navigation links pointing at sections.
    pub nav_links: Option<&'static str>,
    /// Whether the page gets a scroll-to-top button.
    pub scroll_top: bool,
    /// Whether the page gets a scroll progress bar.
    pub progress_bar: bool,
    /// Elements revealed on scroll, in installation order.
    pub reveal_groups: &'static [RevealGroup],
    /// Links that show a notice instead of navigating when their href is `#`.
    pub placeholder_links: Option<&'static str>,
    /// Paragraphs eligible for read-more truncation.
    pub read_more: Option<&'static str>,
    /// Canvas hosting the animated backdrop, by element id.
    pub backdrop_canvas: Option<&'static str>,
}

impl PageMarkup {
    /// The landing page: backdrop, navbar effects, section highlighting,
    /// skill and project reveals, lazy project images.
    #[must_use]
    pub const fn home() -> Self {
        const GROUPS: &[RevealGroup] = &[
            RevealGroup {
                selector: ".skill-category",
                effect: RevealEffect::Motion(RISE),
                duration: TRANSITION,
                easing: EASE_OUT,
                step: Duration::ZERO,
                trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
                policy: ObservePolicy::Retain,
            },
            RevealGroup {
                selector: ".project-card",
                effect: RevealEffect::Motion(RISE),
                duration: TRANSITION,
                easing: EASE_OUT,
                step: Duration::from_millis(100),
                trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
                policy: ObservePolicy::Retain,
            },
            RevealGroup {
                selector: ".project-image img",
                effect: RevealEffect::AddClass("loaded"),
                duration: Duration::ZERO,
                easing: None,
                step: Duration::ZERO,
                trigger: RevealTrigger::Visibility(ObserverOptions::lazy_image()),
                policy: ObservePolicy::UnobserveAfterReveal,
            },
        ];
        Self {
            navbar: Some("#navbar"),
            sections: Some("section[id]"),
            nav_links: Some("nav a[href^=\"#\"]"),
            scroll_top: false,
            progress_bar: false,
            reveal_groups: GROUPS,
            placeholder_links: None,
            read_more: None,
            backdrop_canvas: Some("three-canvas"),
        }
    }

    /// The project detail page: gallery and sidebar reveals, scroll-to-top,
    /// progress bar, placeholder link notices.
    #[must_use]
    pub const fn detail() -> Self {
        const GROUPS: &[RevealGroup] = &[
            RevealGroup {
                selector: ".gallery-item img",
                effect: RevealEffect::Motion(RevealMotion::Zoom { from: 0.95 }),
                duration: Duration::from_millis(500),
                easing: None,
                step: Duration::ZERO,
                trigger: RevealTrigger::Load,
                policy: ObservePolicy::Retain,
            },
            RevealGroup {
                selector: ".gallery-item",
                effect: RevealEffect::Motion(RISE),
                duration: TRANSITION,
                easing: EASE_OUT,
                step: Duration::from_millis(100),
                trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
                policy: ObservePolicy::Retain,
            },
            RevealGroup {
                selector: ".other-project-card",
                effect: RevealEffect::Motion(RISE),
                duration: TRANSITION,
                easing: EASE_OUT,
                step: Duration::from_millis(150),
                trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
                policy: ObservePolicy::Retain,
            },
            RevealGroup {
                selector: ".sidebar-section",
                effect: RevealEffect::Motion(SLIDE),
                duration: TRANSITION,
                easing: EASE_OUT,
                step: Duration::from_millis(100),
                trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
                policy: ObservePolicy::Retain,
            },
        ];
        Self {
            navbar: None,
            sections: None,
            nav_links: None,
            scroll_top: true,
            progress_bar: true,
            reveal_groups: GROUPS,
            placeholder_links: Some(".external-link"),
            read_more: None,
            backdrop_canvas: None,
        }
    }

    /// Enables read-more truncation on the given paragraphs.
    #[must_use]
    pub const fn with_read_more(mut self, selector: &'static str) -> Self {
        self.read_more = Some(selector);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_root_margin_renders_css() {
        assert_eq!(ObserverOptions::reveal().root_margin_css(), "0px 0px -100px 0px");
        assert_eq!(ObserverOptions::lazy_image().root_margin_css(), "0px 0px 0px 0px");
    }

    #[test]
    fn portfolio_thresholds() {
        let c = ReactorConfig::default();
        assert_eq!(c.navbar_threshold, 100.0);
        assert_eq!(c.scroll_top_threshold, 300.0);
        assert_eq!(c.section_lookahead, 200.0);
        assert_eq!(c.resize_quiet, Duration::from_millis(250));
    }

    #[test]
    fn detail_page_staggers_other_projects_slower() {
        let detail = PageMarkup::detail();
        let other = detail
            .reveal_groups
            .iter()
            .find(|g| g.selector == ".other-project-card")
            .expect("group present");
        assert_eq!(other.step, Duration::from_millis(150));
        assert!(detail.scroll_top && detail.progress_bar, "detail page widgets");
        assert!(PageMarkup::home().with_read_more(".challenge-item p").read_more.is_some());
    }
}
