// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure derivations from the scroll offset.
//!
//! Every scroll signal recomputes all four values from scratch; nothing here
//! remembers previous samples.

use crate::config::ReactorConfig;
use crate::signal::ScrollSample;

/// Scroll progress in percent, clamped to `[0, 100]`.
///
/// The divisor is `max(1, scroll_height - viewport_height)` so pages that fit
/// the viewport report 0 instead of dividing by zero.
#[must_use]
pub fn progress_percent(sample: &ScrollSample) -> f64 {
    let pct = 100.0 * sample.offset / sample.max_scroll();
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Whether the navbar carries its `scrolled` class.
#[must_use]
pub fn navbar_scrolled(offset: f64, config: &ReactorConfig) -> bool {
    offset > config.navbar_threshold
}

/// Whether the scroll-to-top button is visible.
#[must_use]
pub fn scroll_top_visible(offset: f64, config: &ReactorConfig) -> bool {
    offset > config.scroll_top_threshold
}

/// Transform of the scroll-to-top button while the pointer is over it or
/// not.
#[must_use]
pub const fn scroll_top_transform(hovered: bool) -> &'static str {
    if hovered {
        "translateY(-5px) scale(1.1)"
    } else {
        "translateY(0) scale(1)"
    }
}

/// Index of the deepest section scrolled into.
///
/// `section_tops` holds each section's top offset in document order. The
/// result is the *last* section whose top is at or above
/// `offset + lookahead`, or `None` when the page is above every section.
#[must_use]
pub fn active_section(offset: f64, section_tops: &[f64], config: &ReactorConfig) -> Option<usize> {
    let line = offset + config.section_lookahead;
    section_tops.iter().rposition(|&top| top <= line)
}

/// All values derived from one scroll sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Scroll progress in percent.
    pub progress: f64,
    /// Navbar `scrolled` flag.
    pub navbar_scrolled: bool,
    /// Scroll-to-top button visibility.
    pub scroll_top_visible: bool,
    /// Active section index.
    pub active_section: Option<usize>,
}

impl ScrollState {
    /// Derives the full state for one sample.
    #[must_use]
    pub fn derive(sample: &ScrollSample, section_tops: &[f64], config: &ReactorConfig) -> Self {
        Self {
            progress: progress_percent(sample),
            navbar_scrolled: navbar_scrolled(sample.offset, config),
            scroll_top_visible: scroll_top_visible(sample.offset, config),
            active_section: active_section(sample.offset, section_tops, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: ReactorConfig = ReactorConfig::portfolio();

    #[test]
    fn progress_endpoints_and_linearity() {
        let at = |offset| progress_percent(&ScrollSample::new(offset, 3000.0, 1000.0));
        assert_eq!(at(0.0), 0.0);
        assert_eq!(at(2000.0), 100.0);
        assert_eq!(at(500.0), 25.0);
        assert_eq!(at(1000.0), 50.0);
    }

    #[test]
    fn progress_is_clamped_for_overscroll() {
        assert_eq!(progress_percent(&ScrollSample::new(-40.0, 3000.0, 1000.0)), 0.0);
        assert_eq!(progress_percent(&ScrollSample::new(2100.0, 3000.0, 1000.0)), 100.0);
    }

    #[test]
    fn progress_on_page_that_fits_viewport() {
        let sample = ScrollSample::new(0.0, 600.0, 800.0);
        assert_eq!(progress_percent(&sample), 0.0);
    }

    #[test]
    fn navbar_threshold_is_strict() {
        assert!(!navbar_scrolled(99.0, &CONFIG));
        assert!(!navbar_scrolled(100.0, &CONFIG));
        assert!(navbar_scrolled(101.0, &CONFIG));
    }

    #[test]
    fn scroll_top_threshold_is_strict() {
        assert!(!scroll_top_visible(299.0, &CONFIG));
        assert!(!scroll_top_visible(300.0, &CONFIG));
        assert!(scroll_top_visible(301.0, &CONFIG));
    }

    #[test]
    fn active_section_picks_last_within_lookahead() {
        let tops = [0.0, 800.0, 1600.0];
        // 800 <= 750 + 200, 1600 > 950: B wins.
        assert_eq!(active_section(750.0, &tops, &CONFIG), Some(1));
        assert_eq!(active_section(0.0, &tops, &CONFIG), Some(0));
        assert_eq!(active_section(599.0, &tops, &CONFIG), Some(0));
        assert_eq!(active_section(600.0, &tops, &CONFIG), Some(1));
        assert_eq!(active_section(1400.0, &tops, &CONFIG), Some(2));
    }

    #[test]
    fn active_section_none_above_first_section() {
        let tops = [500.0, 900.0];
        assert_eq!(active_section(0.0, &tops, &CONFIG), None);
        assert_eq!(active_section(300.0, &tops, &CONFIG), Some(0));
        assert_eq!(active_section(100.0, &[], &CONFIG), None);
    }

    #[test]
    fn out_of_order_tops_still_use_document_order() {
        // A section moved above an earlier one by layout still only wins if
        // it comes last in document order.
        let tops = [900.0, 100.0];
        assert_eq!(active_section(0.0, &tops, &CONFIG), Some(1));
        assert_eq!(active_section(800.0, &tops, &CONFIG), Some(1));
    }

    #[test]
    fn scroll_top_hover_lifts_and_grows() {
        assert_eq!(scroll_top_transform(true), "translateY(-5px) scale(1.1)");
        assert_eq!(scroll_top_transform(false), "translateY(0) scale(1)");
    }
}
