// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input signals delivered by the page environment.
//!
//! The reactor consumes two signals: the vertical scroll offset (sampled on
//! every scroll event, together with the document and viewport heights) and
//! per-element visibility crossings. Browsers deliver the latter through
//! `IntersectionObserver`; [`crossing`] computes the same predicate from
//! plain rectangles for hosts without one.

use kurbo::Rect;

use crate::config::ObserverOptions;

/// One reading of the document scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    /// Current vertical scroll offset in CSS pixels.
    pub offset: f64,
    /// Total height of the scrollable content.
    pub scroll_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl ScrollSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(offset: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            scroll_height,
            viewport_height,
        }
    }

    /// The furthest the document can scroll; never below 1 so it can divide.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(1.0)
    }
}

/// Returns the fraction of `element` visible inside `viewport` after applying
/// the root margin from `options`.
///
/// Zero-area elements report `1.0` when they touch the adjusted viewport and
/// `0.0` otherwise, mirroring how `IntersectionObserver` treats them.
#[must_use]
pub fn intersection_ratio(element: Rect, viewport: Rect, options: &ObserverOptions) -> f64 {
    let root = viewport + options.root_margin;
    let element = element.abs();
    let area = element.area();
    if area <= 0.0 {
        let touches = element.x0 <= root.x1
            && element.x1 >= root.x0
            && element.y0 <= root.y1
            && element.y1 >= root.y0;
        return if touches { 1.0 } else { 0.0 };
    }
    (element.intersect(root).area() / area).clamp(0.0, 1.0)
}

/// Returns `true` when `element` counts as visible for the given options.
///
/// A threshold of zero means "any overlap at all"; otherwise the visible
/// fraction must reach the threshold.
#[must_use]
pub fn crossing(element: Rect, viewport: Rect, options: &ObserverOptions) -> bool {
    let ratio = intersection_ratio(element, viewport, options);
    if options.threshold <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= options.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn max_scroll_guards_short_pages() {
        assert_eq!(ScrollSample::new(0.0, 500.0, 800.0).max_scroll(), 1.0);
        assert_eq!(ScrollSample::new(0.0, 2800.0, 800.0).max_scroll(), 2000.0);
    }

    #[test]
    fn bottom_margin_hides_elements_near_the_fold() {
        let opts = ObserverOptions::reveal();
        // Element occupies 720..820: only the part above 700 would count.
        let el = Rect::new(0.0, 720.0, 100.0, 820.0);
        assert!(!crossing(el, VIEWPORT, &opts), "below the shrunk viewport");

        // 650..750: 50% above the 700px line.
        let el = Rect::new(0.0, 650.0, 100.0, 750.0);
        assert!(crossing(el, VIEWPORT, &opts), "half visible");
    }

    #[test]
    fn threshold_requires_ten_percent() {
        let opts = ObserverOptions::reveal();
        // 1000px tall element with 90px visible: 9%.
        let el = Rect::new(0.0, 610.0, 100.0, 1610.0);
        assert!(!crossing(el, VIEWPORT, &opts), "9% is under the threshold");
        // 100px visible: exactly 10%.
        let el = Rect::new(0.0, 600.0, 100.0, 1600.0);
        assert!(crossing(el, VIEWPORT, &opts), "10% meets the threshold");
    }

    #[test]
    fn lazy_images_cross_on_any_overlap() {
        let opts = ObserverOptions::lazy_image();
        let el = Rect::new(0.0, 799.0, 100.0, 1200.0);
        assert!(crossing(el, VIEWPORT, &opts), "one pixel is enough");
        let el = Rect::new(0.0, 900.0, 100.0, 1200.0);
        assert!(!crossing(el, VIEWPORT, &opts), "fully below");
    }

    #[test]
    fn zero_area_element_touching_viewport_is_fully_visible() {
        let opts = ObserverOptions::reveal();
        let el = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(intersection_ratio(el, VIEWPORT, &opts), 1.0);
    }
}
