// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation link highlighting and in-page anchors.

use alloc::string::String;
use alloc::vec::Vec;

/// Returns the element id an in-page anchor points at.
///
/// Only hrefs of the form `#id` with a non-empty id qualify; a bare `#` and
/// anything not starting with `#` are left to the browser.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}

/// Which link lost and which gained the `active` class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavDiff {
    /// Link that stops being active.
    pub deactivated: Option<usize>,
    /// Link that becomes active.
    pub activated: Option<usize>,
}

impl NavDiff {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.deactivated.is_none() && self.activated.is_none()
    }
}

/// Navigation links keyed by the section each one targets.
///
/// At most one link is active at a time.
#[derive(Clone, Debug, Default)]
pub struct NavLinks {
    targets: Vec<Option<String>>,
    active: Option<usize>,
}

impl NavLinks {
    /// Builds the link table from each link's `href`, in document order.
    pub fn from_hrefs<'a>(hrefs: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            targets: hrefs
                .into_iter()
                .map(|href| anchor_target(href).map(String::from))
                .collect(),
            active: None,
        }
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The currently active link.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// First link (in document order) targeting `section_id`.
    #[must_use]
    pub fn link_for(&self, section_id: &str) -> Option<usize> {
        self.targets
            .iter()
            .position(|t| t.as_deref() == Some(section_id))
    }

    /// Makes the link for `section_id` the only active one.
    ///
    /// `None`, or a section no link targets, leaves every link inactive.
    pub fn activate(&mut self, section_id: Option<&str>) -> NavDiff {
        let next = section_id.and_then(|id| self.link_for(id));
        if next == self.active {
            return NavDiff::default();
        }
        let diff = NavDiff {
            deactivated: self.active,
            activated: next,
        };
        self.active = next;
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.com/#x"), None);
        assert_eq!(anchor_target(""), None);
    }

    #[test]
    fn activation_is_mutually_exclusive() {
        let mut links = NavLinks::from_hrefs(["#home", "#about", "#projects"]);
        let diff = links.activate(Some("about"));
        assert_eq!(
            diff,
            NavDiff {
                deactivated: None,
                activated: Some(1)
            }
        );
        let diff = links.activate(Some("projects"));
        assert_eq!(
            diff,
            NavDiff {
                deactivated: Some(1),
                activated: Some(2)
            }
        );
        assert_eq!(links.active(), Some(2));
    }

    #[test]
    fn repeating_the_same_section_is_a_noop() {
        let mut links = NavLinks::from_hrefs(["#home", "#about"]);
        let _ = links.activate(Some("home"));
        assert!(links.activate(Some("home")).is_empty());
    }

    #[test]
    fn clearing_deactivates() {
        let mut links = NavLinks::from_hrefs(["#home"]);
        let _ = links.activate(Some("home"));
        let diff = links.activate(None);
        assert_eq!(diff.deactivated, Some(0));
        assert_eq!(diff.activated, None);
        assert_eq!(links.active(), None);
    }

    #[test]
    fn duplicate_targets_activate_first_link_only() {
        let mut links = NavLinks::from_hrefs(["#", "#contact", "#contact"]);
        assert_eq!(links.activate(Some("contact")).activated, Some(1));
    }

    #[test]
    fn unknown_section_leaves_all_inactive() {
        let mut links = NavLinks::from_hrefs(["#home"]);
        assert!(links.activate(Some("footer")).is_empty());
        assert_eq!(links.active(), None);
    }
}
