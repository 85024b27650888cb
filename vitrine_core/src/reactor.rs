// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll/visibility reactor.
//!
//! [`Reactor`] owns every piece of derived UI state: reveal flags, the active
//! navigation link, the last scroll-derived values and the resize debouncer.
//! It has one dispatch method per signal type. Each method derives the new
//! state with the pure functions in [`scroll`](crate::scroll) and
//! [`reveal`](crate::reveal), diffs it against what the page already shows,
//! and returns the difference as [`Changes`] for a
//! [`Presenter`](crate::backend::Presenter) to apply.
//!
//! Handlers for different signal types do not depend on each other's order:
//! a reveal can arrive before the first scroll and vice versa.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::backend::{Changes, Target};
use crate::config::ReactorConfig;
use crate::debounce::{DebounceTicket, DebounceToken, Debouncer};
use crate::nav::NavLinks;
use crate::reveal::{RevealGroup, RevealId, RevealTracker};
use crate::scroll::ScrollState;
use crate::signal::ScrollSample;
use crate::time::HostTime;
use crate::trace::{ResizeEvent, ResizePhase, RevealEvent, ScrollEvent, SectionChangeEvent, Tracer};

/// Class toggled on the navbar past the navbar threshold.
pub const NAVBAR_SCROLLED_CLASS: &str = "scrolled";
/// Class carried by the active navigation link.
pub const NAV_ACTIVE_CLASS: &str = "active";

/// Derived UI state for one page.
#[derive(Debug)]
pub struct Reactor {
    config: ReactorConfig,
    sections: Vec<String>,
    links: NavLinks,
    reveals: RevealTracker,
    shown: Option<ScrollState>,
    resize: Debouncer,
}

impl Reactor {
    /// Creates a reactor with no sections, links or reveal elements.
    #[must_use]
    pub fn new(config: ReactorConfig) -> Self {
        Self {
            resize: Debouncer::new(config.resize_quiet),
            config,
            sections: Vec::new(),
            links: NavLinks::default(),
            reveals: RevealTracker::new(),
            shown: None,
        }
    }

    /// Sets the section ids, in document order.
    #[must_use]
    pub fn with_sections<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.sections = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the navigation links from their hrefs, in document order.
    #[must_use]
    pub fn with_nav_links<'a>(mut self, hrefs: impl IntoIterator<Item = &'a str>) -> Self {
        self.links = NavLinks::from_hrefs(hrefs);
        self
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &ReactorConfig {
        &self.config
    }

    /// Number of sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// The reveal tracker.
    #[must_use]
    pub const fn reveals(&self) -> &RevealTracker {
        &self.reveals
    }

    /// The last derived scroll state, if any scroll signal was handled.
    #[must_use]
    pub const fn scroll_state(&self) -> Option<&ScrollState> {
        self.shown.as_ref()
    }

    /// The active navigation link.
    #[must_use]
    pub const fn active_link(&self) -> Option<usize> {
        self.links.active()
    }

    /// The id of the active section.
    #[must_use]
    pub fn active_section_id(&self) -> Option<&str> {
        let idx = self.shown.as_ref()?.active_section?;
        self.sections.get(idx).map(String::as_str)
    }

    /// Registers `count` elements of `group` for one-shot reveal.
    ///
    /// The returned changes hold the hidden initial styles; apply them
    /// before observing the elements.
    pub fn register_reveal(&mut self, group: RevealGroup, count: usize) -> (Vec<RevealId>, Changes) {
        let mut changes = Changes::new();
        let ids = self
            .reveals
            .register(group, count)
            .into_iter()
            .map(|setup| {
                changes.push_reveal_style(setup.id, &setup.style);
                setup.id
            })
            .collect();
        (ids, changes)
    }

    /// Handles a visibility crossing (or load) for a registered element.
    ///
    /// Only the first signal for an element produces changes.
    pub fn on_visibility(&mut self, at: HostTime, id: RevealId, tracer: &mut Tracer<'_>) -> Changes {
        let mut changes = Changes::new();
        let Some(change) = self.reveals.on_crossing(id) else {
            return changes;
        };
        changes.push_reveal_style(id, &change.style);
        if let Some(class) = change.class {
            changes.set_class(Target::Reveal(id), class, true);
        }
        if change.unobserve {
            changes.unobserve.push(id);
        }
        tracer.reveal(&RevealEvent {
            at,
            id,
            group: change.group,
            delay: change.delay,
        });
        changes
    }

    /// Handles a scroll signal.
    ///
    /// `section_tops` are the current top offsets of the sections, read fresh
    /// for this signal. Extra entries are ignored; missing ones simply make
    /// those sections ineligible.
    pub fn on_scroll(
        &mut self,
        at: HostTime,
        sample: &ScrollSample,
        section_tops: &[f64],
        tracer: &mut Tracer<'_>,
    ) -> Changes {
        let known = section_tops.len().min(self.sections.len());
        let next = ScrollState::derive(sample, &section_tops[..known], &self.config);
        let prev = self.shown.replace(next);
        let mut changes = Changes::new();

        if prev.is_none_or(|p| p.navbar_scrolled != next.navbar_scrolled) {
            changes.set_class(Target::Navbar, NAVBAR_SCROLLED_CLASS, next.navbar_scrolled);
        }
        if prev.is_none_or(|p| p.progress != next.progress) {
            changes.set_style(Target::ProgressBar, "width", format!("{}%", next.progress));
        }
        if prev.is_none_or(|p| p.scroll_top_visible != next.scroll_top_visible) {
            let (opacity, visibility) = if next.scroll_top_visible {
                ("1", "visible")
            } else {
                ("0", "hidden")
            };
            changes.set_style(Target::ScrollTop, "opacity", opacity);
            changes.set_style(Target::ScrollTop, "visibility", visibility);
        }

        let prev_section = prev.and_then(|p| p.active_section);
        if prev_section != next.active_section {
            tracer.section_change(&SectionChangeEvent {
                at,
                from: prev_section,
                to: next.active_section,
            });
        }
        let section_id = next
            .active_section
            .and_then(|i| self.sections.get(i))
            .map(String::as_str);
        let diff = self.links.activate(section_id);
        if let Some(link) = diff.deactivated {
            changes.set_class(Target::NavLink(link), NAV_ACTIVE_CLASS, false);
        }
        if let Some(link) = diff.activated {
            changes.set_class(Target::NavLink(link), NAV_ACTIVE_CLASS, true);
        }

        tracer.scroll(&ScrollEvent {
            at,
            offset: sample.offset,
            state: next,
        });
        changes
    }

    /// Handles a resize signal by (re)arming the debounce timer.
    ///
    /// The host arms a timer for the returned ticket, cancels
    /// [`DebounceTicket::cancels`] if set, and calls
    /// [`on_resize_timer`](Self::on_resize_timer) when it fires.
    pub fn on_resize(&mut self, at: HostTime, tracer: &mut Tracer<'_>) -> DebounceTicket {
        let ticket = self.resize.trigger(at);
        tracer.resize(&ResizeEvent {
            at,
            phase: ResizePhase::Triggered,
            token: ticket.token,
        });
        ticket
    }

    /// A resize timer fired. Stale tokens produce no changes.
    pub fn on_resize_timer(
        &mut self,
        at: HostTime,
        token: DebounceToken,
        tracer: &mut Tracer<'_>,
    ) -> Changes {
        let mut changes = Changes::new();
        if self.resize.fire(token) {
            changes.resized = true;
            tracer.resize(&ResizeEvent {
                at,
                phase: ResizePhase::Fired,
                token,
            });
        }
        changes
    }

    /// Runs a due resize notification without host timers.
    pub fn poll_resize(&mut self, at: HostTime, tracer: &mut Tracer<'_>) -> Changes {
        let mut changes = Changes::new();
        if let Some(token) = self.resize.poll(at) {
            changes.resized = true;
            tracer.resize(&ResizeEvent {
                at,
                phase: ResizePhase::Fired,
                token,
            });
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObserverOptions, PageMarkup};
    use crate::reveal::{ObservePolicy, RevealEffect, RevealMotion, RevealTrigger};
    use crate::time::Duration;

    fn reactor() -> Reactor {
        Reactor::new(ReactorConfig::portfolio())
            .with_sections(["home", "about", "projects"])
            .with_nav_links(["#home", "#about", "#projects"])
    }

    fn scroll(r: &mut Reactor, offset: f64) -> Changes {
        let sample = ScrollSample::new(offset, 3000.0, 1000.0);
        r.on_scroll(HostTime(0), &sample, &[0.0, 800.0, 1600.0], &mut Tracer::none())
    }

    #[test]
    fn first_scroll_emits_full_state() {
        let mut r = reactor();
        let c = scroll(&mut r, 0.0);
        assert!(c.classes.contains(&crate::backend::ClassChange {
            target: Target::Navbar,
            class: NAVBAR_SCROLLED_CLASS,
            enabled: false,
        }));
        assert!(c.styles.iter().any(|s| s.target == Target::ProgressBar && s.value == "0%"));
        assert!(c.styles.iter().any(|s| s.target == Target::ScrollTop && s.value == "hidden"));
        assert_eq!(r.active_link(), Some(0));
    }

    #[test]
    fn unchanged_values_are_not_reemitted() {
        let mut r = reactor();
        let _ = scroll(&mut r, 10.0);
        let c = scroll(&mut r, 10.0);
        assert!(c.is_empty(), "identical sample changes nothing: {c:?}");
    }

    #[test]
    fn crossing_thresholds_toggle_widgets() {
        let mut r = reactor();
        let _ = scroll(&mut r, 99.0);
        let c = scroll(&mut r, 101.0);
        assert!(c.classes.iter().any(|k| k.target == Target::Navbar && k.enabled));
        assert!(!c.styles.iter().any(|s| s.target == Target::ScrollTop));

        let c = scroll(&mut r, 301.0);
        assert!(c.styles.iter().any(|s| s.target == Target::ScrollTop && s.value == "visible"));
    }

    #[test]
    fn section_scenario_activates_b() {
        let mut r = reactor();
        let _ = scroll(&mut r, 0.0);
        let c = scroll(&mut r, 750.0);
        assert_eq!(r.active_section_id(), Some("about"));
        assert_eq!(r.active_link(), Some(1));
        let toggles: Vec<_> = c
            .classes
            .iter()
            .filter(|k| k.class == NAV_ACTIVE_CLASS)
            .map(|k| (k.target, k.enabled))
            .collect();
        assert_eq!(toggles, [(Target::NavLink(0), false), (Target::NavLink(1), true)]);
    }

    #[test]
    fn missing_section_tops_are_ineligible() {
        let mut r = reactor();
        let sample = ScrollSample::new(2000.0, 3000.0, 1000.0);
        let _ = r.on_scroll(HostTime(0), &sample, &[0.0], &mut Tracer::none());
        assert_eq!(r.active_section_id(), Some("home"));
    }

    #[test]
    fn reveal_is_monotonic_across_scroll_direction() {
        let mut r = reactor();
        let group = RevealGroup {
            selector: ".card",
            effect: RevealEffect::Motion(RevealMotion::Rise { distance: 30.0 }),
            duration: Duration::from_millis(600),
            easing: Some("ease-out"),
            step: Duration::from_millis(100),
            trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
            policy: ObservePolicy::Retain,
        };
        let (ids, setup) = r.register_reveal(group, 2);
        assert_eq!(setup.styles.len(), 6, "three properties per element");

        let c = r.on_visibility(HostTime(0), ids[1], &mut Tracer::none());
        assert_eq!(c.styles.len(), 2);
        let _ = scroll(&mut r, 2000.0);
        let _ = scroll(&mut r, 0.0);
        assert!(r.reveals().is_revealed(ids[1]));
        assert!(r.on_visibility(HostTime(1), ids[1], &mut Tracer::none()).is_empty());
        assert!(!r.reveals().is_revealed(ids[0]));
    }

    #[test]
    fn lazy_image_reveal_requests_unobserve() {
        let mut r = reactor();
        let lazy = PageMarkup::home().reveal_groups[2];
        let (ids, _) = r.register_reveal(lazy, 1);
        let c = r.on_visibility(HostTime(0), ids[0], &mut Tracer::none());
        assert_eq!(c.unobserve, [ids[0]]);
        assert!(c.classes.iter().any(|k| k.class == "loaded" && k.enabled));
    }

    #[test]
    fn resize_burst_fires_once() {
        let mut r = reactor();
        let mut tickets = Vec::new();
        for i in 0..10 {
            tickets.push(r.on_resize(HostTime(i * 50_000), &mut Tracer::none()));
        }
        let fired: Vec<_> = tickets
            .iter()
            .filter(|t| r.on_resize_timer(t.due, t.token, &mut Tracer::none()).resized)
            .collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].due, HostTime(450_000 + 250_000));
    }

    #[test]
    fn poll_resize_waits_for_quiet_window() {
        let mut r = reactor();
        let _ = r.on_resize(HostTime(0), &mut Tracer::none());
        assert!(!r.poll_resize(HostTime(249_999), &mut Tracer::none()).resized);
        assert!(r.poll_resize(HostTime(250_000), &mut Tracer::none()).resized);
        assert!(!r.poll_resize(HostTime(500_000), &mut Tracer::none()).resized);
    }
}
