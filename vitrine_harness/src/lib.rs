// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless simulated page for driving the reactor in tests.
//!
//! [`SimPage`] plays the browser's part: it owns a [`Reactor`], a fake
//! element table, a manual clock and a timer queue. Scrolling, visibility,
//! load and resize signals are delivered the way a page would deliver them,
//! and every resulting [`Changes`] batch goes through [`Presenter::apply`]
//! so tests observe the same mutations the DOM would receive.
//!
//! Element positions are in document coordinates. The viewport is the
//! rectangle `(0, offset)..(width, offset + height)`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use vitrine_core::backend::{Changes, Presenter, Target};
use vitrine_core::config::{ObserverOptions, ReactorConfig};
use vitrine_core::debounce::DebounceToken;
use vitrine_core::reactor::Reactor;
use vitrine_core::reveal::{RevealGroup, RevealId, RevealTrigger};
use vitrine_core::signal::{ScrollSample, crossing};
use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::{NoopSink, TraceSink, Tracer};

/// Classes and inline styles of one simulated element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimElement {
    classes: Vec<&'static str>,
    styles: Vec<(&'static str, String)>,
}

impl SimElement {
    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(&class)
    }

    /// The inline value of `property`, if set.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    fn set_class(&mut self, class: &'static str, enabled: bool) {
        let present = self.classes.iter().position(|c| *c == class);
        match (present, enabled) {
            (None, true) => self.classes.push(class),
            (Some(i), false) => {
                self.classes.remove(i);
            }
            _ => {}
        }
    }

    fn set_style(&mut self, property: &'static str, value: &str) {
        match self.styles.iter_mut().find(|(p, _)| *p == property) {
            Some((_, v)) => *v = value.into(),
            None => self.styles.push((property, value.into())),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Watched {
    id: RevealId,
    rect: Rect,
    options: ObserverOptions,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: HostTime,
    token: DebounceToken,
}

/// A simulated page around a [`Reactor`].
///
/// Only elements added through the builder methods exist; batches that
/// address anything else are ignored, like a page missing that markup.
#[derive(Debug)]
pub struct SimPage<S: TraceSink = NoopSink> {
    config: ReactorConfig,
    reactor: Reactor,
    section_ids: Vec<String>,
    section_tops: Vec<f64>,
    link_hrefs: Vec<String>,
    elements: Vec<(Target, SimElement)>,
    watched: Vec<Watched>,
    timers: Vec<Timer>,
    resizes: Vec<HostTime>,
    applied: usize,
    viewport: Size,
    scroll_height: f64,
    offset: f64,
    clock: HostTime,
    sink: S,
}

impl SimPage {
    /// Creates an empty 1280×800 page, 4000px tall, with no markup.
    #[must_use]
    pub fn new(config: ReactorConfig) -> Self {
        Self::with_sink(config, NoopSink)
    }
}

impl<S: TraceSink> SimPage<S> {
    /// Creates an empty page that reports trace events to `sink`.
    #[must_use]
    pub fn with_sink(config: ReactorConfig, sink: S) -> Self {
        Self {
            config,
            reactor: Reactor::new(config),
            section_ids: Vec::new(),
            section_tops: Vec::new(),
            link_hrefs: Vec::new(),
            elements: Vec::new(),
            watched: Vec::new(),
            timers: Vec::new(),
            resizes: Vec::new(),
            applied: 0,
            viewport: Size::new(1280.0, 800.0),
            scroll_height: 4000.0,
            offset: 0.0,
            clock: HostTime(0),
            sink,
        }
    }

    // -- markup -----------------------------------------------------------

    /// Sets the viewport size.
    #[must_use]
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Sets the total document height.
    #[must_use]
    pub fn with_scroll_height(mut self, height: f64) -> Self {
        self.scroll_height = height;
        self
    }

    /// Adds the navbar.
    #[must_use]
    pub fn with_navbar(mut self) -> Self {
        self.add_element(Target::Navbar);
        self
    }

    /// Adds the scroll progress bar.
    #[must_use]
    pub fn with_progress_bar(mut self) -> Self {
        self.add_element(Target::ProgressBar);
        self
    }

    /// Adds the scroll-to-top button.
    #[must_use]
    pub fn with_scroll_top(mut self) -> Self {
        self.add_element(Target::ScrollTop);
        self
    }

    /// Adds sections as `(id, top offset)` pairs in document order.
    ///
    /// Rebuilds the reactor, so call it before registering reveals.
    #[must_use]
    pub fn with_sections<'a>(mut self, sections: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        for (id, top) in sections {
            self.section_ids.push(id.into());
            self.section_tops.push(top);
        }
        self.rebuild();
        self
    }

    /// Adds navigation links by href, in document order.
    ///
    /// Rebuilds the reactor, so call it before registering reveals.
    #[must_use]
    pub fn with_nav_links<'a>(mut self, hrefs: impl IntoIterator<Item = &'a str>) -> Self {
        for href in hrefs {
            self.add_element(Target::NavLink(self.link_hrefs.len()));
            self.link_hrefs.push(href.into());
        }
        self.rebuild();
        self
    }

    fn rebuild(&mut self) {
        self.reactor = Reactor::new(self.config)
            .with_sections(self.section_ids.iter().cloned())
            .with_nav_links(self.link_hrefs.iter().map(String::as_str));
    }

    fn add_element(&mut self, target: Target) {
        if self.element(target).is_none() {
            self.elements.push((target, SimElement::default()));
        }
    }

    /// Registers one reveal group whose elements sit at `rects`.
    ///
    /// Applies the hidden initial styles. Visibility-triggered elements are
    /// watched and revealed by [`scroll_to`](Self::scroll_to) once they
    /// cross; load-triggered ones wait for [`load`](Self::load).
    pub fn register_reveal(&mut self, group: RevealGroup, rects: &[Rect]) -> Vec<RevealId> {
        let (ids, setup) = self.reactor.register_reveal(group, rects.len());
        for (&id, &rect) in ids.iter().zip(rects) {
            self.add_element(Target::Reveal(id));
            if let RevealTrigger::Visibility(options) = group.trigger {
                self.watched.push(Watched { id, rect, options });
            }
        }
        self.apply(&setup);
        ids
    }

    // -- signals ----------------------------------------------------------

    /// Scrolls to `offset`, clamped to the scrollable range, then delivers
    /// visibility crossings for watched elements now in view.
    pub fn scroll_to(&mut self, offset: f64) {
        let max = (self.scroll_height - self.viewport.height).max(0.0);
        self.offset = offset.clamp(0.0, max);
        let sample = ScrollSample::new(self.offset, self.scroll_height, self.viewport.height);
        let mut tracer = Tracer::new(&mut self.sink);
        let changes = self
            .reactor
            .on_scroll(self.clock, &sample, &self.section_tops, &mut tracer);
        self.apply(&changes);
        self.check_visibility();
    }

    /// Sends a raw scroll sample, bypassing clamping and visibility checks.
    pub fn scroll_sample(&mut self, sample: ScrollSample) {
        self.offset = sample.offset;
        let mut tracer = Tracer::new(&mut self.sink);
        let changes = self
            .reactor
            .on_scroll(self.clock, &sample, &self.section_tops, &mut tracer);
        self.apply(&changes);
    }

    /// Delivers a visibility crossing for `id` directly.
    pub fn cross(&mut self, id: RevealId) {
        let mut tracer = Tracer::new(&mut self.sink);
        let changes = self.reactor.on_visibility(self.clock, id, &mut tracer);
        self.apply(&changes);
    }

    /// Delivers an image `load` event for `id`.
    pub fn load(&mut self, id: RevealId) {
        self.cross(id);
    }

    /// Moves a section's top offset, as a layout change would.
    pub fn move_section(&mut self, index: usize, top: f64) {
        if let Some(t) = self.section_tops.get_mut(index) {
            *t = top;
        }
    }

    /// Delivers a window `resize` event and arms its debounce timer.
    pub fn resize(&mut self) {
        let mut tracer = Tracer::new(&mut self.sink);
        let ticket = self.reactor.on_resize(self.clock, &mut tracer);
        if let Some(cancelled) = ticket.cancels {
            self.timers.retain(|t| t.token != cancelled);
        }
        self.timers.push(Timer {
            due: ticket.due,
            token: ticket.token,
        });
    }

    /// Advances the clock by `by`, firing due timers in order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.clock.saturating_add(by);
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= until)
                .min_by_key(|(_, t)| t.due)
                .map(|(i, _)| i);
            let Some(i) = next else {
                break;
            };
            let timer = self.timers.remove(i);
            self.clock = timer.due;
            let mut tracer = Tracer::new(&mut self.sink);
            let changes = self
                .reactor
                .on_resize_timer(self.clock, timer.token, &mut tracer);
            self.apply(&changes);
        }
        self.clock = until;
    }

    fn check_visibility(&mut self) {
        let viewport = Rect::from_origin_size((0.0, self.offset), self.viewport);
        let crossed: Vec<RevealId> = self
            .watched
            .iter()
            .filter(|w| crossing(w.rect, viewport, &w.options))
            .map(|w| w.id)
            .collect();
        for id in crossed {
            self.cross(id);
        }
    }

    // -- queries ----------------------------------------------------------

    /// The element bound to `target`, if the page has one.
    #[must_use]
    pub fn element(&self, target: Target) -> Option<&SimElement> {
        self.elements
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, el)| el)
    }

    /// Whether `target` exists and carries `class`.
    #[must_use]
    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.element(target).is_some_and(|el| el.has_class(class))
    }

    /// The inline `property` of `target`, if set.
    #[must_use]
    pub fn style(&self, target: Target, property: &str) -> Option<&str> {
        self.element(target)?.style(property)
    }

    /// Whether `id` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.reactor.reveals().is_revealed(id)
    }

    /// Whether `id` is still being watched for crossings.
    #[must_use]
    pub fn is_watched(&self, id: RevealId) -> bool {
        self.watched.iter().any(|w| w.id == id)
    }

    /// The active section's id.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.reactor.active_section_id()
    }

    /// Indices of nav links carrying the active class.
    #[must_use]
    pub fn active_links(&self) -> Vec<usize> {
        (0..self.link_hrefs.len())
            .filter(|&i| {
                self.has_class(
                    Target::NavLink(i),
                    vitrine_core::reactor::NAV_ACTIVE_CLASS,
                )
            })
            .collect()
    }

    /// Times at which downstream consumers were told to recompute.
    #[must_use]
    pub fn resize_notifications(&self) -> &[HostTime] {
        &self.resizes
    }

    /// Armed timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Non-empty batches applied so far.
    #[must_use]
    pub fn batches_applied(&self) -> usize {
        self.applied
    }

    /// Current clock.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.clock
    }

    /// The driven reactor.
    #[must_use]
    pub fn reactor(&self) -> &Reactor {
        &self.reactor
    }

    /// The trace sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: TraceSink> Presenter for SimPage<S> {
    fn apply(&mut self, changes: &Changes) {
        if changes.is_empty() {
            return;
        }
        self.applied += 1;

        for change in &changes.styles {
            if let Some((_, el)) = self.elements.iter_mut().find(|(t, _)| *t == change.target) {
                el.set_style(change.property, &change.value);
            }
        }
        for change in &changes.classes {
            if let Some((_, el)) = self.elements.iter_mut().find(|(t, _)| *t == change.target) {
                el.set_class(change.class, change.enabled);
            }
        }
        self.watched.retain(|w| !changes.unobserve.contains(&w.id));
        if changes.resized {
            self.resizes.push(self.clock);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_class_toggle_is_idempotent() {
        let mut el = SimElement::default();
        el.set_class("active", true);
        el.set_class("active", true);
        assert!(el.has_class("active"));
        el.set_class("active", false);
        el.set_class("active", false);
        assert!(!el.has_class("active"));
        assert!(el.classes.is_empty(), "no duplicate entries left behind");
    }

    #[test]
    fn element_style_overwrites() {
        let mut el = SimElement::default();
        el.set_style("width", "10%");
        el.set_style("width", "20%");
        assert_eq!(el.style("width"), Some("20%"));
        assert_eq!(el.styles.len(), 1);
    }

    #[test]
    fn advance_without_timers_moves_clock() {
        let mut page = SimPage::new(ReactorConfig::portfolio());
        page.advance(Duration::from_millis(40));
        assert_eq!(page.now(), HostTime(40_000));
        assert!(page.resize_notifications().is_empty());
    }

    #[test]
    fn scroll_clamps_to_range() {
        let mut page = SimPage::new(ReactorConfig::portfolio())
            .with_progress_bar()
            .with_scroll_height(1800.0)
            .with_viewport(1000.0, 800.0);
        page.scroll_to(5000.0);
        assert_eq!(page.style(Target::ProgressBar, "width"), Some("100%"));
        page.scroll_to(-20.0);
        assert_eq!(page.style(Target::ProgressBar, "width"), Some("0%"));
    }
}
