// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM presenter.
//!
//! Resolves the reactor's abstract [`Target`]s to live elements and applies
//! [`Changes`] batches as inline styles and class toggles.

use alloc::rc::Rc;
use alloc::vec::Vec;

use vitrine_core::backend::{Changes, Presenter, Target};
use vitrine_core::reveal::RevealId;
use web_sys::HtmlElement;

use crate::ResizeHub;
use crate::observer::VisibilityObserver;

struct RevealSlot {
    element: HtmlElement,
    observer: Option<Rc<VisibilityObserver>>,
}

/// Applies reactor [`Changes`] to DOM elements.
///
/// Targets without an element (a page without a navbar, a link index past
/// the end) are skipped.
#[derive(Default)]
pub struct DomPresenter {
    navbar: Option<HtmlElement>,
    progress_bar: Option<HtmlElement>,
    scroll_top: Option<HtmlElement>,
    links: Vec<HtmlElement>,
    reveals: Vec<Option<RevealSlot>>,
    resize: Option<ResizeHub>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("navbar", &self.navbar.is_some())
            .field("progress_bar", &self.progress_bar.is_some())
            .field("scroll_top", &self.scroll_top.is_some())
            .field("links_len", &self.links.len())
            .field("reveals_len", &self.reveals.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter that knows no elements yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the navbar element.
    pub fn set_navbar(&mut self, el: Option<HtmlElement>) {
        self.navbar = el;
    }

    /// Sets the progress bar element.
    pub fn set_progress_bar(&mut self, el: Option<HtmlElement>) {
        self.progress_bar = el;
    }

    /// Sets the scroll-to-top button.
    pub fn set_scroll_top(&mut self, el: Option<HtmlElement>) {
        self.scroll_top = el;
    }

    /// Sets the navigation links in document order.
    pub fn set_nav_links(&mut self, links: Vec<HtmlElement>) {
        self.links = links;
    }

    /// Binds a reveal id to its element and the observer watching it.
    pub fn bind_reveal(
        &mut self,
        id: RevealId,
        element: HtmlElement,
        observer: Option<Rc<VisibilityObserver>>,
    ) {
        let slot = id.index();
        if self.reveals.len() <= slot {
            self.reveals.resize_with(slot + 1, || None);
        }
        self.reveals[slot] = Some(RevealSlot { element, observer });
    }

    /// Notifies `hub` whenever a batch reports a debounced resize.
    pub fn set_resize_hub(&mut self, hub: ResizeHub) {
        self.resize = Some(hub);
    }

    /// The element bound to `target`, if any.
    #[must_use]
    pub fn element(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Navbar => self.navbar.as_ref(),
            Target::ProgressBar => self.progress_bar.as_ref(),
            Target::ScrollTop => self.scroll_top.as_ref(),
            Target::NavLink(i) => self.links.get(i),
            Target::Reveal(id) => self.reveal_slot(id).map(|slot| &slot.element),
        }
    }

    fn reveal_slot(&self, id: RevealId) -> Option<&RevealSlot> {
        self.reveals.get(id.index())?.as_ref()
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, changes: &Changes) {
        for change in &changes.styles {
            if let Some(el) = self.element(change.target) {
                let _ = el.style().set_property(change.property, &change.value);
            }
        }

        for change in &changes.classes {
            if let Some(el) = self.element(change.target) {
                let _ = el.class_list().toggle_with_force(change.class, change.enabled);
            }
        }

        for &id in &changes.unobserve {
            if let Some(slot) = self.reveal_slot(id)
                && let Some(observer) = &slot.observer
            {
                observer.unobserve(&slot.element);
            }
        }

        if changes.resized
            && let Some(hub) = &self.resize
        {
            hub.notify();
        }
    }
}
