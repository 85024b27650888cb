// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the reactor and the page it drives.
//!
//! The reactor never touches the page. Each signal handler returns a
//! [`Changes`] batch describing class and style mutations on abstract
//! [`Target`]s, and a [`Presenter`] applies the batch in one step. The web
//! backend's presenter writes to DOM elements; the simulated page in
//! `vitrine_harness` records the result for assertions.
//!
//! # Signal loop pseudocode
//!
//! ```rust,ignore
//! fn on_scroll_event() {
//!     let sample = read_scroll_sample();
//!     let tops = read_section_tops(); // re-read every time, never cached
//!     let changes = reactor.on_scroll(&sample, &tops, &mut tracer);
//!     presenter.apply(&changes);
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::reveal::{RevealId, RevealStyle};

/// An element the reactor knows how to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The navigation bar.
    Navbar,
    /// The scroll progress bar.
    ProgressBar,
    /// The scroll-to-top button.
    ScrollTop,
    /// A navigation link, by document-order index.
    NavLink(usize),
    /// A registered reveal element.
    Reveal(RevealId),
}

/// Sets one inline style property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleChange {
    /// Element to modify.
    pub target: Target,
    /// CSS property name.
    pub property: &'static str,
    /// New value.
    pub value: String,
}

/// Adds or removes one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassChange {
    /// Element to modify.
    pub target: Target,
    /// Class name.
    pub class: &'static str,
    /// `true` to add, `false` to remove.
    pub enabled: bool,
}

/// Everything one signal changes on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Inline style writes, in order.
    pub styles: Vec<StyleChange>,
    /// Class toggles, in order.
    pub classes: Vec<ClassChange>,
    /// Reveal elements the host should stop observing.
    pub unobserve: Vec<RevealId>,
    /// Downstream size-dependent consumers must recompute.
    pub resized: bool,
}

impl Changes {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if applying the batch would do nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.classes.is_empty() && self.unobserve.is_empty() && !self.resized
    }

    /// Queues an inline style write.
    pub fn set_style(&mut self, target: Target, property: &'static str, value: impl Into<String>) {
        self.styles.push(StyleChange {
            target,
            property,
            value: value.into(),
        });
    }

    /// Queues a class toggle.
    pub fn set_class(&mut self, target: Target, class: &'static str, enabled: bool) {
        self.classes.push(ClassChange {
            target,
            class,
            enabled,
        });
    }

    /// Queues every property of a reveal style.
    pub fn push_reveal_style(&mut self, id: RevealId, style: &RevealStyle) {
        for (property, value) in &style.properties {
            self.set_style(Target::Reveal(id), property, value.clone());
        }
    }

    /// Appends another batch.
    pub fn extend(&mut self, other: Self) {
        self.styles.extend(other.styles);
        self.classes.extend(other.classes);
        self.unobserve.extend(other.unobserve);
        self.resized |= other.resized;
    }
}

/// Applies [`Changes`] to a concrete page.
///
/// Implementations must treat targets they cannot resolve (markup without a
/// navbar, a link index past the end) as silent no-ops.
pub trait Presenter {
    /// Applies the batch.
    fn apply(&mut self, changes: &Changes);
}
