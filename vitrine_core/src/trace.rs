// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reactor and page components.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! reactor and the component installers call. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::debounce::DebounceToken;
use crate::reveal::RevealId;
use crate::scroll::ScrollState;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// An independently installed page component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// Scroll/visibility reactor (navbar, progress, sections, reveals).
    Reactor,
    /// Animated 3D backdrop.
    Backdrop,
    /// Image lightbox.
    Lightbox,
    /// Smooth scrolling for in-page anchors.
    Anchors,
    /// Placeholder link notices.
    LinkNotice,
    /// Read-more truncation.
    ReadMore,
}

impl Component {
    /// Short lowercase name for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reactor => "reactor",
            Self::Backdrop => "backdrop",
            Self::Lightbox => "lightbox",
            Self::Anchors => "anchors",
            Self::LinkNotice => "link-notice",
            Self::ReadMore => "read-more",
        }
    }
}

/// Stage of a debounced resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizePhase {
    /// A resize event armed (or re-armed) the timer.
    Triggered,
    /// The quiet window elapsed and consumers were notified.
    Fired,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after every scroll signal.
#[derive(Clone, Copy, Debug)]
pub struct ScrollEvent {
    /// Host time of the signal.
    pub at: HostTime,
    /// Raw scroll offset.
    pub offset: f64,
    /// Derived state.
    pub state: ScrollState,
}

/// Emitted when the active section changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionChangeEvent {
    /// Host time of the signal.
    pub at: HostTime,
    /// Previous active section.
    pub from: Option<usize>,
    /// New active section.
    pub to: Option<usize>,
}

/// Emitted when an element is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    /// Host time of the signal.
    pub at: HostTime,
    /// Revealed element.
    pub id: RevealId,
    /// Index of the element's group.
    pub group: usize,
    /// Transition delay of the element.
    pub delay: Duration,
}

/// Emitted for each stage of a debounced resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// Host time of the stage.
    pub at: HostTime,
    /// Which stage.
    pub phase: ResizePhase,
    /// Scheduled execution this stage belongs to.
    pub token: DebounceToken,
}

/// Emitted once the page finished loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageReadyEvent {
    /// Time from navigation start to `DOMContentLoaded` end.
    pub load_time: Duration,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after each scroll signal.
    fn on_scroll(&mut self, e: &ScrollEvent) {
        _ = e;
    }

    /// Called when the active section changes.
    fn on_section_change(&mut self, e: &SectionChangeEvent) {
        _ = e;
    }

    /// Called when an element is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called for each debounced resize stage.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called when a component finished installing.
    fn on_component_installed(&mut self, component: Component) {
        _ = component;
    }

    /// Called when a component failed to install. Other components are
    /// unaffected.
    fn on_component_failed(&mut self, component: Component, message: &str) {
        _ = (component, message);
    }

    /// Called once the page has loaded.
    fn on_page_ready(&mut self, e: &PageReadyEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Expands to a `Tracer` method that forwards to one sink method.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $method:ident($($arg:ident: $ty:ty),*)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, $($arg: $ty),*) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method($($arg),*);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = ($($arg),*);
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`ScrollEvent`].
        scroll => on_scroll(e: &ScrollEvent)
    );
    forward!(
        /// Emits a [`SectionChangeEvent`].
        section_change => on_section_change(e: &SectionChangeEvent)
    );
    forward!(
        /// Emits a [`RevealEvent`].
        reveal => on_reveal(e: &RevealEvent)
    );
    forward!(
        /// Emits a [`ResizeEvent`].
        resize => on_resize(e: &ResizeEvent)
    );
    forward!(
        /// Reports a successfully installed component.
        component_installed => on_component_installed(component: Component)
    );
    forward!(
        /// Reports a component that failed to install.
        component_failed => on_component_failed(component: Component, message: &str)
    );
    forward!(
        /// Emits a [`PageReadyEvent`].
        page_ready => on_page_ready(e: &PageReadyEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scroll() -> ScrollEvent {
        ScrollEvent {
            at: HostTime(1_000),
            offset: 420.0,
            state: ScrollState {
                progress: 21.0,
                navbar_scrolled: true,
                scroll_top_visible: true,
                active_section: Some(1),
            },
        }
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_scroll(&sample_scroll());
        sink.on_component_failed(Component::Backdrop, "no webgl2");
        sink.on_page_ready(&PageReadyEvent {
            load_time: Duration::from_millis(120),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.scroll(&sample_scroll());
        tracer.component_installed(Component::Reactor);
    }

    #[test]
    fn component_names() {
        assert_eq!(Component::LinkNotice.as_str(), "link-notice");
        assert_eq!(Component::Reactor.as_str(), "reactor");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            failures: Vec<Component>,
            offsets: Vec<f64>,
        }
        impl TraceSink for RecordingSink {
            fn on_scroll(&mut self, e: &ScrollEvent) {
                self.offsets.push(e.offset);
            }
            fn on_component_failed(&mut self, component: Component, _message: &str) {
                self.failures.push(component);
            }
        }

        let mut sink = RecordingSink {
            failures: Vec::new(),
            offsets: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.scroll(&sample_scroll());
        tracer.component_failed(Component::Lightbox, "missing #lightbox");
        drop(tracer);
        assert_eq!(sink.offsets, [420.0]);
        assert_eq!(sink.failures, [Component::Lightbox]);
    }
}
