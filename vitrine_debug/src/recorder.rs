// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event, in
//! arrival order, as a [`RecordedEvent`]. Failure messages are copied into
//! owned strings; everything else is `Copy` and stored as-is.

use vitrine_core::trace::{
    Component, PageReadyEvent, ResizeEvent, ResizePhase, RevealEvent, ScrollEvent,
    SectionChangeEvent, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A scroll signal.
    Scroll(ScrollEvent),
    /// An active-section change.
    SectionChange(SectionChangeEvent),
    /// A reveal.
    Reveal(RevealEvent),
    /// A debounced resize stage.
    Resize(ResizeEvent),
    /// A component installed.
    ComponentInstalled(Component),
    /// A component failed to install.
    ComponentFailed {
        /// The component.
        component: Component,
        /// Why it failed.
        message: String,
    },
    /// The page finished loading.
    PageReady(PageReadyEvent),
}

/// A [`TraceSink`] that records events into a `Vec`.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    // -- queries -----------------------------------------------------------

    /// Sections entered, in order. `None` marks leaving every section.
    #[must_use]
    pub fn section_path(&self) -> Vec<Option<usize>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::SectionChange(c) => Some(c.to),
                _ => None,
            })
            .collect()
    }

    /// Revealed elements, in reveal order.
    #[must_use]
    pub fn reveals(&self) -> Vec<RevealEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Reveal(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Number of resize events at `phase`.
    #[must_use]
    pub fn resize_count(&self, phase: ResizePhase) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Resize(r) if r.phase == phase))
            .count()
    }

    /// Components that failed to install, with their messages.
    #[must_use]
    pub fn failures(&self) -> Vec<(Component, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::ComponentFailed { component, message } => {
                    Some((*component, message.as_str()))
                }
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for RecorderSink {
    fn on_scroll(&mut self, e: &ScrollEvent) {
        self.events.push(RecordedEvent::Scroll(*e));
    }

    fn on_section_change(&mut self, e: &SectionChangeEvent) {
        self.events.push(RecordedEvent::SectionChange(*e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.events.push(RecordedEvent::Reveal(*e));
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.events.push(RecordedEvent::Resize(*e));
    }

    fn on_component_installed(&mut self, component: Component) {
        self.events.push(RecordedEvent::ComponentInstalled(component));
    }

    fn on_component_failed(&mut self, component: Component, message: &str) {
        self.events.push(RecordedEvent::ComponentFailed {
            component,
            message: message.to_owned(),
        });
    }

    fn on_page_ready(&mut self, e: &PageReadyEvent) {
        self.events.push(RecordedEvent::PageReady(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::debounce::DebounceToken;
    use vitrine_core::reveal::RevealId;
    use vitrine_core::time::{Duration, HostTime};

    #[test]
    fn records_in_arrival_order() {
        let mut rec = RecorderSink::new();
        rec.on_component_installed(Component::Reactor);
        rec.on_section_change(&SectionChangeEvent {
            at: HostTime(10),
            from: None,
            to: Some(0),
        });
        rec.on_section_change(&SectionChangeEvent {
            at: HostTime(20),
            from: Some(0),
            to: Some(2),
        });
        rec.on_component_failed(Component::Backdrop, "WebGL2 unavailable");

        assert_eq!(rec.events().len(), 4);
        assert!(matches!(
            rec.events()[0],
            RecordedEvent::ComponentInstalled(Component::Reactor)
        ));
        assert_eq!(rec.section_path(), [Some(0), Some(2)]);
        assert_eq!(
            rec.failures(),
            [(Component::Backdrop, "WebGL2 unavailable")]
        );
    }

    #[test]
    fn resize_counts_by_phase() {
        let mut rec = RecorderSink::new();
        for i in 0..3 {
            rec.on_resize(&ResizeEvent {
                at: HostTime(i * 50_000),
                phase: ResizePhase::Triggered,
                token: DebounceToken(i),
            });
        }
        rec.on_resize(&ResizeEvent {
            at: HostTime(350_000),
            phase: ResizePhase::Fired,
            token: DebounceToken(2),
        });
        assert_eq!(rec.resize_count(ResizePhase::Triggered), 3);
        assert_eq!(rec.resize_count(ResizePhase::Fired), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut rec = RecorderSink::new();
        rec.on_reveal(&RevealEvent {
            at: HostTime(0),
            id: RevealId(0),
            group: 0,
            delay: Duration::from_millis(100),
        });
        assert_eq!(rec.reveals().len(), 1);
        rec.clear();
        assert!(rec.events().is_empty());
        assert!(rec.into_events().is_empty());
    }
}
