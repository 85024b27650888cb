// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::{
    Component, PageReadyEvent, ResizeEvent, ResizePhase, RevealEvent, ScrollEvent,
    SectionChangeEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Whether scroll samples are printed. They arrive on every scroll event.
    scrolls: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("scrolls", &self.scrolls)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            scrolls: false,
        }
    }

    /// Also prints every scroll sample.
    #[must_use]
    pub fn with_scrolls(mut self) -> Self {
        self.scrolls = true;
        self
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.micros() as f64 / 1000.0
}

fn dur_ms(d: Duration) -> f64 {
    d.micros() as f64 / 1000.0
}

fn section(s: Option<usize>) -> String {
    s.map_or_else(|| "-".to_owned(), |i| i.to_string())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_scroll(&mut self, e: &ScrollEvent) {
        if !self.scrolls {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[scroll] at={:.1}ms offset={:.0} progress={:.1}% navbar={} top={} section={}",
            ms(e.at),
            e.offset,
            e.state.progress,
            e.state.navbar_scrolled,
            e.state.scroll_top_visible,
            section(e.state.active_section),
        );
    }

    fn on_section_change(&mut self, e: &SectionChangeEvent) {
        let _ = writeln!(
            self.writer,
            "[section] at={:.1}ms {} -> {}",
            ms(e.at),
            section(e.from),
            section(e.to),
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] at={:.1}ms id={} group={} delay={:.0}ms",
            ms(e.at),
            e.id.0,
            e.group,
            dur_ms(e.delay),
        );
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        let phase = match e.phase {
            ResizePhase::Triggered => "triggered",
            ResizePhase::Fired => "fired",
        };
        let _ = writeln!(
            self.writer,
            "[resize] at={:.1}ms {phase} token={}",
            ms(e.at),
            e.token.0,
        );
    }

    fn on_component_installed(&mut self, component: Component) {
        let _ = writeln!(self.writer, "[install] {} ok", component.as_str());
    }

    fn on_component_failed(&mut self, component: Component, message: &str) {
        let _ = writeln!(
            self.writer,
            "[install] {} FAILED: {message}",
            component.as_str()
        );
    }

    fn on_page_ready(&mut self, e: &PageReadyEvent) {
        let _ = writeln!(
            self.writer,
            "[ready] load={:.0}ms",
            dur_ms(e.load_time)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::scroll::ScrollState;

    fn scroll_event() -> ScrollEvent {
        ScrollEvent {
            at: HostTime(2_500),
            offset: 320.0,
            state: ScrollState {
                progress: 40.0,
                navbar_scrolled: true,
                scroll_top_visible: true,
                active_section: None,
            },
        }
    }

    #[test]
    fn section_change_line() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_section_change(&SectionChangeEvent {
            at: HostTime(1_000),
            from: None,
            to: Some(1),
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[section]"), "got: {output}");
        assert!(output.contains("- -> 1"), "got: {output}");
    }

    #[test]
    fn scrolls_are_opt_in() {
        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new());
        quiet.on_scroll(&scroll_event());
        assert!(quiet.into_inner().is_empty(), "scroll lines are off by default");

        let mut loud = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_scrolls();
        loud.on_scroll(&scroll_event());
        let output = String::from_utf8(loud.into_inner()).unwrap();
        assert!(output.contains("progress=40.0%"), "got: {output}");
        assert!(output.contains("section=-"), "got: {output}");
    }

    #[test]
    fn failure_line_names_component() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_component_failed(Component::Lightbox, "missing #lightbox");
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[install] lightbox FAILED: missing #lightbox\n");
    }
}
