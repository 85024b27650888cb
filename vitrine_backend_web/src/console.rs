// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`TraceSink`] that writes to the browser console.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::JsValue;
use web_sys::console;

use vitrine_core::trace::{
    Component, PageReadyEvent, ResizeEvent, ResizePhase, RevealEvent, ScrollEvent,
    SectionChangeEvent, TraceSink,
};

/// Logs trace events with `console.log`, and component failures with
/// `console.warn`.
///
/// Scroll events fire on every scroll and are only logged when `verbose` is
/// set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Also log every scroll event.
    pub verbose: bool,
}

impl ConsoleSink {
    /// Creates a sink that skips per-scroll events.
    #[must_use]
    pub const fn new() -> Self {
        Self { verbose: false }
    }

    /// Creates a sink that logs every event.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

fn log(line: &str) {
    console::log_1(&JsValue::from_str(line));
}

fn section(idx: Option<usize>) -> String {
    idx.map_or_else(|| String::from("none"), |i| format!("#{i}"))
}

impl TraceSink for ConsoleSink {
    fn on_scroll(&mut self, e: &ScrollEvent) {
        if self.verbose {
            log(&format!(
                "[vitrine] scroll offset={} progress={:.1}% navbar={} top-button={} section={}",
                e.offset,
                e.state.progress,
                e.state.navbar_scrolled,
                e.state.scroll_top_visible,
                section(e.state.active_section),
            ));
        }
    }

    fn on_section_change(&mut self, e: &SectionChangeEvent) {
        log(&format!(
            "[vitrine] section {} -> {}",
            section(e.from),
            section(e.to)
        ));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        if self.verbose {
            log(&format!(
                "[vitrine] reveal id={} group={} delay={}ms",
                e.id.0,
                e.group,
                e.delay.as_millis()
            ));
        }
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        if self.verbose || e.phase == ResizePhase::Fired {
            let phase = match e.phase {
                ResizePhase::Triggered => "triggered",
                ResizePhase::Fired => "fired",
            };
            log(&format!("[vitrine] resize {phase} token={}", e.token.0));
        }
    }

    fn on_component_installed(&mut self, component: Component) {
        log(&format!("[vitrine] {} ready", component.as_str()));
    }

    fn on_component_failed(&mut self, component: Component, message: &str) {
        console::warn_1(&JsValue::from_str(&format!(
            "[vitrine] {} unavailable: {message}",
            component.as_str()
        )));
    }

    fn on_page_ready(&mut self, e: &PageReadyEvent) {
        log(&format!("Page loaded in {}ms", e.load_time.as_millis()));
    }
}
