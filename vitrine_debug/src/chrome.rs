// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::ResizePhase;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Each debounced resize becomes a `B`/`E` span from its last trigger to the
/// moment it fired. Install events carry no timestamp and sit at zero.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();
    let mut open_resize = false;

    for recorded in events {
        match recorded {
            RecordedEvent::Scroll(e) => {
                out.push(json!({
                    "ph": "C",
                    "name": "ScrollProgress",
                    "cat": "Reactor",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "progress": e.state.progress,
                    }
                }));
            }
            RecordedEvent::SectionChange(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "SectionChange",
                    "cat": "Reactor",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "from": e.from,
                        "to": e.to,
                    }
                }));
            }
            RecordedEvent::Reveal(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Reveal",
                    "cat": "Reactor",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "id": e.id.0,
                        "group": e.group,
                        "delay_ms": e.delay.as_millis(),
                    }
                }));
            }
            RecordedEvent::Resize(e) => {
                let ph = match e.phase {
                    ResizePhase::Triggered if open_resize => continue,
                    ResizePhase::Triggered => {
                        open_resize = true;
                        "B"
                    }
                    ResizePhase::Fired => {
                        open_resize = false;
                        "E"
                    }
                };
                out.push(json!({
                    "ph": ph,
                    "name": "Resize",
                    "cat": "Reactor",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": 2,
                    "args": {
                        "token": e.token.0,
                    }
                }));
            }
            RecordedEvent::ComponentInstalled(c) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Installed",
                    "cat": "Page",
                    "ts": 0,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "component": c.as_str(),
                    }
                }));
            }
            RecordedEvent::ComponentFailed { component, message } => {
                out.push(json!({
                    "ph": "i",
                    "name": "InstallFailed",
                    "cat": "Page",
                    "ts": 0,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "component": component.as_str(),
                        "message": message,
                    }
                }));
            }
            RecordedEvent::PageReady(e) => {
                out.push(json!({
                    "ph": "X",
                    "name": "PageLoad",
                    "cat": "Page",
                    "ts": 0,
                    "dur": dur_us(e.load_time),
                    "pid": 0,
                    "tid": 0,
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn us(t: HostTime) -> u64 {
    t.micros()
}

fn dur_us(d: Duration) -> u64 {
    d.micros()
}
