// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for vitrine.
//!
//! This crate connects [`vitrine_core`] to browser APIs:
//!
//! - [`install_reactor`]: scroll, resize and `IntersectionObserver`
//!   subscriptions feeding a [`Reactor`](vitrine_core::reactor::Reactor),
//!   with a [`DomPresenter`] as the single apply step
//! - [`install_backdrop`]: WebGL2 backdrop driven by a [`RafLoop`]
//! - [`install_lightbox`], [`install_link_notices`], [`install_read_more`],
//!   [`install_anchors`]: small click-driven widgets
//! - [`ConsoleSink`]: a [`TraceSink`] writing to the browser console
//!
//! Every installer returns a handle that owns its event listeners. Dropping
//! the handle detaches them; pages that live forever leak the handle with
//! [`core::mem::forget`].

#![no_std]

extern crate alloc;

mod backdrop;
mod console;
mod dom;
mod listener;
mod observer;
mod page;
mod presenter;
mod raf;
mod timer;
mod widgets;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

pub use backdrop::{BackdropHandle, install_backdrop};
pub use console::ConsoleSink;
pub use listener::Listener;
pub use observer::VisibilityObserver;
pub use page::{ReactorHandle, install_reactor};
pub use presenter::DomPresenter;
pub use raf::RafLoop;
pub use timer::Timeout;
pub use vitrine_core::backend::Presenter;
pub use widgets::{
    AnchorsHandle, LightboxHandle, LinkNoticeHandle, ReadMoreHandle, install_anchors,
    install_lightbox, install_link_notices, install_read_more,
};

use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::TraceSink;

/// A trace sink shared by every installed component.
pub type SharedSink = Rc<RefCell<dyn TraceSink>>;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Time from navigation start to the end of `DOMContentLoaded`, once known.
///
/// Returns `None` before the event has finished or when the Navigation
/// Timing API is unavailable.
#[must_use]
pub fn page_load_time() -> Option<Duration> {
    let timing = web_sys::window()?.performance()?.timing();
    let start = timing.navigation_start();
    let end = timing.dom_content_loaded_event_end();
    if end < start || end == 0.0 {
        return None;
    }
    Some(Duration(HostTime::from_millis_f64(end - start).micros()))
}

/// Fans the debounced resize notification out to size-dependent consumers.
///
/// The reactor's presenter calls [`notify`](Self::notify) when a resize
/// batch is applied; the backdrop subscribes to recompute its aspect.
#[derive(Clone, Default)]
pub struct ResizeHub {
    subscribers: Rc<RefCell<Vec<Box<dyn FnMut()>>>>,
}

impl core::fmt::Debug for ResizeHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeHub")
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl ResizeHub {
    /// Creates a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a consumer. Consumers run in registration order.
    pub fn subscribe(&self, consumer: impl FnMut() + 'static) {
        self.subscribers.borrow_mut().push(Box::new(consumer));
    }

    /// Runs every consumer once.
    ///
    /// Consumers may subscribe while running; new consumers first run on the
    /// next notification.
    pub fn notify(&self) {
        let mut running = core::mem::take(&mut *self.subscribers.borrow_mut());
        for consumer in &mut running {
            consumer();
        }
        let mut subscribers = self.subscribers.borrow_mut();
        let added = core::mem::replace(&mut *subscribers, running);
        subscribers.extend(added);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn consumers_run_in_order() {
        let hub = ResizeHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let log = log.clone();
            hub.subscribe(move || log.borrow_mut().push(n));
        }
        hub.notify();
        hub.notify();
        assert_eq!(*log.borrow(), [0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn subscribing_during_notify_defers_the_new_consumer() {
        let hub = ResizeHub::new();
        let late_runs = Rc::new(Cell::new(0));
        let inner_hub = hub.clone();
        let counter = late_runs.clone();
        let mut subscribed = false;
        hub.subscribe(move || {
            if !subscribed {
                subscribed = true;
                let counter = counter.clone();
                inner_hub.subscribe(move || counter.set(counter.get() + 1));
            }
        });

        hub.notify();
        assert_eq!(late_runs.get(), 0, "added consumer waits for the next resize");
        assert_eq!(hub.subscribers.borrow().len(), 2, "both consumers kept");

        hub.notify();
        assert_eq!(late_runs.get(), 1, "added consumer runs once");
    }
}
