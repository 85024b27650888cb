// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` wrapper.

use alloc::boxed::Box;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use vitrine_core::config::ObserverOptions;

type EntriesClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Calls back with every observed element that starts intersecting the
/// viewport according to [`ObserverOptions`].
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: EntriesClosure,
}

impl VisibilityObserver {
    /// Creates an observer. Fails when the browser has no
    /// `IntersectionObserver`.
    pub fn new(
        options: &ObserverOptions,
        mut on_cross: impl FnMut(&Element) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    on_cross(&entry.target());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin_css());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Starts observing `el`.
    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }

    /// Stops observing `el`.
    pub fn unobserve(&self, el: &Element) {
        self.observer.unobserve(el);
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl core::fmt::Debug for VisibilityObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityObserver").finish_non_exhaustive()
    }
}
