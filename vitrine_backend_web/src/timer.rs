// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` wrapper.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use vitrine_core::time::Duration;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A pending `setTimeout` callback.
///
/// Dropping the value clears the timeout, so replacing a stored `Timeout`
/// cancels the previous one. Keep it alive until it has fired.
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Runs `callback` once after `wait`.
    pub fn once(wait: Duration, callback: impl FnOnce() + 'static) -> Self {
        let closure = Closure::once(callback);
        let millis = i32::try_from(wait.as_millis()).unwrap_or(i32::MAX);
        let id = set_timeout(closure.as_ref().unchecked_ref(), millis);
        Self {
            id,
            _closure: closure,
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        clear_timeout(self.id);
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout").field("id", &self.id).finish_non_exhaustive()
    }
}
