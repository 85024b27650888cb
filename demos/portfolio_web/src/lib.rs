// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio pages driven by `vitrine_backend_web`.
//!
//! One module serves both page templates. The landing page is recognised by
//! its backdrop canvas, the project detail page by its gallery. Every
//! component installs on its own: a failure (no WebGL2, no lightbox markup)
//! is reported through the trace sink and the rest of the page still works.
//!
//! Build with: `wasm-pack build --target web demos/portfolio_web`
//!
//! Then load the generated module from the page's `index.html` or
//! `project.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Document;

use vitrine_backend_web::{
    ConsoleSink, Listener, ResizeHub, SharedSink, install_anchors, install_backdrop,
    install_lightbox, install_link_notices, install_reactor, install_read_more, page_load_time,
};
use vitrine_core::backdrop::BackdropConfig;
use vitrine_core::config::{PageMarkup, ReactorConfig};
use vitrine_core::trace::{Component, PageReadyEvent, Tracer};

/// In-page anchors that scroll smoothly instead of jumping.
const ANCHORS: &str = "a[href^=\"#\"]";
/// Gallery images that open in the lightbox.
const GALLERY_IMAGES: &str = ".gallery-item img";
/// Paragraphs that get read-more toggles when enabled.
const CHALLENGE_TEXT: &str = ".challenge-item p";

fn page_markup(document: &Document) -> PageMarkup {
    let home = PageMarkup::home();
    let is_home = home
        .backdrop_canvas
        .is_some_and(|id| document.get_element_by_id(id).is_some());
    if is_home { home } else { PageMarkup::detail() }
}

fn console_sink() -> SharedSink {
    Rc::new(RefCell::new(ConsoleSink::new()))
}

/// Reports an installer's outcome and keeps a successful handle alive for
/// the lifetime of the page.
fn settle<T>(sink: &SharedSink, component: Component, result: Result<T, JsValue>) {
    let message = match result {
        Ok(handle) => {
            core::mem::forget(handle);
            None
        }
        Err(err) => Some(
            err.as_string()
                .unwrap_or_else(|| format!("{err:?}")),
        ),
    };
    let Ok(mut sink) = sink.try_borrow_mut() else {
        return;
    };
    let mut tracer = Tracer::new(&mut *sink);
    match message {
        None => tracer.component_installed(component),
        Some(message) => tracer.component_failed(component, &message),
    }
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let markup = page_markup(&document);
    let sink = console_sink();
    let resize = ResizeHub::new();

    settle(
        &sink,
        Component::Reactor,
        install_reactor(
            &markup,
            ReactorConfig::portfolio(),
            Rc::clone(&sink),
            resize.clone(),
        ),
    );

    if let Some(canvas) = markup.backdrop_canvas {
        settle(
            &sink,
            Component::Backdrop,
            install_backdrop(canvas, BackdropConfig::portfolio(), &resize),
        );
    } else {
        settle(&sink, Component::Lightbox, install_lightbox(GALLERY_IMAGES));
    }

    if let Some(links) = markup.placeholder_links {
        settle(&sink, Component::LinkNotice, install_link_notices(links));
    }
    if let Some(paragraphs) = markup.read_more {
        settle(&sink, Component::ReadMore, install_read_more(paragraphs));
    }
    settle(&sink, Component::Anchors, install_anchors(ANCHORS));

    let ready_sink = Rc::clone(&sink);
    let on_load = Listener::new(&window, "load", move |_| {
        let Some(load_time) = page_load_time() else {
            return;
        };
        if let Ok(mut sink) = ready_sink.try_borrow_mut() {
            Tracer::new(&mut *sink).page_ready(&PageReadyEvent { load_time });
        }
    })?;
    core::mem::forget(on_load);

    Ok(())
}

/// Adds read-more toggles to long paragraphs.
///
/// Off by default; pages call this after the module starts. `selector`
/// defaults to the challenge paragraphs of the detail page.
#[wasm_bindgen]
pub fn enable_read_more(selector: Option<String>) {
    let sink = console_sink();
    let selector = selector.as_deref().unwrap_or(CHALLENGE_TEXT);
    settle(&sink, Component::ReadMore, install_read_more(selector));
}
