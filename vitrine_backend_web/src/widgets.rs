// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-driven page widgets: lightbox, placeholder link notices, read-more
//! toggles and smooth in-page anchors.
//!
//! Each installer is independent of the reactor and of the others.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{
    Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use vitrine_core::nav::anchor_target;
use vitrine_core::widgets::{
    BODY_OVERFLOW_LOCKED, BODY_OVERFLOW_RESTORED, LIGHTBOX_ACTIVE_CLASS, LinkNotice,
    NOTICE_BACKGROUND, NOTICE_LABEL, NoticeAction, READ_MORE_LIMIT, ReadMore,
};

use crate::dom;
use crate::listener::Listener;
use crate::now;
use crate::timer::Timeout;

// ---------------------------------------------------------------------------
// Lightbox
// ---------------------------------------------------------------------------

/// Element id of the lightbox overlay.
const LIGHTBOX_ID: &str = "lightbox";
/// Element id of the image inside the overlay.
const LIGHTBOX_IMAGE_ID: &str = "lightbox-img";
/// Elements inside the overlay that close it.
const LIGHTBOX_CLOSE_SELECTOR: &str = ".lightbox-close";

struct LightboxView {
    lightbox: vitrine_core::widgets::Lightbox,
    overlay: HtmlElement,
    image: HtmlImageElement,
    body: HtmlElement,
}

impl LightboxView {
    fn open(&mut self, src: &str) {
        self.image.set_src(self.lightbox.open(src));
        let _ = self.overlay.class_list().add_1(LIGHTBOX_ACTIVE_CLASS);
        let _ = self.body.style().set_property("overflow", BODY_OVERFLOW_LOCKED);
    }

    fn close(&mut self) {
        if self.lightbox.close() {
            self.hide();
        }
    }

    fn on_key(&mut self, key: &str) {
        if self.lightbox.on_key(key) {
            self.hide();
        }
    }

    fn hide(&self) {
        let _ = self.overlay.class_list().remove_1(LIGHTBOX_ACTIVE_CLASS);
        let _ = self.body.style().set_property("overflow", BODY_OVERFLOW_RESTORED);
    }
}

/// An installed lightbox.
pub struct LightboxHandle {
    view: Rc<RefCell<LightboxView>>,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for LightboxHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LightboxHandle")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl LightboxHandle {
    /// Shows `src` in the lightbox.
    pub fn open(&self, src: &str) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.open(src);
        }
    }

    /// Closes the lightbox.
    pub fn close(&self) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.close();
        }
    }

    /// Whether an image is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.view
            .try_borrow()
            .is_ok_and(|view| view.lightbox.is_open())
    }
}

/// Installs the lightbox on `#lightbox` / `#lightbox-img`.
///
/// Clicking an image matching `images` opens it. Clicking the overlay
/// backdrop or a `.lightbox-close` element closes it, as does Escape.
pub fn install_lightbox(images: &str) -> Result<LightboxHandle, JsValue> {
    let document = dom::document()?;
    let overlay = dom::require_id(&document, LIGHTBOX_ID)?;
    let image: HtmlImageElement = dom::require_id(&document, LIGHTBOX_IMAGE_ID)?
        .dyn_into()
        .map_err(|_| JsValue::from_str("#lightbox-img is not an image"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let view = Rc::new(RefCell::new(LightboxView {
        lightbox: vitrine_core::widgets::Lightbox::new(),
        overlay: overlay.clone(),
        image,
        body,
    }));
    let mut listeners = Vec::new();

    for el in dom::query_all(&document, images)? {
        let Ok(img) = el.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let weak = Rc::downgrade(&view);
        let source = img.clone();
        listeners.push(Listener::new(&img, "click", move |_| {
            if let Some(view) = weak.upgrade()
                && let Ok(mut view) = view.try_borrow_mut()
            {
                view.open(&source.src());
            }
        })?);
    }

    {
        let weak = Rc::downgrade(&view);
        let backdrop: Element = overlay.clone().into();
        listeners.push(Listener::new(&overlay, "click", move |e: Event| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let on_backdrop = target == backdrop;
            let on_close = target.closest(LIGHTBOX_CLOSE_SELECTOR).ok().flatten().is_some();
            if (on_backdrop || on_close)
                && let Some(view) = weak.upgrade()
                && let Ok(mut view) = view.try_borrow_mut()
            {
                view.close();
            }
        })?);
    }

    {
        let weak = Rc::downgrade(&view);
        listeners.push(Listener::new(&document, "keydown", move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if let Some(view) = weak.upgrade()
                && let Ok(mut view) = view.try_borrow_mut()
            {
                view.on_key(&key);
            }
        })?);
    }

    Ok(LightboxHandle { view, listeners })
}

// ---------------------------------------------------------------------------
// Placeholder link notices
// ---------------------------------------------------------------------------

struct NoticeSlot {
    notice: LinkNotice,
    link: HtmlElement,
    timer: Option<Timeout>,
}

impl NoticeSlot {
    fn on_click(slot: &Rc<RefCell<Self>>, e: &Event) {
        let Ok(mut s) = slot.try_borrow_mut() else {
            return;
        };
        let href = s.link.get_attribute("href").unwrap_or_default();
        let at = now();
        let html = s.link.inner_html();
        match s.notice.on_click(&href, &html, at) {
            NoticeAction::Follow => {}
            NoticeAction::Suppress => e.prevent_default(),
            NoticeAction::Show { restore_at } => {
                e.prevent_default();
                s.link.set_inner_html(NOTICE_LABEL);
                let _ = s.link.style().set_property("background", NOTICE_BACKGROUND);
                let weak = Rc::downgrade(slot);
                s.timer = Some(Timeout::once(restore_at.saturating_duration_since(at), move || {
                    if let Some(slot) = weak.upgrade()
                        && let Ok(mut s) = slot.try_borrow_mut()
                        && let Some(original) = s.notice.restore()
                    {
                        s.link.set_inner_html(&original);
                        let _ = s.link.style().remove_property("background");
                    }
                }));
            }
        }
    }
}

/// Installed placeholder link notices.
pub struct LinkNoticeHandle {
    slots: Vec<Rc<RefCell<NoticeSlot>>>,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for LinkNoticeHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinkNoticeHandle")
            .field("links", &self.slots.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LinkNoticeHandle {
    /// Number of notices currently showing.
    #[must_use]
    pub fn showing(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.try_borrow().is_ok_and(|s| s.notice.is_showing()))
            .count()
    }
}

/// Makes links matching `selector` whose href is `#` show a notice instead
/// of navigating.
pub fn install_link_notices(selector: &str) -> Result<LinkNoticeHandle, JsValue> {
    let document = dom::document()?;
    let mut slots = Vec::new();
    let mut listeners = Vec::new();
    for link in dom::query_all_html(&document, selector)? {
        let slot = Rc::new(RefCell::new(NoticeSlot {
            notice: LinkNotice::new(),
            link: link.clone(),
            timer: None,
        }));
        let weak = Rc::downgrade(&slot);
        listeners.push(Listener::new(&link, "click", move |e| {
            if let Some(slot) = weak.upgrade() {
                NoticeSlot::on_click(&slot, &e);
            }
        })?);
        slots.push(slot);
    }
    Ok(LinkNoticeHandle { slots, listeners })
}

// ---------------------------------------------------------------------------
// Read more
// ---------------------------------------------------------------------------

const READ_MORE_BUTTON_CSS: &str = "color: #6366f1; background: none; border: none; \
    cursor: pointer; font-weight: 600; margin-left: 5px;";

/// Installed read-more toggles.
pub struct ReadMoreHandle {
    texts: Vec<Rc<RefCell<ReadMore>>>,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for ReadMoreHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadMoreHandle")
            .field("texts", &self.texts.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ReadMoreHandle {
    /// Number of truncated texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Returns `true` if no text needed truncating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Truncates long texts matching `selector` behind a Read More toggle.
pub fn install_read_more(selector: &str) -> Result<ReadMoreHandle, JsValue> {
    let document = dom::document()?;
    let mut texts = Vec::new();
    let mut listeners = Vec::new();
    for paragraph in dom::query_all_html(&document, selector)? {
        let Some(state) = ReadMore::new(&paragraph.inner_text(), READ_MORE_LIMIT) else {
            continue;
        };
        let button: HtmlElement = document.create_element("button")?.unchecked_into();
        button.style().set_css_text(READ_MORE_BUTTON_CSS);
        button.set_inner_text(state.label());
        paragraph.set_inner_text(state.text());
        paragraph.append_child(&button)?;

        let state = Rc::new(RefCell::new(state));
        let weak = Rc::downgrade(&state);
        let (p, b) = (paragraph.clone(), button.clone());
        listeners.push(Listener::new(&button, "click", move |_| {
            if let Some(state) = weak.upgrade()
                && let Ok(mut state) = state.try_borrow_mut()
            {
                state.toggle();
                p.set_inner_text(state.text());
                b.set_inner_text(state.label());
                let _ = p.append_child(&b);
            }
        })?);
        texts.push(state);
    }
    Ok(ReadMoreHandle { texts, listeners })
}

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// Installed smooth-scrolling anchors.
pub struct AnchorsHandle {
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for AnchorsHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnchorsHandle")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Smooth-scrolls to the target of in-page links matching `selector`.
///
/// Bare `#` links and anchors whose target does not exist are left to the
/// browser.
pub fn install_anchors(selector: &str) -> Result<AnchorsHandle, JsValue> {
    let document = dom::document()?;
    let mut listeners = Vec::new();
    for anchor in dom::query_all(&document, selector)? {
        let (a, doc) = (anchor.clone(), document.clone());
        listeners.push(Listener::new(&anchor, "click", move |e| {
            let href = a.get_attribute("href").unwrap_or_default();
            let Some(target) = anchor_target(&href).and_then(|id| doc.get_element_by_id(id))
            else {
                return;
            };
            e.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?);
    }
    Ok(AnchorsHandle { listeners })
}
