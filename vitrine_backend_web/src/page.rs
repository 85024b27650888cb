// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reactor installation: markup discovery and signal subscriptions.
//!
//! One dispatch path per signal type. Each listener samples the page, hands
//! the sample to the [`Reactor`], and applies the returned batch through the
//! [`DomPresenter`]. Section tops are read fresh on every scroll.

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use vitrine_core::backend::{Changes, Presenter as _};
use vitrine_core::config::{ObserverOptions, PageMarkup, ReactorConfig};
use vitrine_core::reactor::Reactor;
use vitrine_core::reveal::{RevealId, RevealTrigger};
use vitrine_core::scroll::scroll_top_transform;
use vitrine_core::signal::{ScrollSample, crossing};
use vitrine_core::trace::Tracer;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::listener::Listener;
use crate::observer::VisibilityObserver;
use crate::presenter::DomPresenter;
use crate::timer::Timeout;
use crate::{ResizeHub, SharedSink, now};

/// Attribute carrying an element's reveal id, read back by observer
/// callbacks.
const REVEAL_ID_ATTR: &str = "data-vitrine-reveal";

const PROGRESS_BAR_CSS: &str = "position: fixed; top: 0; left: 0; width: 0%; height: 3px; \
    background: linear-gradient(90deg, #6366f1, #8b5cf6, #ec4899); z-index: 9999; \
    transition: width 0.1s;";

const SCROLL_TOP_CSS: &str = "position: fixed; bottom: 30px; right: 30px; width: 50px; \
    height: 50px; border-radius: 50%; background: linear-gradient(135deg, #6366f1, #8b5cf6); \
    color: white; border: none; font-size: 24px; cursor: pointer; opacity: 0; \
    visibility: hidden; transition: all 0.3s; z-index: 1000; \
    box-shadow: 0 4px 12px rgba(99, 102, 241, 0.4);";

/// An element watched by rectangle tests because the browser offered no
/// `IntersectionObserver`.
struct Polled {
    id: RevealId,
    element: Element,
    options: ObserverOptions,
}

struct ReactorPage {
    reactor: Reactor,
    presenter: DomPresenter,
    sections: Vec<HtmlElement>,
    polled: Vec<Polled>,
    resize_timer: Option<Timeout>,
    sink: SharedSink,
}

impl ReactorPage {
    fn with_tracer<R>(&mut self, f: impl FnOnce(&mut Reactor, &mut Tracer<'_>) -> R) -> R {
        match self.sink.try_borrow_mut() {
            Ok(mut sink) => f(&mut self.reactor, &mut Tracer::new(&mut *sink)),
            Err(_) => f(&mut self.reactor, &mut Tracer::none()),
        }
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut Reactor, &mut Tracer<'_>) -> Changes) {
        let changes = self.with_tracer(f);
        if !changes.is_empty() {
            self.presenter.apply(&changes);
        }
    }

    fn reveal(&mut self, id: RevealId) {
        self.dispatch(|reactor, tracer| reactor.on_visibility(now(), id, tracer));
    }

    fn on_scroll(&mut self, window: &Window, document: &Document) {
        self.poll_visibility(window);
        let sample = scroll_sample(window, document);
        let tops: Vec<f64> = self
            .sections
            .iter()
            .map(|s| f64::from(s.offset_top()))
            .collect();
        self.dispatch(|reactor, tracer| reactor.on_scroll(now(), &sample, &tops, tracer));
    }

    fn poll_visibility(&mut self, window: &Window) {
        if self.polled.is_empty() {
            return;
        }
        let viewport = dom::viewport_rect(window);
        let crossed: Vec<RevealId> = self
            .polled
            .iter()
            .filter(|p| crossing(dom::client_rect(&p.element), viewport, &p.options))
            .map(|p| p.id)
            .collect();
        for &id in &crossed {
            self.reveal(id);
        }
        self.polled.retain(|p| !crossed.contains(&p.id));
    }
}

/// Owns the reactor and its listeners. Dropping it detaches everything.
pub struct ReactorHandle {
    page: Rc<RefCell<ReactorPage>>,
    window: Window,
    document: Document,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for ReactorHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReactorHandle")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ReactorHandle {
    /// Re-runs the scroll derivation against the current page.
    pub fn sync(&self) {
        if let Ok(mut page) = self.page.try_borrow_mut() {
            page.on_scroll(&self.window, &self.document);
        }
    }

    /// The id of the active section, if any.
    #[must_use]
    pub fn active_section_id(&self) -> Option<String> {
        let page = self.page.try_borrow().ok()?;
        page.reactor.active_section_id().map(ToString::to_string)
    }

    /// Number of revealed elements.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.page
            .try_borrow()
            .map_or(0, |page| page.reactor.reveals().revealed_count())
    }
}

/// Installs the scroll/visibility reactor for `markup`.
///
/// Absent markup (no navbar, no sections, empty reveal groups) is not an
/// error; those targets simply never change. The initial scroll state is
/// applied before returning.
pub fn install_reactor(
    markup: &PageMarkup,
    config: ReactorConfig,
    sink: SharedSink,
    resize: ResizeHub,
) -> Result<ReactorHandle, JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let sections = match markup.sections {
        Some(selector) => dom::query_all_html(&document, selector)?,
        None => Vec::new(),
    };
    let links = match markup.nav_links {
        Some(selector) => dom::query_all_html(&document, selector)?,
        None => Vec::new(),
    };
    let hrefs: Vec<String> = links
        .iter()
        .map(|a| a.get_attribute("href").unwrap_or_default())
        .collect();

    let reactor = Reactor::new(config)
        .with_sections(sections.iter().map(|s| s.id()))
        .with_nav_links(hrefs.iter().map(String::as_str));

    let mut presenter = DomPresenter::new();
    presenter.set_resize_hub(resize);
    presenter.set_nav_links(links);
    if let Some(selector) = markup.navbar {
        presenter.set_navbar(dom::query_html(&document, selector)?);
    }

    let mut listeners = Vec::new();

    if markup.progress_bar {
        let bar: HtmlElement = document.create_element("div")?.unchecked_into();
        bar.style().set_css_text(PROGRESS_BAR_CSS);
        body.append_child(&bar)?;
        presenter.set_progress_bar(Some(bar));
    }

    if markup.scroll_top {
        let button: HtmlElement = document.create_element("button")?.unchecked_into();
        button.set_inner_text("\u{2191}");
        button.set_class_name("scroll-to-top");
        button.set_title("Scroll to top");
        button.style().set_css_text(SCROLL_TOP_CSS);
        body.append_child(&button)?;
        let w = window.clone();
        listeners.push(Listener::new(&button, "click", move |_| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            w.scroll_to_with_scroll_to_options(&options);
        })?);
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let b = button.clone();
            listeners.push(Listener::new(&button, event, move |_| {
                let _ = b.style().set_property("transform", scroll_top_transform(hovered));
            })?);
        }
        presenter.set_scroll_top(Some(button));
    }

    let page = Rc::new(RefCell::new(ReactorPage {
        reactor,
        presenter,
        sections,
        polled: Vec::new(),
        resize_timer: None,
        sink,
    }));

    for group in markup.reveal_groups {
        let elements = dom::query_all_html(&document, group.selector)?;
        let (ids, setup) = page.borrow_mut().reactor.register_reveal(*group, elements.len());

        let observer = match group.trigger {
            RevealTrigger::Visibility(options) => {
                let weak = Rc::downgrade(&page);
                VisibilityObserver::new(&options, move |el| on_cross(&weak, el))
                    .ok()
                    .map(Rc::new)
            }
            RevealTrigger::Load => None,
        };

        let mut p = page.borrow_mut();
        for (&id, el) in ids.iter().zip(&elements) {
            el.set_attribute(REVEAL_ID_ATTR, &id.0.to_string())?;
            p.presenter.bind_reveal(id, el.clone(), observer.clone());
        }
        p.presenter.apply(&setup);

        match (group.trigger, &observer) {
            (RevealTrigger::Visibility(_), Some(observer)) => {
                for el in &elements {
                    observer.observe(el);
                }
            }
            (RevealTrigger::Visibility(options), None) => {
                p.polled.extend(ids.iter().zip(&elements).map(|(&id, el)| Polled {
                    id,
                    element: el.clone().into(),
                    options,
                }));
            }
            (RevealTrigger::Load, _) => {
                for (&id, el) in ids.iter().zip(&elements) {
                    let complete = el
                        .dyn_ref::<HtmlImageElement>()
                        .is_some_and(HtmlImageElement::complete);
                    if complete {
                        p.reveal(id);
                    }
                    let weak = Rc::downgrade(&page);
                    listeners.push(Listener::new(el, "load", move |_| {
                        if let Some(page) = weak.upgrade()
                            && let Ok(mut page) = page.try_borrow_mut()
                        {
                            page.reveal(id);
                        }
                    })?);
                }
            }
        }
    }

    {
        let weak = Rc::downgrade(&page);
        let (w, d) = (window.clone(), document.clone());
        listeners.push(Listener::new(&window, "scroll", move |_| {
            if let Some(page) = weak.upgrade()
                && let Ok(mut page) = page.try_borrow_mut()
            {
                page.on_scroll(&w, &d);
            }
        })?);
    }

    {
        let weak = Rc::downgrade(&page);
        listeners.push(Listener::new(&window, "resize", move |_| {
            on_resize(&weak);
        })?);
    }

    let handle = ReactorHandle {
        page,
        window,
        document,
        listeners,
    };
    handle.sync();
    Ok(handle)
}

fn on_cross(page: &Weak<RefCell<ReactorPage>>, el: &Element) {
    let Some(id) = el
        .get_attribute(REVEAL_ID_ATTR)
        .and_then(|v| v.parse().ok())
        .map(RevealId)
    else {
        return;
    };
    if let Some(page) = page.upgrade()
        && let Ok(mut page) = page.try_borrow_mut()
    {
        page.reveal(id);
    }
}

fn on_resize(page: &Weak<RefCell<ReactorPage>>) {
    let Some(strong) = page.upgrade() else {
        return;
    };
    let Ok(mut p) = strong.try_borrow_mut() else {
        return;
    };
    let ticket = p.with_tracer(|reactor, tracer| reactor.on_resize(now(), tracer));
    let weak = page.clone();
    // Replacing the stored timeout clears the one `ticket.cancels` names.
    p.resize_timer = Some(Timeout::once(ticket.wait, move || {
        if let Some(page) = weak.upgrade()
            && let Ok(mut page) = page.try_borrow_mut()
        {
            page.dispatch(|reactor, tracer| reactor.on_resize_timer(now(), ticket.token, tracer));
        }
    }));
}

fn scroll_sample(window: &Window, document: &Document) -> ScrollSample {
    let offset = window.scroll_y().unwrap_or(0.0);
    let (scroll_height, viewport_height) = document.document_element().map_or((0.0, 0.0), |root| {
        (f64::from(root.scroll_height()), f64::from(root.client_height()))
    });
    ScrollSample::new(offset, scroll_height, viewport_height)
}
