// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-independent state for scroll-driven portfolio pages.
//!
//! `vitrine_core` decides *what* a page should look like for a given scroll
//! position, element visibility, and resize history. It never touches a DOM:
//! every decision comes out as a [`Changes`](backend::Changes) batch that a
//! backend applies through the [`Presenter`](backend::Presenter) trait. It is
//! `no_std` compatible (with `alloc`), so the same logic runs in the browser
//! and in the simulated page used by tests.
//!
//! # Architecture
//!
//! ```text
//!   Host events (scroll, intersection, resize timer)
//!       │
//!       ▼
//!   ScrollSample / RevealId / DebounceToken
//!       │
//!       ▼
//!   Reactor::on_scroll / on_visibility / on_resize_timer ──► Changes
//!       │                                                      │
//!       ▼                                                      ▼
//!   TraceSink (via Tracer)                          Presenter::apply()
//! ```
//!
//! **[`reactor`]** — Owns the derived page state and turns host signals into
//! style and class changes, emitting only what differs from the last batch.
//!
//! **[`scroll`]** — Pure functions from a scroll sample to progress, navbar
//! state, scroll-to-top visibility and the active section.
//!
//! **[`reveal`]** — Reveal groups, staggered delays, and the monotonic
//! hidden-to-revealed tracker.
//!
//! **[`signal`]** — Scroll samples and intersection ratios, so hosts without
//! an `IntersectionObserver` can compute crossings themselves.
//!
//! **[`nav`]** — Anchor parsing and the single active navigation link.
//!
//! **[`debounce`]** — Trailing-edge debounce with cancellable tokens.
//!
//! **[`config`]** — Thresholds, observer options and page markup presets.
//!
//! **[`widgets`]** — Lightbox, placeholder-link notice and read-more state.
//!
//! **[`backdrop`]** — Scene description, spin and projection for the
//! decorative 3D backdrop.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backdrop;
pub mod backend;
pub mod config;
pub mod debounce;
pub mod nav;
pub mod reactor;
pub mod reveal;
pub mod scroll;
pub mod signal;
pub mod time;
pub mod trace;
pub mod widgets;
