// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State for the small click-driven page widgets.
//!
//! These are independent of the reactor; the web backend wires each one to
//! its own event listeners.

use alloc::string::String;

use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Lightbox
// ---------------------------------------------------------------------------

/// Body `overflow` while the lightbox is open.
pub const BODY_OVERFLOW_LOCKED: &str = "hidden";
/// Body `overflow` after the lightbox closes.
pub const BODY_OVERFLOW_RESTORED: &str = "auto";
/// Class marking the open lightbox.
pub const LIGHTBOX_ACTIVE_CLASS: &str = "active";

/// Open/closed state of the image lightbox.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lightbox {
    source: Option<String>,
}

impl Lightbox {
    /// Creates a closed lightbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the lightbox is showing an image.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// The image currently shown.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Shows `src`. Opening while open swaps the image.
    pub fn open(&mut self, src: impl Into<String>) -> &str {
        self.source.insert(src.into())
    }

    /// Closes the lightbox. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        self.source.take().is_some()
    }

    /// Handles a `keydown` key name. Escape closes.
    pub fn on_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close()
    }
}

// ---------------------------------------------------------------------------
// Placeholder link notice
// ---------------------------------------------------------------------------

/// Label shown on a link whose destination does not exist yet.
pub const NOTICE_LABEL: &str = "<span>\u{26a0}\u{fe0f}</span> Link belum tersedia";
/// Background tint while the notice shows.
pub const NOTICE_BACKGROUND: &str = "rgba(239, 68, 68, 0.2)";
/// How long the notice stays up.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// What a click on an external link should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeAction {
    /// Real link: let the browser navigate.
    Follow,
    /// Placeholder: prevent navigation and show the notice until `restore_at`.
    Show {
        /// When to restore the original content.
        restore_at: HostTime,
    },
    /// Placeholder already showing its notice: prevent navigation only.
    Suppress,
}

/// Notice state for one placeholder link.
///
/// Keeps the link's original markup so repeated clicks while the notice is
/// up never capture the notice itself as the "original".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkNotice {
    original: Option<String>,
}

impl LinkNotice {
    /// Creates an idle notice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a click on a link with `href` whose current markup is
    /// `current_html`.
    pub fn on_click(&mut self, href: &str, current_html: &str, now: HostTime) -> NoticeAction {
        if href != "#" {
            return NoticeAction::Follow;
        }
        if self.original.is_some() {
            return NoticeAction::Suppress;
        }
        self.original = Some(String::from(current_html));
        NoticeAction::Show {
            restore_at: now.saturating_add(NOTICE_DURATION),
        }
    }

    /// The notice timer elapsed. Returns the markup to put back.
    pub fn restore(&mut self) -> Option<String> {
        self.original.take()
    }

    /// Whether the notice is currently showing.
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.original.is_some()
    }
}

// ---------------------------------------------------------------------------
// Read more
// ---------------------------------------------------------------------------

/// Texts longer than this many characters get truncated.
pub const READ_MORE_LIMIT: usize = 200;
/// Button label while collapsed.
pub const READ_MORE_LABEL: &str = "Read More";
/// Button label while expanded.
pub const READ_LESS_LABEL: &str = "Read Less";

/// Collapsible long text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadMore {
    full: String,
    short: String,
    expanded: bool,
}

impl ReadMore {
    /// Returns `None` when `text` is short enough to show in full.
    ///
    /// Lengths count Unicode scalar values, so truncation never splits a
    /// character.
    #[must_use]
    pub fn new(text: &str, limit: usize) -> Option<Self> {
        let cut = text.char_indices().nth(limit)?.0;
        let mut short = String::from(&text[..cut]);
        short.push_str("...");
        Some(Self {
            full: String::from(text),
            short,
            expanded: false,
        })
    }

    /// The text to display.
    #[must_use]
    pub fn text(&self) -> &str {
        if self.expanded { &self.full } else { &self.short }
    }

    /// The toggle button label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.expanded {
            READ_LESS_LABEL
        } else {
            READ_MORE_LABEL
        }
    }

    /// Whether the full text is showing.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flips between short and full text.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn lightbox_open_close_escape() {
        let mut lb = Lightbox::new();
        assert!(!lb.on_key("Escape"), "closed lightbox ignores Escape");
        assert_eq!(lb.open("img/a.png"), "img/a.png");
        assert!(lb.is_open());
        assert!(!lb.on_key("Enter"));
        assert!(lb.on_key("Escape"));
        assert!(!lb.is_open());
        assert!(!lb.close());
    }

    #[test]
    fn notice_only_for_placeholder_links() {
        let mut n = LinkNotice::new();
        assert_eq!(n.on_click("https://example.com", "Demo", HostTime(0)), NoticeAction::Follow);
        assert_eq!(
            n.on_click("#", "Demo", HostTime(0)),
            NoticeAction::Show {
                restore_at: HostTime(2_000_000)
            }
        );
    }

    #[test]
    fn notice_keeps_first_original_across_clicks() {
        let mut n = LinkNotice::new();
        let _ = n.on_click("#", "Source", HostTime(0));
        assert_eq!(n.on_click("#", NOTICE_LABEL, HostTime(500)), NoticeAction::Suppress);
        assert_eq!(n.restore(), Some("Source".to_string()));
        assert!(!n.is_showing());
        assert_eq!(n.restore(), None);
    }

    #[test]
    fn read_more_truncates_long_text() {
        let text = "x".repeat(250);
        let mut rm = ReadMore::new(&text, READ_MORE_LIMIT).expect("long text truncates");
        assert_eq!(rm.text().len(), 203);
        assert!(rm.text().ends_with("..."));
        assert_eq!(rm.label(), READ_MORE_LABEL);
        rm.toggle();
        assert_eq!(rm.text(), text);
        assert_eq!(rm.label(), READ_LESS_LABEL);
        rm.toggle();
        assert!(!rm.is_expanded());
    }

    #[test]
    fn read_more_leaves_short_text_alone() {
        assert!(ReadMore::new(&"y".repeat(200), READ_MORE_LIMIT).is_none());
        assert!(ReadMore::new("", READ_MORE_LIMIT).is_none());
    }

    #[test]
    fn read_more_counts_characters() {
        let text = "\u{e9}".repeat(201);
        let rm = ReadMore::new(&text, READ_MORE_LIMIT).expect("201 chars");
        assert_eq!(rm.text().chars().count(), 203);
    }
}
