// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal tracking.
//!
//! Elements are registered in groups. Each registered element starts hidden
//! (styled by [`RevealStyle::initial`]) with a transition delayed by
//! `index × step` inside its group, and flips to its final style the first
//! time a reveal signal arrives for it. The `revealed` flag is monotonic: it
//! never goes back to `false`, so scrolling up does not hide anything again.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::ObserverOptions;
use crate::time::Duration;

/// Handle to a registered element.
///
/// Ids are dense and assigned in registration order across all groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevealId(pub u32);

impl RevealId {
    /// Returns the slot index of this id.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How an element moves into place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealMotion {
    /// Starts `distance` pixels below its final position.
    Rise {
        /// Initial downward offset in pixels.
        distance: f64,
    },
    /// Starts `distance` pixels right of its final position.
    Slide {
        /// Initial rightward offset in pixels.
        distance: f64,
    },
    /// Starts scaled down to `from`.
    Zoom {
        /// Initial scale factor.
        from: f64,
    },
}

impl RevealMotion {
    /// The CSS transform of the hidden state.
    #[must_use]
    pub fn initial_transform(&self) -> String {
        match *self {
            Self::Rise { distance } => format!("translateY({distance}px)"),
            Self::Slide { distance } => format!("translateX({distance}px)"),
            Self::Zoom { from } => format!("scale({from})"),
        }
    }

    /// The CSS transform of the revealed state.
    #[must_use]
    pub const fn final_transform(&self) -> &'static str {
        match self {
            Self::Rise { .. } => "translateY(0)",
            Self::Slide { .. } => "translateX(0)",
            Self::Zoom { .. } => "scale(1)",
        }
    }
}

/// What revealing does to an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealEffect {
    /// Fade in while moving from the motion's initial transform.
    Motion(RevealMotion),
    /// Add a class and leave styling to the stylesheet.
    AddClass(&'static str),
}

/// Which signal reveals elements of a group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealTrigger {
    /// A viewport-intersection crossing with the given options.
    Visibility(ObserverOptions),
    /// The element's `load` event (images), or immediately when it has
    /// already loaded.
    Load,
}

/// Whether observation continues after the first reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObservePolicy {
    /// Keep observing; later crossings are ignored.
    Retain,
    /// Stop observing once revealed to release the observer's resources.
    UnobserveAfterReveal,
}

/// A set of elements sharing a selector, effect and stagger step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGroup {
    /// CSS selector matching the group's elements, in document order.
    pub selector: &'static str,
    /// What revealing does.
    pub effect: RevealEffect,
    /// Transition length for motion effects.
    pub duration: Duration,
    /// CSS timing function for motion effects; `None` uses the browser
    /// default (`ease`).
    pub easing: Option<&'static str>,
    /// Per-element stagger added to the transition delay.
    pub step: Duration,
    /// The signal that reveals an element.
    pub trigger: RevealTrigger,
    /// Observation policy after the first reveal.
    pub policy: ObservePolicy,
}

/// A batch of inline style properties for one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    /// `(property, value)` pairs in application order.
    pub properties: Vec<(&'static str, String)>,
}

impl RevealStyle {
    /// The hidden state plus the delayed transition.
    #[must_use]
    pub fn initial(
        motion: &RevealMotion,
        duration: Duration,
        easing: Option<&'static str>,
        delay: Duration,
    ) -> Self {
        let transition = transition_css(duration, easing, delay);
        Self {
            properties: alloc::vec![
                ("opacity", String::from("0")),
                ("transform", motion.initial_transform()),
                ("transition", transition),
            ],
        }
    }

    /// The revealed state.
    #[must_use]
    pub fn revealed(motion: &RevealMotion) -> Self {
        Self {
            properties: alloc::vec![
                ("opacity", String::from("1")),
                ("transform", String::from(motion.final_transform())),
            ],
        }
    }
}

/// Renders `opacity {duration} [easing] [delay], transform …`.
///
/// Delays are whole milliseconds so staggering never produces float noise
/// like `0.30000000000000004s`.
#[must_use]
pub fn transition_css(duration: Duration, easing: Option<&str>, delay: Duration) -> String {
    let mut timing = format!("{}ms", duration.as_millis());
    if let Some(easing) = easing {
        timing.push(' ');
        timing.push_str(easing);
    }
    if delay != Duration::ZERO {
        timing.push_str(&format!(" {}ms", delay.as_millis()));
    }
    format!("opacity {timing}, transform {timing}")
}

/// Style to apply when an element is registered.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSetup {
    /// The registered element.
    pub id: RevealId,
    /// Inline style for the hidden state; empty for class effects.
    pub style: RevealStyle,
}

/// What changes when an element is revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealChange {
    /// The revealed element.
    pub id: RevealId,
    /// Index of the element's group in registration order.
    pub group: usize,
    /// The element's transition delay.
    pub delay: Duration,
    /// Inline style to apply (empty for class effects).
    pub style: RevealStyle,
    /// Class to add, for [`RevealEffect::AddClass`].
    pub class: Option<&'static str>,
    /// Whether the host should stop observing the element.
    pub unobserve: bool,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    group: usize,
    delay: Duration,
    revealed: bool,
}

/// Owns the `revealed` flags of every registered element.
#[derive(Debug, Default)]
pub struct RevealTracker {
    groups: Vec<RevealGroup>,
    elements: Vec<Tracked>,
}

impl RevealTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `count` elements of `group`, in document order.
    ///
    /// Returns the initial style of each element, which the host must apply
    /// before it starts observing them so nothing flashes unstyled.
    pub fn register(&mut self, group: RevealGroup, count: usize) -> Vec<RevealSetup> {
        let group_index = self.groups.len();
        self.groups.push(group);
        let mut setups = Vec::with_capacity(count);
        for i in 0..count {
            let id = RevealId(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
            let delay = group.step.saturating_mul(i as u64);
            self.elements.push(Tracked {
                group: group_index,
                delay,
                revealed: false,
            });
            let style = match group.effect {
                RevealEffect::Motion(motion) => RevealStyle::initial(&motion, group.duration, group.easing, delay),
                RevealEffect::AddClass(_) => RevealStyle {
                    properties: Vec::new(),
                },
            };
            setups.push(RevealSetup { id, style });
        }
        setups
    }

    /// Handles a reveal signal for `id`.
    ///
    /// Returns `None` for unknown ids and for elements already revealed.
    pub fn on_crossing(&mut self, id: RevealId) -> Option<RevealChange> {
        let tracked = self.elements.get_mut(id.index())?;
        if tracked.revealed {
            return None;
        }
        tracked.revealed = true;
        let group = self.groups[tracked.group];
        let (style, class) = match group.effect {
            RevealEffect::Motion(motion) => (RevealStyle::revealed(&motion), None),
            RevealEffect::AddClass(class) => (
                RevealStyle {
                    properties: Vec::new(),
                },
                Some(class),
            ),
        };
        Some(RevealChange {
            id,
            group: tracked.group,
            delay: tracked.delay,
            style,
            class,
            unobserve: group.policy == ObservePolicy::UnobserveAfterReveal,
        })
    }

    /// Returns whether `id` has been revealed. Unknown ids report `false`.
    #[must_use]
    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.elements.get(id.index()).is_some_and(|t| t.revealed)
    }

    /// Returns the transition delay assigned to `id`.
    #[must_use]
    pub fn delay(&self, id: RevealId) -> Option<Duration> {
        self.elements.get(id.index()).map(|t| t.delay)
    }

    /// Returns the group `id` was registered with.
    #[must_use]
    pub fn group_of(&self, id: RevealId) -> Option<&RevealGroup> {
        let tracked = self.elements.get(id.index())?;
        self.groups.get(tracked.group)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements revealed so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.elements.iter().filter(|t| t.revealed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageMarkup;

    fn cards(step_ms: u64) -> RevealGroup {
        RevealGroup {
            selector: ".card",
            effect: RevealEffect::Motion(RevealMotion::Rise { distance: 30.0 }),
            duration: Duration::from_millis(600),
            easing: Some("ease-out"),
            step: Duration::from_millis(step_ms),
            trigger: RevealTrigger::Visibility(ObserverOptions::reveal()),
            policy: ObservePolicy::Retain,
        }
    }

    #[test]
    fn register_staggers_delays_by_index() {
        let mut tracker = RevealTracker::new();
        let setups = tracker.register(cards(150), 4);
        let delays: Vec<_> = setups.iter().map(|s| tracker.delay(s.id)).collect();
        assert_eq!(
            delays,
            [
                Some(Duration::ZERO),
                Some(Duration::from_millis(150)),
                Some(Duration::from_millis(300)),
                Some(Duration::from_millis(450)),
            ]
        );
        assert_eq!(
            setups[2].style.properties[2],
            (
                "transition",
                String::from("opacity 600ms ease-out 300ms, transform 600ms ease-out 300ms")
            )
        );
    }

    #[test]
    fn initial_style_is_hidden_and_offset() {
        let mut tracker = RevealTracker::new();
        let setups = tracker.register(cards(0), 1);
        let props = &setups[0].style.properties;
        assert_eq!(props[0], ("opacity", String::from("0")));
        assert_eq!(props[1], ("transform", String::from("translateY(30px)")));
        assert_eq!(
            props[2].1, "opacity 600ms ease-out, transform 600ms ease-out",
            "no delay suffix for the first element"
        );
    }

    #[test]
    fn transition_without_easing_uses_browser_default() {
        assert_eq!(
            transition_css(Duration::from_millis(500), None, Duration::ZERO),
            "opacity 500ms, transform 500ms"
        );
        assert_eq!(
            transition_css(Duration::from_millis(500), None, Duration::from_millis(100)),
            "opacity 500ms 100ms, transform 500ms 100ms"
        );
    }

    #[test]
    fn ids_continue_across_groups() {
        let mut tracker = RevealTracker::new();
        let a = tracker.register(cards(100), 2);
        let b = tracker.register(cards(100), 2);
        assert_eq!(a[1].id, RevealId(1));
        assert_eq!(b[0].id, RevealId(2));
        // Stagger restarts in each group.
        assert_eq!(tracker.delay(b[0].id), Some(Duration::ZERO));
        assert_eq!(tracker.len(), 4);
    }

    #[test]
    fn crossing_reveals_once() {
        let mut tracker = RevealTracker::new();
        let id = tracker.register(cards(100), 1)[0].id;
        assert!(!tracker.is_revealed(id));

        let change = tracker.on_crossing(id).expect("first crossing reveals");
        assert_eq!(change.style.properties[0], ("opacity", String::from("1")));
        assert_eq!(change.style.properties[1], ("transform", String::from("translateY(0)")));
        assert!(!change.unobserve);
        assert!(tracker.is_revealed(id));

        for _ in 0..5 {
            assert_eq!(tracker.on_crossing(id), None);
            assert!(tracker.is_revealed(id), "revealed never reverts");
        }
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.on_crossing(RevealId(7)), None);
        assert!(!tracker.is_revealed(RevealId(7)));
    }

    #[test]
    fn lazy_images_add_class_and_unobserve() {
        let mut tracker = RevealTracker::new();
        let lazy = PageMarkup::home()
            .reveal_groups
            .iter()
            .copied()
            .find(|g| g.policy == ObservePolicy::UnobserveAfterReveal)
            .expect("home page has lazy images");
        let setups = tracker.register(lazy, 1);
        assert!(setups[0].style.properties.is_empty(), "class effects set no inline style");

        let change = tracker.on_crossing(setups[0].id).expect("revealed");
        assert_eq!(change.class, Some("loaded"));
        assert!(change.unobserve);
    }

    #[test]
    fn motion_transforms() {
        let slide = RevealMotion::Slide { distance: 30.0 };
        assert_eq!(slide.initial_transform(), "translateX(30px)");
        assert_eq!(slide.final_transform(), "translateX(0)");
        let zoom = RevealMotion::Zoom { from: 0.95 };
        assert_eq!(zoom.initial_transform(), "scale(0.95)");
        assert_eq!(zoom.final_transform(), "scale(1)");
    }
}
