//! Hover reference counting and per-entity listener fan-out

use bevy::prelude::*;
use tracing::warn;
use vr_input::Hand;

/// Entity-side reaction to pointer hover and click.
pub trait Hoverable {
    fn on_hover_enter(&mut self, hand: Hand);
    fn on_hover_exit(&mut self, hand: Hand);
    fn on_click(&mut self, _hand: Hand) {}
}

/// Number of pointers currently hovering one target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverCounter(u32);

impl HoverCounter {
    pub fn count(self) -> u32 {
        self.0
    }

    pub fn is_hovered(self) -> bool {
        self.0 > 0
    }

    /// Returns true on the 0 -> 1 transition.
    pub fn enter(&mut self) -> bool {
        self.0 += 1;
        self.0 == 1
    }

    /// Returns true on the 1 -> 0 transition. An exit with nothing to release is
    /// logged and ignored.
    pub fn exit(&mut self) -> bool {
        match self.0 {
            0 => {
                warn!("Hover exit without a matching enter; count stays at 0");
                false
            }
            n => {
                self.0 = n - 1;
                self.0 == 0
            }
        }
    }
}

/// Outline highlight that stays on while any pointer hovers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightOnHover {
    pub counter: HoverCounter,
    pub highlighted: bool,
}

impl Hoverable for HighlightOnHover {
    fn on_hover_enter(&mut self, _hand: Hand) {
        if self.counter.enter() {
            self.highlighted = true;
        }
    }

    fn on_hover_exit(&mut self, _hand: Hand) {
        if self.counter.exit() {
            self.highlighted = false;
        }
    }
}

/// Tracks whether one specific hand is hovering. Events from the other hand are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandHoverTracker {
    pub hand: Hand,
    pub hovering: bool,
}

impl HandHoverTracker {
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            hovering: false,
        }
    }
}

impl Hoverable for HandHoverTracker {
    fn on_hover_enter(&mut self, hand: Hand) {
        if hand == self.hand {
            self.hovering = true;
        }
    }

    fn on_hover_exit(&mut self, hand: Hand) {
        if hand == self.hand {
            self.hovering = false;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverListener {
    Highlight(HighlightOnHover),
    HandTracker(HandHoverTracker),
}

impl Hoverable for HoverListener {
    fn on_hover_enter(&mut self, hand: Hand) {
        match self {
            HoverListener::Highlight(l) => l.on_hover_enter(hand),
            HoverListener::HandTracker(l) => l.on_hover_enter(hand),
        }
    }

    fn on_hover_exit(&mut self, hand: Hand) {
        match self {
            HoverListener::Highlight(l) => l.on_hover_exit(hand),
            HoverListener::HandTracker(l) => l.on_hover_exit(hand),
        }
    }

    fn on_click(&mut self, hand: Hand) {
        match self {
            HoverListener::Highlight(l) => l.on_click(hand),
            HoverListener::HandTracker(l) => l.on_click(hand),
        }
    }
}

/// Marks an entity as hoverable and forwards every notification to its listeners in
/// declaration order.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct HoverBroadcaster {
    pub listeners: Vec<HoverListener>,
}

impl HoverBroadcaster {
    pub fn new(listeners: Vec<HoverListener>) -> Self {
        Self { listeners }
    }

    /// A highlight plus a tracker for `hand`, the usual setup for objects with actions.
    pub fn highlight_tracking(hand: Hand) -> Self {
        Self::new(vec![
            HoverListener::Highlight(HighlightOnHover::default()),
            HoverListener::HandTracker(HandHoverTracker::new(hand)),
        ])
    }

    pub fn highlighted(&self) -> bool {
        self.listeners
            .iter()
            .any(|l| matches!(l, HoverListener::Highlight(h) if h.highlighted))
    }

    /// Hover count of the first highlight listener.
    pub fn hover_count(&self) -> u32 {
        self.listeners
            .iter()
            .find_map(|l| match l {
                HoverListener::Highlight(h) => Some(h.counter.count()),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn hovered_by(&self, hand: Hand) -> bool {
        self.listeners
            .iter()
            .any(|l| matches!(l, HoverListener::HandTracker(t) if t.hand == hand && t.hovering))
    }
}

impl Hoverable for HoverBroadcaster {
    fn on_hover_enter(&mut self, hand: Hand) {
        for listener in &mut self.listeners {
            listener.on_hover_enter(hand);
        }
    }

    fn on_hover_exit(&mut self, hand: Hand) {
        for listener in &mut self.listeners {
            listener.on_hover_exit(hand);
        }
    }

    fn on_click(&mut self, hand: Hand) {
        for listener in &mut self.listeners {
            listener.on_click(hand);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_never_goes_negative() {
        let mut counter = HoverCounter::default();
        assert!(!counter.exit());
        assert_eq!(counter.count(), 0);
        assert!(counter.enter());
        assert!(!counter.enter());
        assert!(!counter.exit());
        assert!(counter.exit());
        assert!(!counter.exit());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn highlight_tracks_count() {
        // Arbitrary interleaving of enters and exits, including spurious exits.
        let script = [true, true, false, true, false, false, false, true, false, false];
        let mut highlight = HighlightOnHover::default();
        for enter in script {
            if enter {
                highlight.on_hover_enter(Hand::Left);
            } else {
                highlight.on_hover_exit(Hand::Left);
            }
            assert_eq!(highlight.highlighted, highlight.counter.count() > 0);
        }
    }

    #[test]
    fn two_pointers_share_one_highlight() {
        let mut broadcaster = HoverBroadcaster::highlight_tracking(Hand::Right);
        broadcaster.on_hover_enter(Hand::Left);
        broadcaster.on_hover_enter(Hand::Right);
        assert_eq!(broadcaster.hover_count(), 2);
        assert!(broadcaster.hovered_by(Hand::Right));

        broadcaster.on_hover_exit(Hand::Right);
        assert_eq!(broadcaster.hover_count(), 1);
        assert!(broadcaster.highlighted());
        assert!(!broadcaster.hovered_by(Hand::Right));

        broadcaster.on_hover_exit(Hand::Left);
        assert_eq!(broadcaster.hover_count(), 0);
        assert!(!broadcaster.highlighted());
    }

    #[test]
    fn hand_tracker_ignores_other_hand() {
        let mut tracker = HandHoverTracker::new(Hand::Right);
        tracker.on_hover_enter(Hand::Left);
        assert!(!tracker.hovering);
        tracker.on_hover_enter(Hand::Right);
        tracker.on_hover_exit(Hand::Left);
        assert!(tracker.hovering);
    }
}
