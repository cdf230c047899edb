//! Action kinds and the bounded, cyclically replayed action ring.

use arrayvec::ArrayVec;

/// Slots in any actor's action ring.
pub const ACTION_CAPACITY: usize = 10;

/// One queued maneuver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Slash,
    Evade,
    Parry,
    Tackle,
}

impl ActionKind {
    /// The catalog the player picks from, in display order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Slash,
        ActionKind::Evade,
        ActionKind::Parry,
        ActionKind::Tackle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Slash => "Slash",
            ActionKind::Evade => "Evade",
            ActionKind::Parry => "Parry",
            ActionKind::Tackle => "Tackle",
        }
    }

    /// Position in [`ActionKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ActionKind::Slash => 0,
            ActionKind::Evade => 1,
            ActionKind::Parry => 2,
            ActionKind::Tackle => 3,
        }
    }

    /// Single-cell glyph used in queue strips.
    pub fn glyph(self) -> char {
        match self {
            ActionKind::Slash => '/',
            ActionKind::Evade => '~',
            ActionKind::Parry => 'X',
            ActionKind::Tackle => '#',
        }
    }

    /// Slash and Tackle deal damage; Parry and Evade are postures.
    pub fn is_offensive(self) -> bool {
        matches!(self, ActionKind::Slash | ActionKind::Tackle)
    }
}

/// Fixed-capacity action list with a replay cursor.
///
/// The cursor always points at the action `next()` will return and wraps
/// to the front after the last queued action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionRing {
    slots: ArrayVec<ActionKind, ACTION_CAPACITY>,
    cursor: usize,
}

impl ActionRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions(actions: &[ActionKind]) -> Self {
        let mut ring = Self::new();
        for &a in actions.iter().take(ACTION_CAPACITY) {
            ring.slots.push(a);
        }
        ring
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_slice(&self) -> &[ActionKind] {
        &self.slots
    }

    /// Append an action. Returns `false` (and drops it) when full.
    pub fn push(&mut self, action: ActionKind) -> bool {
        self.slots.try_push(action).is_ok()
    }

    /// The action under the cursor, then step the cursor cyclically.
    /// `None` only for an empty ring, which leaves the cursor untouched.
    pub fn next(&mut self) -> Option<ActionKind> {
        let action = self.slots.get(self.cursor).copied()?;
        self.cursor = (self.cursor + 1) % self.slots.len();
        Some(action)
    }

    /// The action `next()` would return, without stepping.
    pub fn peek(&self) -> Option<ActionKind> {
        self.slots.get(self.cursor).copied()
    }

    /// Remove the action at `index`, shifting the tail left by one.
    ///
    /// The cursor keeps its index. If that index fell off the end, it
    /// wraps to 0.
    pub fn remove(&mut self, index: usize) -> Option<ActionKind> {
        if index >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(index);
        if self.cursor >= self.slots.len() {
            self.cursor = 0;
        }
        Some(removed)
    }

    /// Drop every action and rewind the cursor.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionKind::*;

    #[test]
    fn next_cycles_in_insertion_order() {
        let mut ring = ActionRing::from_actions(&[Slash, Parry, Tackle]);
        let drawn: Vec<_> = (0..5).filter_map(|_| ring.next()).collect();
        assert_eq!(drawn, vec![Slash, Parry, Tackle, Slash, Parry]);
        assert_eq!(ring.cursor(), 2);
    }

    #[test]
    fn next_on_empty_ring() {
        let mut ring = ActionRing::new();
        assert_eq!(ring.next(), None);
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn push_drops_when_full() {
        let mut ring = ActionRing::new();
        for _ in 0..ACTION_CAPACITY {
            assert!(ring.push(Evade));
        }
        assert!(ring.is_full());
        assert!(!ring.push(Slash));
        assert_eq!(ring.len(), ACTION_CAPACITY);
        assert!(ring.as_slice().iter().all(|&a| a == Evade));
    }

    #[test]
    fn remove_shifts_tail() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade, Parry, Tackle]);
        assert_eq!(ring.remove(1), Some(Evade));
        assert_eq!(ring.as_slice(), &[Slash, Parry, Tackle]);
        assert_eq!(ring.remove(3), None);
    }

    #[test]
    fn remove_keeps_cursor_in_range() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade]);
        ring.next();
        assert_eq!(ring.cursor(), 1);
        ring.remove(1);
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.next(), Some(Slash));
    }

    #[test]
    fn remove_before_cursor_keeps_index_or_wraps() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade, Parry]);
        ring.next();
        ring.next();
        assert_eq!(ring.peek(), Some(Parry));
        ring.remove(0);
        // Index 2 no longer exists, so the cursor wraps.
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.peek(), Some(Evade));
    }

    #[test]
    fn clear_rewinds() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade]);
        ring.next();
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn from_actions_truncates_to_capacity() {
        let many = [Tackle; ACTION_CAPACITY + 3];
        assert_eq!(ActionRing::from_actions(&many).len(), ACTION_CAPACITY);
    }

    #[test]
    fn index_matches_catalog_order() {
        for (i, kind) in ActionKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
