//! Player-facing edits of the action ring.
//!
//! The locked prefix `[0, locked_in)` has been committed to execution and
//! can no longer be deleted. Everything after it is free to edit until the
//! next lock-in.

use super::combat::Progression;
use super::ring::{ActionKind, ActionRing, ACTION_CAPACITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("action queue is full ({ACTION_CAPACITY} slots)")]
    Full,

    #[error("slot {index} is locked in (boundary {boundary})")]
    Locked { index: usize, boundary: usize },

    #[error("slot {index} is out of range (queue holds {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("cannot lock in an empty queue")]
    Empty,

    #[error("no resets left")]
    NoResetsLeft,
}

/// Append `action`. Returns the slot it landed in.
pub fn push(ring: &mut ActionRing, action: ActionKind) -> Result<usize, QueueError> {
    if ring.push(action) {
        Ok(ring.len() - 1)
    } else {
        Err(QueueError::Full)
    }
}

/// Delete the unlocked action at `index`.
pub fn delete(
    ring: &mut ActionRing,
    progression: &Progression,
    index: usize,
) -> Result<ActionKind, QueueError> {
    if let Some(boundary) = progression.locked_in {
        if index < boundary {
            return Err(QueueError::Locked { index, boundary });
        }
    }
    ring.remove(index).ok_or(QueueError::OutOfRange {
        index,
        len: ring.len(),
    })
}

/// Delete the last action, if it is unlocked.
pub fn delete_last(
    ring: &mut ActionRing,
    progression: &Progression,
) -> Result<ActionKind, QueueError> {
    match ring.len() {
        0 => Err(QueueError::OutOfRange { index: 0, len: 0 }),
        len => delete(ring, progression, len - 1),
    }
}

/// Commit everything currently queued. Returns the new lock boundary.
pub fn lock_in(ring: &ActionRing, progression: &mut Progression) -> Result<usize, QueueError> {
    if ring.is_empty() {
        return Err(QueueError::Empty);
    }
    progression.locked_in = Some(ring.len());
    Ok(ring.len())
}

/// Spend one reset: clear the queue, rewind the cursor, and unlock.
/// Returns the resets left afterwards.
pub fn reset(ring: &mut ActionRing, progression: &mut Progression) -> Result<u32, QueueError> {
    if progression.resets_left == 0 {
        return Err(QueueError::NoResetsLeft);
    }
    ring.clear();
    progression.locked_in = None;
    progression.resets_left -= 1;
    Ok(progression.resets_left)
}

/// Whether slot `index` is inside the locked prefix.
pub fn is_locked(progression: &Progression, index: usize) -> bool {
    progression.locked_in.is_some_and(|boundary| index < boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionKind::*;

    fn progression() -> Progression {
        Progression::new(3)
    }

    #[test]
    fn push_until_full() {
        let mut ring = ActionRing::new();
        for i in 0..ACTION_CAPACITY {
            assert_eq!(push(&mut ring, Slash), Ok(i));
        }
        assert_eq!(push(&mut ring, Slash), Err(QueueError::Full));
    }

    #[test]
    fn delete_respects_lock_boundary() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade, Parry]);
        let mut prog = progression();
        assert_eq!(lock_in(&ring, &mut prog), Ok(3));
        push(&mut ring, Tackle).unwrap();
        push(&mut ring, Slash).unwrap();

        for i in 0..3 {
            assert_eq!(
                delete(&mut ring, &prog, i),
                Err(QueueError::Locked { index: i, boundary: 3 })
            );
        }
        assert_eq!(ring.len(), 5);

        assert_eq!(delete(&mut ring, &prog, 3), Ok(Tackle));
        assert_eq!(ring.as_slice(), &[Slash, Evade, Parry, Slash]);
    }

    #[test]
    fn delete_out_of_range() {
        let mut ring = ActionRing::from_actions(&[Slash]);
        let prog = progression();
        assert_eq!(
            delete(&mut ring, &prog, 4),
            Err(QueueError::OutOfRange { index: 4, len: 1 })
        );
    }

    #[test]
    fn delete_last_stops_at_lock() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade]);
        let mut prog = progression();
        lock_in(&ring, &mut prog).unwrap();
        push(&mut ring, Parry).unwrap();
        assert_eq!(delete_last(&mut ring, &prog), Ok(Parry));
        assert!(matches!(
            delete_last(&mut ring, &prog),
            Err(QueueError::Locked { .. })
        ));
    }

    #[test]
    fn lock_in_empty_rejected() {
        let ring = ActionRing::new();
        let mut prog = progression();
        assert_eq!(lock_in(&ring, &mut prog), Err(QueueError::Empty));
        assert_eq!(prog.locked_in, None);
    }

    #[test]
    fn reset_is_bounded() {
        let mut ring = ActionRing::from_actions(&[Slash, Evade]);
        let mut prog = progression();
        lock_in(&ring, &mut prog).unwrap();
        ring.next();

        assert_eq!(reset(&mut ring, &mut prog), Ok(2));
        assert!(ring.is_empty());
        assert_eq!(ring.cursor(), 0);
        assert_eq!(prog.locked_in, None);

        assert_eq!(reset(&mut ring, &mut prog), Ok(1));
        assert_eq!(reset(&mut ring, &mut prog), Ok(0));
        assert_eq!(reset(&mut ring, &mut prog), Err(QueueError::NoResetsLeft));
    }

    #[test]
    fn locked_prefix_query() {
        let ring = ActionRing::from_actions(&[Slash, Evade]);
        let mut prog = progression();
        assert!(!is_locked(&prog, 0));
        lock_in(&ring, &mut prog).unwrap();
        assert!(is_locked(&prog, 1));
        assert!(!is_locked(&prog, 2));
    }

    #[test]
    fn error_messages() {
        let e = QueueError::Locked { index: 1, boundary: 3 };
        assert_eq!(e.to_string(), "slot 1 is locked in (boundary 3)");
        assert_eq!(QueueError::Full.to_string(), "action queue is full (10 slots)");
    }
}
