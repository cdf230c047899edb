//! Semantic action IDs for Loop Duel click targets.

use super::ring::ActionKind;

// ── Scene buttons ──────────────────────────────────────────────
/// Enter: title → stage select, game over / clear → stage select.
pub const CONFIRM: u16 = 1;
pub const RETRY: u16 = 2;

// ── Stage select ───────────────────────────────────────────────
/// Stage base: + index into `StageId::ALL`.
pub const STAGE_BASE: u16 = 10;

// ── Planning ───────────────────────────────────────────────────
/// Append base: + index into `ActionKind::ALL`.
pub const PUSH_BASE: u16 = 20;
/// Delete base: + queue slot.
pub const DELETE_BASE: u16 = 30;
pub const LOCK_IN: u16 = 50;
pub const RESET: u16 = 51;
pub const DELETE_LAST: u16 = 52;

pub fn push_id(kind: ActionKind) -> u16 {
    PUSH_BASE + kind.index() as u16
}
