//! Turn matchup rules.
//!
//! | Attacker | Blocked by | Otherwise        |
//! |----------|------------|------------------|
//! | Slash    | Parry      | 1 damage         |
//! | Tackle   | Evade      | 1 damage         |
//! | Parry    | -          | no attack        |
//! | Evade    | -          | no attack        |

use serde::{Deserialize, Serialize};

use super::ring::ActionKind;

/// Damage dealt by a landed strike.
pub const STRIKE_DAMAGE: i32 = 1;

/// Result of one side's action against the other side's action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strike {
    /// The strike lands for [`STRIKE_DAMAGE`].
    Hit,
    /// The defender's action counters the strike.
    Blocked,
    /// Nothing was thrown.
    Idle,
}

/// Resolve `attacker` against `defender`. Identical for player and enemy.
pub fn resolve(attacker: ActionKind, defender: ActionKind) -> Strike {
    match (attacker, defender) {
        (ActionKind::Slash, ActionKind::Parry) => Strike::Blocked,
        (ActionKind::Slash, _) => Strike::Hit,
        (ActionKind::Tackle, ActionKind::Evade) => Strike::Blocked,
        (ActionKind::Tackle, _) => Strike::Hit,
        (ActionKind::Parry | ActionKind::Evade, _) => Strike::Idle,
    }
}

/// Which matchup shape a session plays with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Both sides strike at each other with [`resolve`].
    #[default]
    Symmetric,
    /// Only the player's action is evaluated: offense strikes the enemy,
    /// a posture either counters the enemy's strike, ignores a posture, or
    /// is punished by the strike it does not cover.
    DualRole,
}

/// Both directions of one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// Player striking the enemy.
    pub by_player: Strike,
    /// Enemy striking the player.
    pub by_enemy: Strike,
}

impl Exchange {
    pub fn damage_to_enemy(&self) -> i32 {
        if self.by_player == Strike::Hit { STRIKE_DAMAGE } else { 0 }
    }

    pub fn damage_to_player(&self) -> i32 {
        if self.by_enemy == Strike::Hit { STRIKE_DAMAGE } else { 0 }
    }

    pub fn is_quiet(&self) -> bool {
        self.damage_to_enemy() == 0 && self.damage_to_player() == 0
    }
}

impl RuleSet {
    pub fn exchange(self, player: ActionKind, enemy: ActionKind) -> Exchange {
        match self {
            RuleSet::Symmetric => Exchange {
                by_player: resolve(player, enemy),
                by_enemy: resolve(enemy, player),
            },
            RuleSet::DualRole if player.is_offensive() => Exchange {
                by_player: resolve(player, enemy),
                by_enemy: Strike::Idle,
            },
            RuleSet::DualRole => Exchange {
                by_player: Strike::Idle,
                by_enemy: posture_against(player, enemy),
            },
        }
    }
}

/// How a defensive `posture` fares against the opponent's `action`.
fn posture_against(posture: ActionKind, action: ActionKind) -> Strike {
    match (posture, action) {
        (ActionKind::Parry, ActionKind::Slash) | (ActionKind::Evade, ActionKind::Tackle) => {
            Strike::Blocked
        }
        (ActionKind::Parry, ActionKind::Tackle) | (ActionKind::Evade, ActionKind::Slash) => {
            Strike::Hit
        }
        _ => Strike::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionKind::*;

    #[test]
    fn canonical_table() {
        assert_eq!(resolve(Slash, Parry), Strike::Blocked);
        assert_eq!(resolve(Slash, Tackle), Strike::Hit);
        assert_eq!(resolve(Slash, Slash), Strike::Hit);
        assert_eq!(resolve(Slash, Evade), Strike::Hit);
        assert_eq!(resolve(Tackle, Evade), Strike::Blocked);
        assert_eq!(resolve(Tackle, Parry), Strike::Hit);
        assert_eq!(resolve(Parry, Slash), Strike::Idle);
        assert_eq!(resolve(Evade, Tackle), Strike::Idle);
    }

    #[test]
    fn symmetric_trade_hits_both() {
        let ex = RuleSet::Symmetric.exchange(Slash, Tackle);
        assert_eq!(ex.damage_to_enemy(), 1);
        assert_eq!(ex.damage_to_player(), 1);
    }

    #[test]
    fn symmetric_roles_swap_cleanly() {
        for &a in &ActionKind::ALL {
            for &b in &ActionKind::ALL {
                let forward = RuleSet::Symmetric.exchange(a, b);
                let backward = RuleSet::Symmetric.exchange(b, a);
                assert_eq!(forward.by_player, backward.by_enemy);
                assert_eq!(forward.by_enemy, backward.by_player);
            }
        }
    }

    #[test]
    fn mutual_postures_are_quiet() {
        for &a in &[Parry, Evade] {
            for &b in &[Parry, Evade] {
                assert!(RuleSet::Symmetric.exchange(a, b).is_quiet());
                assert!(RuleSet::DualRole.exchange(a, b).is_quiet());
            }
        }
    }

    #[test]
    fn dual_role_offense_ignores_enemy_offense() {
        let ex = RuleSet::DualRole.exchange(Slash, Tackle);
        assert_eq!(ex.damage_to_enemy(), 1);
        assert_eq!(ex.damage_to_player(), 0);
    }

    #[test]
    fn dual_role_posture_outcomes() {
        assert_eq!(RuleSet::DualRole.exchange(Parry, Slash).by_enemy, Strike::Blocked);
        assert_eq!(RuleSet::DualRole.exchange(Parry, Tackle).damage_to_player(), 1);
        assert_eq!(RuleSet::DualRole.exchange(Evade, Tackle).by_enemy, Strike::Blocked);
        assert_eq!(RuleSet::DualRole.exchange(Evade, Slash).damage_to_player(), 1);
    }

    #[test]
    fn rule_set_serde_names() {
        let r: RuleSet = serde_json::from_str("\"dual_role\"").unwrap();
        assert_eq!(r, RuleSet::DualRole);
        assert_eq!(serde_json::to_string(&RuleSet::Symmetric).unwrap(), "\"symmetric\"");
    }
}
