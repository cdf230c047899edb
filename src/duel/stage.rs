//! Static stage catalogue: actors, waves, and the hand-authored stages.

use super::ring::{ActionKind, ActionRing};

use ActionKind::{Evade, Parry, Slash, Tackle};

/// A combatant: health plus its action ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub health: i32,
    pub max_health: i32,
    pub actions: ActionRing,
}

impl Actor {
    pub fn new(max_health: i32, actions: &[ActionKind]) -> Self {
        Self {
            health: max_health,
            max_health,
            actions: ActionRing::from_actions(actions),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }
}

/// One group of enemies fought in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
    pub enemies: Vec<Actor>,
}

impl Wave {
    pub fn new(enemies: Vec<Actor>) -> Self {
        Self { enemies }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Every enemy is down.
    pub fn is_exhausted(&self) -> bool {
        self.enemies.iter().all(Actor::is_dead)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageId {
    Outskirts,
    Barracks,
    Keep,
}

impl StageId {
    pub const ALL: [StageId; 3] = [StageId::Outskirts, StageId::Barracks, StageId::Keep];

    pub fn name(self) -> &'static str {
        match self {
            StageId::Outskirts => "Outskirts",
            StageId::Barracks => "Barracks",
            StageId::Keep => "The Keep",
        }
    }

    pub fn index(self) -> usize {
        match self {
            StageId::Outskirts => 0,
            StageId::Barracks => 1,
            StageId::Keep => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Build a fresh copy of the stage's waves.
    pub fn waves(self) -> Vec<Wave> {
        match self {
            StageId::Outskirts => vec![Wave::new(vec![
                Actor::new(3, &[Slash, Parry, Tackle, Parry]),
                Actor::new(3, &[Evade, Slash, Parry, Parry]),
                Actor::new(3, &[Tackle, Slash, Evade, Evade]),
            ])],
            StageId::Barracks => vec![
                Wave::new(vec![
                    Actor::new(2, &[Parry, Slash]),
                    Actor::new(2, &[Evade, Tackle]),
                ]),
                Wave::new(vec![Actor::new(4, &[Slash, Evade, Tackle, Parry, Slash])]),
            ],
            StageId::Keep => vec![
                Wave::new(vec![
                    Actor::new(3, &[Tackle, Tackle, Evade]),
                    Actor::new(3, &[Slash, Parry, Parry]),
                ]),
                Wave::new(vec![
                    Actor::new(3, &[Evade, Evade, Slash, Tackle]),
                    Actor::new(3, &[Parry, Slash, Evade]),
                ]),
                Wave::new(vec![Actor::new(
                    6,
                    &[Slash, Parry, Tackle, Evade, Slash, Slash, Parry],
                )]),
            ],
        }
    }
}
