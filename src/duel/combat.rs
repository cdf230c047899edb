//! Combat: the player's ring against a chain of enemy waves.
//!
//! Each turn tick first runs the guards (player down, stage done, wave
//! done, enemy down), and only if none fires draws one action from each
//! side and applies the matchup. A death is therefore noticed on the tick
//! *after* the blow that caused it.

use crate::config::DuelConfig;
use crate::time::Interval;

use super::editor::{self, QueueError};
use super::matchup::{Exchange, RuleSet};
use super::ring::ActionKind;
use super::stage::{Actor, StageId, Wave};
use super::transition::TransitionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatPhase {
    /// No stage loaded.
    Idle,
    Begin,
    PlayerPlanning,
    RunningTurn,
    PlayerDied,
    EnemyDied,
    GoingNextPhase,
    StageComplete,
}

impl CombatPhase {
    pub fn label(self) -> &'static str {
        match self {
            CombatPhase::Idle => "idle",
            CombatPhase::Begin => "begin",
            CombatPhase::PlayerPlanning => "planning",
            CombatPhase::RunningTurn => "fighting",
            CombatPhase::PlayerDied => "defeated",
            CombatPhase::EnemyDied => "enemy down",
            CombatPhase::GoingNextPhase => "next wave",
            CombatPhase::StageComplete => "stage complete",
        }
    }
}

/// Where the stage attempt stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    /// Current wave; equal to the wave count once the stage is complete.
    pub chain_index: usize,
    /// Current enemy within the wave; equal to its length once exhausted.
    pub enemy_index: usize,
    /// Queue prefix `[0, n)` committed to execution.
    pub locked_in: Option<usize>,
    pub resets_left: u32,
}

impl Progression {
    pub fn new(resets: u32) -> Self {
        Self {
            chain_index: 0,
            enemy_index: 0,
            locked_in: None,
            resets_left: resets,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CombatSettings {
    pub rules: RuleSet,
    pub turn_period: f32,
    pub stall_threshold: u32,
    pub reset_allowance: u32,
    pub player_health: i32,
    pub combat_fade: f32,
    pub begin_delay: f32,
}

impl From<&DuelConfig> for CombatSettings {
    fn from(c: &DuelConfig) -> Self {
        Self {
            rules: c.rules,
            turn_period: c.turn_period,
            stall_threshold: c.stall_threshold,
            reset_allowance: c.reset_allowance,
            player_health: c.player_health,
            combat_fade: c.combat_fade,
            begin_delay: c.begin_delay,
        }
    }
}

/// Both draws of one resolved turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: ActionKind,
    pub enemy: ActionKind,
    pub exchange: Exchange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A guard fired and requested this phase; no matchup was resolved.
    Guard(CombatPhase),
    Resolved(TurnRecord),
    /// Resolved, and the stall counter hit the threshold.
    Stalled(TurnRecord),
    /// One side had nothing queued.
    Skipped,
}

/// What happened during a [`Combat::step`], for sound and effect cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    Turn(TurnRecord),
    EnemyDown,
    WaveCleared { chain_index: usize },
    StageCleared,
    PlayerDown,
    FailsafeTripped,
}

pub struct Combat {
    pub player: Actor,
    pub waves: Vec<Wave>,
    pub progression: Progression,
    pub phase: TransitionState<CombatPhase>,
    /// Consecutive resolved turns with no health change.
    pub stall_count: u32,
    pub last_turn: Option<TurnRecord>,
    turn_clock: Interval,
    settings: CombatSettings,
}

fn go(phase: &mut TransitionState<CombatPhase>, to: CombatPhase, duration: f32) {
    let from = phase.current();
    if phase.request(to, duration) {
        tracing::info!(from = from.label(), to = to.label(), "combat phase");
    }
}

impl Combat {
    pub fn new(settings: CombatSettings) -> Self {
        Self {
            player: Actor::new(settings.player_health, &[]),
            waves: Vec::new(),
            progression: Progression::new(settings.reset_allowance),
            phase: TransitionState::new(CombatPhase::Idle),
            stall_count: 0,
            last_turn: None,
            turn_clock: Interval::new(settings.turn_period),
            settings,
        }
    }

    /// Reset the attempt and load `stage`'s waves.
    pub fn load(&mut self, stage: StageId) {
        tracing::info!(stage = stage.name(), "loading stage");
        self.load_waves(stage.waves());
    }

    pub fn load_waves(&mut self, waves: Vec<Wave>) {
        self.player = Actor::new(self.settings.player_health, &[]);
        self.waves = waves;
        self.progression = Progression::new(self.settings.reset_allowance);
        self.stall_count = 0;
        self.last_turn = None;
        self.turn_clock.restart();
    }

    /// Start the loaded stage.
    pub fn begin(&mut self) {
        go(&mut self.phase, CombatPhase::Begin, self.settings.combat_fade);
    }

    pub fn current_wave(&self) -> Option<&Wave> {
        self.waves.get(self.progression.chain_index)
    }

    pub fn current_enemy(&self) -> Option<&Actor> {
        self.current_wave()?.enemies.get(self.progression.enemy_index)
    }

    /// Fraction of the way to the next turn tick, for the turn timer.
    pub fn turn_progress(&self) -> f32 {
        (self.turn_clock.pending() / self.turn_clock.period()).clamp(0.0, 1.0)
    }

    /// Queue edits and lock-in are accepted only here.
    pub fn is_planning(&self) -> bool {
        self.phase.is_settled_in(CombatPhase::PlayerPlanning)
    }

    /// Reached a settled outcome the scene machine reacts to.
    pub fn outcome(&self) -> Option<CombatPhase> {
        match self.phase.current() {
            p @ (CombatPhase::PlayerDied | CombatPhase::StageComplete) if self.phase.is_settled() => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Commit the queue and start executing it.
    pub fn lock_in(&mut self) -> Result<usize, QueueError> {
        let boundary = editor::lock_in(&self.player.actions, &mut self.progression)?;
        self.stall_count = 0;
        self.turn_clock.restart();
        go(&mut self.phase, CombatPhase::RunningTurn, self.settings.combat_fade);
        Ok(boundary)
    }

    /// Advance one frame. Automatic transitions and turn ticks only run
    /// while `scene_settled` and the combat phase itself is settled.
    pub fn step(&mut self, dt: f32, scene_settled: bool) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        self.phase.tick(dt);
        if !scene_settled || !self.phase.is_settled() {
            return events;
        }

        let fade = self.settings.combat_fade;
        match self.phase.current() {
            CombatPhase::Begin => {
                go(&mut self.phase, CombatPhase::PlayerPlanning, self.settings.begin_delay);
            }
            CombatPhase::EnemyDied => {
                self.progression.enemy_index += 1;
                let wave_len = self.current_wave().map_or(0, Wave::len);
                if self.progression.enemy_index >= wave_len {
                    go(&mut self.phase, CombatPhase::GoingNextPhase, fade);
                } else {
                    go(&mut self.phase, CombatPhase::PlayerPlanning, fade);
                }
            }
            CombatPhase::GoingNextPhase => {
                events.push(CombatEvent::WaveCleared {
                    chain_index: self.progression.chain_index,
                });
                self.progression.chain_index += 1;
                self.progression.enemy_index = 0;
                if self.progression.chain_index >= self.waves.len() {
                    events.push(CombatEvent::StageCleared);
                    go(&mut self.phase, CombatPhase::StageComplete, fade);
                } else {
                    go(&mut self.phase, CombatPhase::PlayerPlanning, fade);
                }
            }
            CombatPhase::RunningTurn => {
                let fires = self.turn_clock.advance(dt);
                for _ in 0..fires {
                    if !self.phase.is_settled() {
                        break;
                    }
                    match self.resolve_turn() {
                        TurnOutcome::Resolved(record) => events.push(CombatEvent::Turn(record)),
                        TurnOutcome::Stalled(record) => {
                            events.push(CombatEvent::Turn(record));
                            events.push(CombatEvent::FailsafeTripped);
                        }
                        TurnOutcome::Guard(CombatPhase::EnemyDied) => {
                            events.push(CombatEvent::EnemyDown)
                        }
                        TurnOutcome::Guard(CombatPhase::PlayerDied) => {
                            events.push(CombatEvent::PlayerDown)
                        }
                        TurnOutcome::Guard(_) | TurnOutcome::Skipped => {}
                    }
                }
            }
            CombatPhase::Idle
            | CombatPhase::PlayerPlanning
            | CombatPhase::PlayerDied
            | CombatPhase::StageComplete => {}
        }
        events
    }

    /// One turn tick: guards, then the matchup.
    pub(crate) fn resolve_turn(&mut self) -> TurnOutcome {
        let fade = self.settings.combat_fade;

        if self.player.is_dead() {
            go(&mut self.phase, CombatPhase::PlayerDied, fade);
            return TurnOutcome::Guard(CombatPhase::PlayerDied);
        }
        let Some(wave) = self.waves.get_mut(self.progression.chain_index) else {
            go(&mut self.phase, CombatPhase::StageComplete, fade);
            return TurnOutcome::Guard(CombatPhase::StageComplete);
        };
        let Some(enemy) = wave.enemies.get_mut(self.progression.enemy_index) else {
            go(&mut self.phase, CombatPhase::GoingNextPhase, fade);
            return TurnOutcome::Guard(CombatPhase::GoingNextPhase);
        };
        if enemy.is_dead() {
            go(&mut self.phase, CombatPhase::EnemyDied, fade);
            return TurnOutcome::Guard(CombatPhase::EnemyDied);
        }

        if self.player.actions.is_empty() || enemy.actions.is_empty() {
            tracing::warn!(
                player = self.player.actions.len(),
                enemy = enemy.actions.len(),
                "turn skipped: empty action ring"
            );
            return TurnOutcome::Skipped;
        }
        let (Some(player_action), Some(enemy_action)) =
            (self.player.actions.next(), enemy.actions.next())
        else {
            return TurnOutcome::Skipped;
        };

        let before = (self.player.health, enemy.health);
        let exchange = self.settings.rules.exchange(player_action, enemy_action);
        enemy.take_damage(exchange.damage_to_enemy());
        self.player.take_damage(exchange.damage_to_player());

        let record = TurnRecord {
            player: player_action,
            enemy: enemy_action,
            exchange,
        };
        self.last_turn = Some(record);
        tracing::debug!(
            player = player_action.name(),
            enemy = enemy_action.name(),
            player_hp = self.player.health,
            enemy_hp = enemy.health,
            quiet = exchange.is_quiet(),
            "turn"
        );

        if before == (self.player.health, enemy.health) {
            self.stall_count += 1;
        } else {
            self.stall_count = 0;
        }

        if self.stall_count >= self.settings.stall_threshold {
            tracing::warn!(turns = self.stall_count, "stalled combat, forcing defeat");
            go(&mut self.phase, CombatPhase::PlayerDied, fade);
            return TurnOutcome::Stalled(record);
        }
        TurnOutcome::Resolved(record)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_action() -> impl Strategy<Value = ActionKind> {
        prop_oneof![
            Just(ActionKind::Slash),
            Just(ActionKind::Evade),
            Just(ActionKind::Parry),
            Just(ActionKind::Tackle),
        ]
    }

    fn arb_actor() -> impl Strategy<Value = Actor> {
        (1i32..4, prop::collection::vec(arb_action(), 1..6))
            .prop_map(|(hp, actions)| Actor::new(hp, &actions))
    }

    fn arb_waves() -> impl Strategy<Value = Vec<Wave>> {
        prop::collection::vec(prop::collection::vec(arb_actor(), 1..4).prop_map(Wave::new), 1..4)
    }

    proptest! {
        #[test]
        fn prop_progression_monotonic_and_terminates(
            waves in arb_waves(),
            player in prop::collection::vec(arb_action(), 1..6),
        ) {
            let mut s = CombatSettings::from(&DuelConfig::default());
            s.player_health = 30;
            let mut combat = Combat::new(s);
            combat.load_waves(waves);
            for a in player {
                editor::push(&mut combat.player.actions, a).unwrap();
            }
            combat.begin();

            let mut last = (0usize, 0usize);
            for _ in 0..20_000 {
                combat.step(0.25, true);
                if combat.is_planning() {
                    combat.lock_in().unwrap();
                }
                let now = (combat.progression.chain_index, combat.progression.enemy_index);
                prop_assert!(now.0 >= last.0);
                if now.0 == last.0 {
                    prop_assert!(now.1 >= last.1);
                }
                last = now;
                if combat.outcome().is_some() {
                    break;
                }
            }
            // Either the stage was cleared or the failsafe ended a stuck fight.
            prop_assert!(combat.outcome().is_some());
        }
    }
}
