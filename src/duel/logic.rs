//! Pure game logic (no rendering / IO).
//!
//! One `update(dt)` per frame drives the scene machine, combat and effects.
//! Input operations return whether they were accepted; the planning edits
//! only go through while both the scene and the combat phase are settled.

use super::combat::{CombatEvent, CombatPhase, TurnRecord};
use super::editor;
use super::effects::Side;
use super::host::{AssetId, Assets, Audio, SoundCue};
use super::matchup::Strike;
use super::ring::ActionKind;
use super::stage::StageId;
use super::state::{DuelState, Scene};

// ── Frame update ─────────────────────────────────────────────

pub fn update(state: &mut DuelState, dt: f32, audio: &mut dyn Audio, assets: &dyn Assets) {
    state.scene.tick(dt);

    let in_progress = state.scene.is_settled_in(Scene::GameInProgress);
    for event in state.combat.step(dt, in_progress) {
        apply_event(state, event, audio, assets);
    }
    state.effects.advance(dt);

    if in_progress {
        match state.combat.outcome() {
            Some(CombatPhase::PlayerDied) => go(state, Scene::GameOver),
            Some(CombatPhase::StageComplete) => go(state, Scene::GameClear),
            _ => {}
        }
    }
}

fn go(state: &mut DuelState, to: Scene) {
    let from = state.scene.current();
    if state.scene.request(to, state.config.scene_fade) {
        tracing::info!(from = from.label(), to = to.label(), "scene");
    }
}

fn apply_event(state: &mut DuelState, event: CombatEvent, audio: &mut dyn Audio, assets: &dyn Assets) {
    match event {
        CombatEvent::Turn(record) => apply_turn(state, record, audio, assets),
        CombatEvent::EnemyDown => {
            audio.play(SoundCue::EnemyDied);
            state.add_log("The enemy falls.");
        }
        CombatEvent::WaveCleared { chain_index } => {
            audio.play(SoundCue::PhaseAdvance);
            state.add_log(format!("Wave {} cleared.", chain_index + 1));
        }
        CombatEvent::StageCleared => {
            state.add_log(format!("{} cleared!", state.stage.name()));
        }
        CombatEvent::PlayerDown => state.add_log("You have fallen."),
        CombatEvent::FailsafeTripped => {
            state.add_log("Neither side can land a blow. The duel is lost.")
        }
    }
}

fn apply_turn(state: &mut DuelState, record: TurnRecord, audio: &mut dyn Audio, assets: &dyn Assets) {
    let strikes = [
        (record.exchange.by_player, record.player, Side::Enemy),
        (record.exchange.by_enemy, record.enemy, Side::Player),
    ];
    for (strike, kind, target) in strikes {
        if strike == Strike::Hit {
            audio.play(SoundCue::Hit(kind));
            state.effects.spawn(AssetId::ActionIcon(kind), target, assets);
        }
    }
    state.add_log(format!(
        "{} vs {}: {}",
        record.player.name(),
        record.enemy.name(),
        describe(record)
    ));
}

fn describe(record: TurnRecord) -> &'static str {
    match (record.exchange.by_player, record.exchange.by_enemy) {
        (Strike::Hit, Strike::Hit) => "both hit",
        (Strike::Hit, _) => "you hit",
        (_, Strike::Hit) => "you are hit",
        (Strike::Blocked, _) | (_, Strike::Blocked) => "blocked",
        (Strike::Idle, Strike::Idle) => "nothing happens",
    }
}

// ── Scene operations ─────────────────────────────────────────

/// Confirm input: Title → StageSelect, GameOver/GameClear → StageSelect.
pub fn confirm(state: &mut DuelState, audio: &mut dyn Audio) -> bool {
    if !state.scene.is_settled() {
        return false;
    }
    match state.scene.current() {
        Scene::TitleScreen | Scene::GameOver | Scene::GameClear => {
            audio.play(SoundCue::Confirm);
            go(state, Scene::StageSelect);
            true
        }
        Scene::StageSelect | Scene::GameInProgress => false,
    }
}

pub fn select_stage(state: &mut DuelState, stage: StageId, audio: &mut dyn Audio) -> bool {
    if !state.scene.is_settled_in(Scene::StageSelect) {
        return false;
    }
    state.stage = stage;
    audio.play(SoundCue::Confirm);
    start_stage(state, audio);
    true
}

/// Replay the current stage from GameOver/GameClear.
pub fn retry(state: &mut DuelState, audio: &mut dyn Audio) -> bool {
    let finished = state.scene.is_settled_in(Scene::GameOver)
        || state.scene.is_settled_in(Scene::GameClear);
    if !finished {
        return false;
    }
    start_stage(state, audio);
    true
}

fn start_stage(state: &mut DuelState, audio: &mut dyn Audio) {
    state.combat.load(state.stage);
    state.effects.clear();
    state.log.clear();
    state.add_log(format!("{}: build your loop.", state.stage.name()));
    state.combat.begin();
    audio.play(SoundCue::GameBegin);
    go(state, Scene::GameInProgress);
}

// ── Planning edits ───────────────────────────────────────────

/// Queue edits and lock-in are accepted only here.
pub fn can_edit(state: &DuelState) -> bool {
    state.scene.is_settled_in(Scene::GameInProgress) && state.combat.is_planning()
}

fn rejected<T>(result: Result<T, editor::QueueError>, what: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, "{what} rejected");
            None
        }
    }
}

pub fn push_action(state: &mut DuelState, kind: ActionKind) -> bool {
    if !can_edit(state) {
        return false;
    }
    rejected(editor::push(&mut state.combat.player.actions, kind), "push").is_some()
}

pub fn delete_action(state: &mut DuelState, index: usize) -> bool {
    if !can_edit(state) {
        return false;
    }
    let combat = &mut state.combat;
    let result = editor::delete(&mut combat.player.actions, &combat.progression, index);
    rejected(result, "delete").is_some()
}

pub fn delete_last(state: &mut DuelState) -> bool {
    if !can_edit(state) {
        return false;
    }
    let combat = &mut state.combat;
    let result = editor::delete_last(&mut combat.player.actions, &combat.progression);
    rejected(result, "delete").is_some()
}

pub fn lock_in(state: &mut DuelState, audio: &mut dyn Audio) -> bool {
    if !can_edit(state) {
        return false;
    }
    match rejected(state.combat.lock_in(), "lock-in") {
        Some(boundary) => {
            audio.play(SoundCue::LockIn);
            state.add_log(format!("Locked in {boundary} actions."));
            true
        }
        None => false,
    }
}

pub fn reset_queue(state: &mut DuelState) -> bool {
    if !can_edit(state) {
        return false;
    }
    let combat = &mut state.combat;
    match rejected(editor::reset(&mut combat.player.actions, &mut combat.progression), "reset") {
        Some(left) => {
            state.add_log(format!("Queue cleared ({left} resets left)."));
            true
        }
        None => false,
    }
}

// ── Hover ────────────────────────────────────────────────────

/// Track the element under the pointer. Returns whether it changed.
pub fn hover(state: &mut DuelState, id: Option<u16>, audio: &mut dyn Audio) -> bool {
    if state.hovered == id {
        return false;
    }
    state.hovered = id;
    if id.is_some() {
        audio.play(SoundCue::Hover);
    }
    true
}
