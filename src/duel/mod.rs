//! Loop Duel: queue a loop of actions and watch it fight.
//!
//! Keys: [Enter] confirm, [1]-[3] pick a stage, [Z]/[X]/[C]/[V] or
//! [1]-[4] append an action, [D]/Backspace delete the last one, [P] lock
//! in, [R] reset the queue (or retry after a result).

pub mod actions;
pub mod combat;
pub mod editor;
pub mod effects;
pub mod host;
pub mod logic;
pub mod matchup;
pub mod render;
pub mod ring;
pub mod stage;
pub mod state;
pub mod transition;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::DuelConfig;
use crate::input::{ClickState, InputEvent};

use actions::*;
use host::{Audio, TracedAudio};
use render::{GlyphAtlas, ACTION_KEYS};
use ring::ActionKind;
use stage::StageId;
use state::{DuelState, Scene};

pub struct DuelGame {
    state: DuelState,
    audio: Box<dyn Audio>,
    atlas: GlyphAtlas,
}

impl DuelGame {
    pub fn new(config: DuelConfig) -> Self {
        Self::with_audio(config, Box::new(TracedAudio))
    }

    pub fn with_audio(config: DuelConfig, audio: Box<dyn Audio>) -> Self {
        Self {
            state: DuelState::new(config),
            audio,
            atlas: GlyphAtlas::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DuelState {
        &self.state
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(ch) => self.handle_key(*ch),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Hover(id) => logic::hover(&mut self.state, *id, self.audio.as_mut()),
        }
    }

    /// Advance by `dt` seconds of wall-clock time.
    pub fn update(&mut self, dt: f32) {
        logic::update(&mut self.state, dt, self.audio.as_mut(), &self.atlas);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, &self.atlas, f, area, click_state);
    }

    fn handle_key(&mut self, ch: char) -> bool {
        let state = &mut self.state;
        let audio = self.audio.as_mut();
        let ch = ch.to_ascii_uppercase();

        match state.scene.current() {
            Scene::TitleScreen => match ch {
                '\n' | ' ' => logic::confirm(state, audio),
                _ => false,
            },
            Scene::StageSelect => match digit_index(ch).and_then(StageId::from_index) {
                Some(stage) => logic::select_stage(state, stage, audio),
                None => false,
            },
            Scene::GameInProgress => {
                if let Some(kind) = palette_action(ch) {
                    return logic::push_action(state, kind);
                }
                match ch {
                    'D' | '\x08' => logic::delete_last(state),
                    'P' => logic::lock_in(state, audio),
                    'R' => logic::reset_queue(state),
                    _ => false,
                }
            }
            Scene::GameOver | Scene::GameClear => match ch {
                '\n' | ' ' => logic::confirm(state, audio),
                'R' => logic::retry(state, audio),
                _ => false,
            },
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        let state = &mut self.state;
        let audio = self.audio.as_mut();

        match id {
            CONFIRM => logic::confirm(state, audio),
            RETRY => logic::retry(state, audio),
            LOCK_IN => logic::lock_in(state, audio),
            RESET => logic::reset_queue(state),
            DELETE_LAST => logic::delete_last(state),
            _ if (STAGE_BASE..STAGE_BASE + StageId::ALL.len() as u16).contains(&id) => {
                match StageId::from_index((id - STAGE_BASE) as usize) {
                    Some(stage) => logic::select_stage(state, stage, audio),
                    None => false,
                }
            }
            _ if (PUSH_BASE..PUSH_BASE + ActionKind::ALL.len() as u16).contains(&id) => {
                logic::push_action(state, ActionKind::ALL[(id - PUSH_BASE) as usize])
            }
            _ if (DELETE_BASE..DELETE_BASE + ring::ACTION_CAPACITY as u16).contains(&id) => {
                logic::delete_action(state, (id - DELETE_BASE) as usize)
            }
            _ => false,
        }
    }
}

/// '1'..'9' → 0..8.
fn digit_index(ch: char) -> Option<usize> {
    match ch.to_digit(10) {
        Some(d) if d > 0 => Some(d as usize - 1),
        _ => None,
    }
}

fn palette_action(ch: char) -> Option<ActionKind> {
    if let Some(i) = ACTION_KEYS.iter().position(|&k| k == ch) {
        return Some(ActionKind::ALL[i]);
    }
    digit_index(ch).and_then(|i| ActionKind::ALL.get(i).copied())
}
