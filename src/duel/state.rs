//! Game state (data only, no logic).

use crate::config::DuelConfig;

use super::combat::{Combat, CombatSettings};
use super::effects::Effects;
use super::stage::StageId;
use super::transition::TransitionState;

/// Maximum message log length.
pub const MAX_LOG: usize = 30;

/// Outer scene. Stage data is static, so selection loads it synchronously
/// and goes straight to `GameInProgress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    TitleScreen,
    StageSelect,
    GameInProgress,
    GameOver,
    GameClear,
}

impl Scene {
    pub fn label(self) -> &'static str {
        match self {
            Scene::TitleScreen => "title",
            Scene::StageSelect => "stage select",
            Scene::GameInProgress => "in progress",
            Scene::GameOver => "game over",
            Scene::GameClear => "game clear",
        }
    }
}

pub struct DuelState {
    pub config: DuelConfig,
    pub scene: TransitionState<Scene>,
    pub combat: Combat,
    pub effects: Effects,
    /// Stage being played (or last played, for Retry).
    pub stage: StageId,
    /// Click id under the pointer.
    pub hovered: Option<u16>,
    pub log: Vec<String>,
}

impl DuelState {
    pub fn new(config: DuelConfig) -> Self {
        let combat = Combat::new(CombatSettings::from(&config));
        let effects = Effects::new(config.effect_period, config.effect_life);
        Self {
            config,
            scene: TransitionState::new(Scene::TitleScreen),
            combat,
            effects,
            stage: StageId::Outskirts,
            hovered: None,
            log: Vec::new(),
        }
    }

    pub fn add_log(&mut self, text: impl Into<String>) {
        self.log.push(text.into());
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }
}
