//! Cosmetic hit markers handed to the renderer.
//!
//! Nothing in combat reads these back. They are spawned on landed strikes,
//! aged on their own interval, and dropped once they outlive `max_life`.

use crate::time::Interval;

use super::host::{AssetId, Assets};

/// Which combatant an effect is drawn over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub asset: AssetId,
    pub target: Side,
    pub elapsed: f32,
    pub max_life: f32,
}

impl Effect {
    /// Remaining life in `[0, 1]`, 1 when freshly spawned.
    pub fn strength(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (1.0 - self.elapsed / self.max_life).clamp(0.0, 1.0)
    }
}

pub struct Effects {
    active: Vec<Effect>,
    aging: Interval,
    life: f32,
}

impl Effects {
    pub fn new(period: f32, life: f32) -> Self {
        Self {
            active: Vec::new(),
            aging: Interval::new(period),
            life,
        }
    }

    /// Spawn a marker if the renderer has the asset. Returns whether it did.
    pub fn spawn(&mut self, asset: AssetId, target: Side, assets: &dyn Assets) -> bool {
        if !assets.texture_available(asset) {
            return false;
        }
        self.active.push(Effect {
            asset,
            target,
            elapsed: 0.0,
            max_life: self.life,
        });
        true
    }

    /// Age every effect once per elapsed aging period and drop expired ones.
    pub fn advance(&mut self, dt: f32) {
        let fires = self.aging.advance(dt);
        if fires == 0 {
            return;
        }
        let step = fires as f32 * self.aging.period();
        for effect in &mut self.active {
            effect.elapsed += step;
        }
        self.active.retain(|e| e.elapsed < e.max_life);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.aging.restart();
    }
}
