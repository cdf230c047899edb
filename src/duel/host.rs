//! Seams to the audio and asset collaborators.
//!
//! The core only ever notifies (`play`) or asks (`texture_available`); it
//! never waits on either and never fails because of them.

use super::ring::ActionKind;

/// Fire-and-forget sound notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// The element under the pointer changed.
    Hover,
    /// A submit/confirm input was accepted.
    Confirm,
    LockIn,
    /// A strike of this kind landed.
    Hit(ActionKind),
    PhaseAdvance,
    EnemyDied,
    GameBegin,
}

/// Visual assets the renderer may or may not have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetId {
    ActionIcon(ActionKind),
}

pub trait Audio {
    fn play(&mut self, cue: SoundCue);
}

pub trait Assets {
    fn texture_available(&self, asset: AssetId) -> bool;
}

/// Audio sink that only traces cues.
pub struct TracedAudio;

impl Audio for TracedAudio {
    fn play(&mut self, cue: SoundCue) {
        tracing::trace!(?cue, "sound");
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records every cue, for assertions.
    #[derive(Default)]
    pub struct CueLog(pub Vec<SoundCue>);

    impl Audio for CueLog {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    pub struct AllAssets;

    impl Assets for AllAssets {
        fn texture_available(&self, _asset: AssetId) -> bool {
            true
        }
    }

    pub struct NoAssets;

    impl Assets for NoAssets {
        fn texture_available(&self, _asset: AssetId) -> bool {
            false
        }
    }
}
