//! Background music and click feedback, gated on a one-time unlock.
//!
//! Music may only start from inside a user gesture (the Start control). Until
//! the first successful start, click sounds and volume changes are skipped.

use crate::error::AudioError;

/// Volume the background track is created with.
pub const BASELINE_VOLUME: f32 = 0.32;
/// Background volume while questions are shown.
pub const QUIZ_VOLUME: f32 = 0.28;
/// Background volume under the proposal letter.
pub const PROPOSE_VOLUME: f32 = 0.22;
/// Background volume on the closing screen.
pub const DONE_VOLUME: f32 = 0.24;
/// Volume of the click sound. Applied by surfaces when they load it.
pub const CONFIRMATION_VOLUME: f32 = 0.45;

/// Audio primitives for the two sound handles.
///
/// Implementations must not block: `background_start` reports whether the
/// platform accepted the start request.
pub trait AudioSurface {
    /// Start the looping background track.
    fn background_start(&mut self) -> Result<(), AudioError>;

    /// Adjust the background volume (0.0..=1.0) without restarting it.
    fn background_set_volume(&mut self, volume: f32);

    /// Rewind the click sound and play it.
    fn confirmation_play_from_start(&mut self) -> Result<(), AudioError>;
}

/// Surface that plays nothing and never unlocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSurface for SilentAudio {
    fn background_start(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unavailable("audio disabled".into()))
    }

    fn background_set_volume(&mut self, _volume: f32) {}

    fn confirmation_play_from_start(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

pub struct AudioGate {
    surface: Box<dyn AudioSurface>,
    unlocked: bool,
}

impl AudioGate {
    pub fn new(mut surface: Box<dyn AudioSurface>) -> Self {
        surface.background_set_volume(BASELINE_VOLUME);
        Self {
            surface,
            unlocked: false,
        }
    }

    /// The Unlock Flag. Never resets once set.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Try to start the music. Returns true only on the call that unlocks.
    ///
    /// A refused start leaves the gate locked; the next Start tap retries.
    pub fn request_music_start(&mut self) -> bool {
        if self.unlocked {
            return false;
        }
        match self.surface.background_start() {
            Ok(()) => {
                self.unlocked = true;
                tracing::info!("background music unlocked");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "background music start refused");
                false
            }
        }
    }

    /// Click feedback for a control press. Silent until unlocked.
    pub fn play_confirmation(&mut self) {
        if !self.unlocked {
            return;
        }
        if let Err(e) = self.surface.confirmation_play_from_start() {
            tracing::debug!(error = %e, "confirmation sound failed");
        }
    }

    /// Stage-entry volume change. Skipped while locked.
    pub fn set_volume(&mut self, volume: f32) {
        if self.unlocked {
            self.surface.background_set_volume(volume);
        }
    }
}

impl std::fmt::Debug for AudioGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioGate")
            .field("unlocked", &self.unlocked)
            .finish_non_exhaustive()
    }
}
