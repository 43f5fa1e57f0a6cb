use std::{collections::HashMap, fmt, sync::Arc};

use crate::{Result, RingTimerError};

/// Cue name that disables playback for a period boundary.
pub const MUTE: &str = "mute";

/// Capability that can play a sound when a ring finishes a period.
///
/// Whatever the player does with the audio is opaque to the timer: playback
/// is fire-and-forget and no result is consumed.
pub trait AudioPlayer {
    fn play(&self);
}

/// Sound attached to a ring period: either the mute sentinel or a named
/// handle to an [`AudioPlayer`].
#[derive(Clone, Default)]
pub enum Sound {
    #[default]
    Mute,
    Cue {
        name: String,
        player: Arc<dyn AudioPlayer>,
    },
}

impl Sound {
    pub fn cue(name: impl Into<String>, player: Arc<dyn AudioPlayer>) -> Self {
        Self::Cue {
            name: name.into(),
            player,
        }
    }

    /// Plays the sound unless it is muted. Returns whether a player was invoked.
    pub fn play(&self) -> bool {
        match self {
            Self::Mute => false,
            Self::Cue { player, .. } => {
                player.play();
                true
            }
        }
    }
}

impl fmt::Debug for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mute => f.write_str("Mute"),
            Self::Cue { name, .. } => f.debug_struct("Cue").field("name", name).finish(),
        }
    }
}

/// Registry for the sound cues rings may reference by name.
#[derive(Default, Clone)]
pub struct SoundBank {
    players: HashMap<String, Arc<dyn AudioPlayer>>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, player: Arc<dyn AudioPlayer>) {
        self.players.insert(name.into(), player);
    }

    /// Turns a cue name into a [`Sound`]. `"mute"` always resolves, even on
    /// an empty bank.
    pub fn resolve(&self, name: &str) -> Result<Sound> {
        if name == MUTE {
            return Ok(Sound::Mute);
        }

        match self.players.get(name) {
            Some(player) => Ok(Sound::cue(name, player.clone())),
            None => Err(RingTimerError::UnknownSound(name.to_string())),
        }
    }
}

impl fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.players.keys().collect();
        names.sort();
        f.debug_struct("SoundBank").field("cues", &names).finish()
    }
}
