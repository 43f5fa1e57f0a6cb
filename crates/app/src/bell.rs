use std::io::{self, Write};

use ring_timer_core::{AudioPlayer, SoundBank};

/// Cue names used by the Pomodoro rings.
pub const CUES: [&str; 2] = ["bell-1", "bell-2"];

/// Rings the terminal bell.
#[derive(Debug)]
pub struct TerminalBell {
    cue: &'static str,
}

impl AudioPlayer for TerminalBell {
    fn play(&self) {
        tracing::info!(cue = self.cue, "bell");
        print!("\x07");
        io::stdout().flush().ok();
    }
}

/// Stands in for a player when nothing should be heard.
#[derive(Debug)]
pub struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&self) {}
}

pub fn terminal_bank() -> SoundBank {
    let mut bank = SoundBank::new();
    for cue in CUES {
        bank.register(cue, std::sync::Arc::new(TerminalBell { cue }));
    }
    bank
}

pub fn silent_bank() -> SoundBank {
    let mut bank = SoundBank::new();
    for cue in CUES {
        bank.register(cue, std::sync::Arc::new(SilentPlayer));
    }
    bank
}
