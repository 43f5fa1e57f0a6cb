use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver},
    thread,
};

/// Keyboard command typed while the timer runs, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Work(i32),
    Rest(i32),
    Reset,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "p" | "pause" | "start" => Some(Self::Toggle),
            "w+" => Some(Self::Work(1)),
            "w-" => Some(Self::Work(-1)),
            "r+" => Some(Self::Rest(1)),
            "r-" => Some(Self::Rest(-1)),
            "reset" => Some(Self::Reset),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "enter: start/pause  w+/w-: work length  r+/r-: rest length  reset  q: quit";

/// Reads stdin on a helper thread. Only parsed commands cross the channel;
/// the timer itself stays on the caller's thread.
pub fn spawn_reader() -> Receiver<Command> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match Command::parse(&line) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None => tracing::warn!(input = %line.trim(), "unrecognised command; {}", HELP),
            }
        }
    });
    receiver
}
