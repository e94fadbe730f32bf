//! Input commands and the inbox that carries them to the round owner
//!
//! Input arrives whenever the host's event handlers fire. Producers push into
//! the inbox from anywhere; the owning loop drains it once per tick so the
//! round is only ever mutated from one place.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use super::player::Direction;

/// A request from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Button or key tap
    Move(Direction),
    /// Drag to an absolute left-edge position
    SetPosition(f32),
    Pause,
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
    Restart,
}

/// Cloneable producer handle
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Queue a command. Returns false if the inbox is gone.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Single-consumer command queue
#[derive(Debug)]
pub struct CommandInbox {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl Default for CommandInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let inbox = CommandInbox::new();
        let sender = inbox.sender();
        assert!(sender.send(Command::Move(Direction::Left)));
        assert!(sender.send(Command::Pause));
        assert_eq!(
            inbox.drain(),
            vec![Command::Move(Direction::Left), Command::Pause]
        );
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn test_senders_from_other_threads() {
        let inbox = CommandInbox::new();
        let sender = inbox.sender();
        std::thread::spawn(move || {
            sender.send(Command::Restart);
        })
        .join()
        .unwrap();
        assert_eq!(inbox.drain(), vec![Command::Restart]);
    }

    #[test]
    fn test_send_fails_after_inbox_dropped() {
        let inbox = CommandInbox::new();
        let sender = inbox.sender();
        drop(inbox);
        assert!(!sender.send(Command::Pause));
    }
}
