//! Round state and core simulation types
//!
//! Everything the host reads back from the engine lives here: the phase,
//! the HUD snapshot and the event stream.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::items::ItemKind;
use crate::consts::*;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The round timer reached zero
    TimeExpired,
    /// The last life was lost to a hazard
    OutOfLives,
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round started yet
    Idle,
    /// Ticking
    Playing,
    /// Ticking suspended, state frozen
    Paused,
    /// Terminal until restarted
    Ended(EndReason),
}

impl Phase {
    pub fn is_ended(&self) -> bool {
        matches!(self, Phase::Ended(_))
    }
}

/// Termination notice handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEnd {
    pub reason: EndReason,
    pub final_score: u64,
}

/// Viewport dimensions in pixels, supplied by the host every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Mutable state of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: Phase,
    pub score: u64,
    pub lives: u32,
    /// Whole seconds left on the round timer
    pub time_left_secs: u32,
    /// Seconds of round time elapsed, drives the difficulty ramp
    pub ramp_elapsed_secs: f64,
}

impl RoundState {
    /// State before the first round starts
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            lives: STARTING_LIVES,
            time_left_secs: ROUND_LENGTH_SECS as u32,
            ramp_elapsed_secs: 0.0,
        }
    }

    /// Fresh state for a round that is starting now
    pub fn fresh(lives: u32, round_length_secs: f64) -> Self {
        Self {
            phase: Phase::Playing,
            score: 0,
            lives,
            time_left_secs: round_length_secs.max(0.0).ceil() as u32,
            ramp_elapsed_secs: 0.0,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            lives: self.lives,
            time_left_secs: self.time_left_secs,
            phase: self.phase,
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::idle()
    }
}

/// HUD view of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: u32,
    pub time_left_secs: u32,
    pub phase: Phase,
}

impl Snapshot {
    /// Text for a screen-reader live region
    pub fn announcement(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score {}. Time {} seconds. Lives {}.",
            self.score, self.time_left_secs, self.lives
        )
    }
}

/// Things that happened during a command or tick, for feedback effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Paused,
    Resumed,
    ItemSpawned { id: u32, kind: ItemKind },
    /// Gift caught (flash the avatar)
    GiftCaught { id: u32, points: u64 },
    /// Hazard hit (shake the playfield)
    HazardHit { id: u32, lives_left: u32 },
    RoundEnded(RoundEnd),
}
