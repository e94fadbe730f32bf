//! Deterministic round engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is always passed in, never read from the platform
//! - Seeded RNG only
//! - Stable iteration order (by item ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod command;
pub mod difficulty;
pub mod items;
pub mod player;
pub mod round;
pub mod scoring;
pub mod spawner;
pub mod state;

pub use clock::RoundClock;
pub use collision::{Aabb, Contact, ItemTrack, avatar_box, catch_overlap, detect_contacts};
pub use command::{Command, CommandInbox, CommandSender};
pub use difficulty::Difficulty;
pub use items::{FallingItem, GiftStyle, ItemKind, ItemRegistry, ItemView};
pub use player::{Direction, PlayerAvatar};
pub use round::Round;
pub use scoring::{ContactOutcome, apply_contact};
pub use spawner::{SpawnRoll, Spawner};
pub use state::{EndReason, GameEvent, Phase, Playfield, RoundEnd, RoundState, Snapshot};
