//! Gift Catch - a falling-gift arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round engine (clock, difficulty, spawning, collisions, scoring)
//! - `settings`: Tunable round configuration
//! - `highscores`: Best-score tracking (storage is left to the host)
//!
//! Rendering, input capture and persistence live outside this crate. The host
//! feeds timestamps, playfield dimensions and commands, and reads back
//! snapshots, item descriptors and events.

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_LENGTH_SECS: f64 = 60.0;
    /// Lives at round start
    pub const STARTING_LIVES: u32 = 3;

    /// Ramp time (seconds) after which spawn cadence and player speed stop scaling
    pub const RAMP_HORIZON_SECS: f64 = 45.0;

    /// Spawn interval at round start (ms)
    pub const SPAWN_INTERVAL_START_MS: f64 = 1100.0;
    /// How much the spawn interval shrinks over the ramp (ms), floor is 450ms
    pub const SPAWN_INTERVAL_RANGE_MS: f64 = 650.0;

    /// Fall duration at round start (seconds)
    pub const FALL_DURATION_START_SECS: f64 = 4.5;
    /// Maximum reduction of the fall duration, floor is 1.2s
    pub const FALL_DURATION_MAX_CUT_SECS: f64 = 3.3;
    /// Ramp seconds per second of fall-duration reduction
    pub const FALL_DURATION_RAMP_DIVISOR: f64 = 12.0;

    /// Hazard share at round start
    pub const HAZARD_PROBABILITY_BASE: f64 = 0.05;
    /// Hazard share ceiling
    pub const HAZARD_PROBABILITY_CAP: f64 = 0.18;
    /// Ramp seconds per unit of hazard probability growth
    pub const HAZARD_RAMP_DIVISOR: f64 = 80.0;

    /// Avatar speed at round start (px per move step unit)
    pub const PLAYER_SPEED_BASE: f32 = 7.0;
    /// Avatar speed gained over the ramp
    pub const PLAYER_SPEED_RANGE: f32 = 5.0;

    /// Flat reward for every caught gift
    pub const GIFT_BASE_REWARD: u64 = 10;
    /// Bonus grows every this many ramp seconds
    pub const GIFT_BONUS_STEP_SECS: f64 = 10.0;
    /// Bonus points per elapsed step
    pub const GIFT_BONUS_PER_STEP: u64 = 2;

    /// Fraction of an item's width (centered) that counts for a catch
    pub const CATCH_BAND_FRACTION: f32 = 0.4;

    /// Geometry defaults (pixels)
    pub const AVATAR_WIDTH: f32 = 96.0;
    pub const AVATAR_HEIGHT: f32 = 80.0;
    pub const ITEM_SIZE: f32 = 48.0;
    /// Items finish their fall this far below the bottom edge
    pub const EXIT_MARGIN: f32 = 60.0;

    /// A directional tap moves the avatar by `speed * MOVE_STEP_SCALE` px
    pub const MOVE_STEP_SCALE: f32 = 8.0;
    /// Caught items stay visible this long before removal (ms)
    pub const CAUGHT_LINGER_MS: f64 = 450.0;
}
