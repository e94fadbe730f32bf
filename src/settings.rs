//! Round settings
//!
//! Geometry and pacing knobs the host may override (usually from a JSON
//! blob). The difficulty formulas themselves are fixed in `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Round length (seconds)
    pub round_length_secs: f64,
    /// Lives at round start
    pub starting_lives: u32,
    /// RNG seed for reproducible rounds
    pub seed: u64,

    // === Geometry (pixels) ===
    pub avatar_width: f32,
    pub avatar_height: f32,
    /// Gap between the avatar and the bottom edge
    pub avatar_bottom_margin: f32,
    /// Items are square
    pub item_size: f32,
    /// Items finish falling this far below the bottom edge
    pub exit_margin: f32,

    // === Controls / feedback ===
    /// A directional tap moves `speed * move_step_scale` px
    pub move_step_scale: f32,
    /// How long a caught item stays visible (ms)
    pub caught_linger_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_length_secs: ROUND_LENGTH_SECS,
            starting_lives: STARTING_LIVES,
            seed: 0,

            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            avatar_bottom_margin: 0.0,
            item_size: ITEM_SIZE,
            exit_margin: EXIT_MARGIN,

            move_step_scale: MOVE_STEP_SCALE,
            caught_linger_ms: CAUGHT_LINGER_MS,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Replace values that would break round invariants with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.round_length_secs.is_finite() && self.round_length_secs > 0.0) {
            log::warn!("round_length_secs {} out of range, using default", self.round_length_secs);
            self.round_length_secs = defaults.round_length_secs;
        }
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be at least 1, using default");
            self.starting_lives = defaults.starting_lives;
        }
        fn positive(value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        }
        fn non_negative(value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value >= 0.0 { value } else { fallback }
        }
        self.avatar_width = positive(self.avatar_width, defaults.avatar_width);
        self.avatar_height = positive(self.avatar_height, defaults.avatar_height);
        self.item_size = positive(self.item_size, defaults.item_size);
        self.avatar_bottom_margin = non_negative(self.avatar_bottom_margin, 0.0);
        self.exit_margin = non_negative(self.exit_margin, defaults.exit_margin);
        self.move_step_scale = non_negative(self.move_step_scale, defaults.move_step_scale);
        if !(self.caught_linger_ms.is_finite() && self.caught_linger_ms >= 0.0) {
            self.caught_linger_ms = defaults.caught_linger_ms;
        }
        self
    }
}
