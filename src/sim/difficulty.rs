//! Difficulty ramp
//!
//! Pure mapping from elapsed ramp seconds to the knobs the rest of the
//! simulation reads each tick. Total over every input: negative and NaN ramp
//! values are treated as zero.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty parameters at one instant of the round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Ramp seconds these parameters were derived from (clamped)
    pub ramp_secs: f64,
    /// Minimum gap between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Seconds a newly spawned item takes to cross the playfield
    pub fall_duration_secs: f64,
    /// Chance a new item is a hazard
    pub hazard_probability: f64,
    /// Avatar speed (px per move step unit)
    pub player_speed: f32,
    /// Bonus added on top of the base gift reward
    pub gift_bonus: u64,
}

impl Difficulty {
    pub fn at(ramp_secs: f64) -> Self {
        let ramp = ramp_secs.max(0.0);
        let p = Self::ramp_progress(ramp);

        let fall_cut = (ramp / FALL_DURATION_RAMP_DIVISOR).min(FALL_DURATION_MAX_CUT_SECS);
        let hazard = (HAZARD_PROBABILITY_BASE + ramp / HAZARD_RAMP_DIVISOR).min(HAZARD_PROBABILITY_CAP);
        let bonus_steps = (ramp / GIFT_BONUS_STEP_SECS).floor() as u64;

        Self {
            ramp_secs: ramp,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS - p * SPAWN_INTERVAL_RANGE_MS,
            fall_duration_secs: FALL_DURATION_START_SECS - fall_cut,
            hazard_probability: hazard,
            player_speed: PLAYER_SPEED_BASE + p as f32 * PLAYER_SPEED_RANGE,
            gift_bonus: bonus_steps * GIFT_BONUS_PER_STEP,
        }
    }

    /// Normalized ramp progress in [0, 1]
    pub fn ramp_progress(ramp_secs: f64) -> f64 {
        (ramp_secs.max(0.0) / RAMP_HORIZON_SECS).min(1.0)
    }

    /// Points for catching a gift right now
    pub fn gift_reward(&self) -> u64 {
        GIFT_BASE_REWARD + self.gift_bonus
    }
}
