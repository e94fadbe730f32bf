//! The player's avatar
//!
//! Moves horizontally along the bottom of the playfield. Every mutation is
//! clamped so the avatar never leaves the playfield, including after a resize.

use serde::{Deserialize, Serialize};

use super::state::Playfield;
use crate::consts::*;

/// Directional move intent from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAvatar {
    /// Left edge in playfield pixels
    pub x: f32,
    /// Recomputed each tick from the difficulty ramp
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerAvatar {
    fn default() -> Self {
        Self::new(AVATAR_WIDTH, AVATAR_HEIGHT)
    }
}

impl PlayerAvatar {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            speed: PLAYER_SPEED_BASE,
            width,
            height,
        }
    }

    /// Rightmost allowed left edge
    pub fn max_x(&self, field: &Playfield) -> f32 {
        (field.width - self.width).max(0.0)
    }

    pub fn center_in(&mut self, field: &Playfield) {
        self.x = self.max_x(field) / 2.0;
    }

    pub fn clamp_to(&mut self, field: &Playfield) {
        let x = if self.x.is_finite() { self.x } else { 0.0 };
        self.x = x.clamp(0.0, self.max_x(field));
    }

    /// One directional tap: moves `speed * step_scale` px
    pub fn step(&mut self, direction: Direction, step_scale: f32, field: &Playfield) {
        self.x += direction.sign() * self.speed * step_scale;
        self.clamp_to(field);
    }

    /// Drag-style absolute placement of the left edge
    pub fn set_position(&mut self, x: f32, field: &Playfield) {
        self.x = x;
        self.clamp_to(field);
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_center_in() {
        let mut avatar = PlayerAvatar::new(100.0, 80.0);
        avatar.center_in(&Playfield::new(500.0, 400.0));
        assert_eq!(avatar.x, 200.0);
        assert_eq!(avatar.center_x(), 250.0);
    }

    #[test]
    fn test_step_uses_speed_and_scale() {
        let field = Playfield::new(800.0, 600.0);
        let mut avatar = PlayerAvatar::new(100.0, 80.0);
        avatar.x = 300.0;
        avatar.speed = 7.0;
        avatar.step(Direction::Right, 8.0, &field);
        assert_eq!(avatar.x, 356.0);
        avatar.step(Direction::Left, 8.0, &field);
        assert_eq!(avatar.x, 300.0);
    }

    #[test]
    fn test_step_clamps_at_edges() {
        let field = Playfield::new(800.0, 600.0);
        let mut avatar = PlayerAvatar::new(100.0, 80.0);
        avatar.x = 10.0;
        avatar.step(Direction::Left, 8.0, &field);
        assert_eq!(avatar.x, 0.0);
        avatar.x = 690.0;
        avatar.step(Direction::Right, 8.0, &field);
        assert_eq!(avatar.x, 700.0);
    }

    #[test]
    fn test_reclamp_after_shrink() {
        let mut avatar = PlayerAvatar::new(100.0, 80.0);
        avatar.set_position(650.0, &Playfield::new(800.0, 600.0));
        assert_eq!(avatar.x, 650.0);
        avatar.clamp_to(&Playfield::new(400.0, 600.0));
        assert_eq!(avatar.x, 300.0);
    }

    #[test]
    fn test_playfield_narrower_than_avatar() {
        let mut avatar = PlayerAvatar::new(100.0, 80.0);
        avatar.set_position(40.0, &Playfield::new(60.0, 600.0));
        assert_eq!(avatar.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_position_always_in_bounds(
            x in -10_000.0f32..10_000.0,
            width in 0.0f32..3000.0,
            moves in prop::collection::vec(any::<bool>(), 0..40),
        ) {
            let field = Playfield::new(width, 600.0);
            let mut avatar = PlayerAvatar::default();
            avatar.set_position(x, &field);
            for right in moves {
                let dir = if right { Direction::Right } else { Direction::Left };
                avatar.step(dir, MOVE_STEP_SCALE, &field);
                prop_assert!(avatar.x >= 0.0);
                prop_assert!(avatar.x <= avatar.max_x(&field));
            }
        }
    }
}
