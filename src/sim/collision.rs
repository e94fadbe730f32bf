//! Contact detection between falling items and the avatar
//!
//! Pure geometry on axis-aligned boxes in playfield pixels (y grows downward).
//! Catching is deliberately generous vertically and strict horizontally: only
//! the central band of an item counts, so clipping the avatar with an item's
//! edge is a miss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::items::{ItemKind, ItemRegistry};
use super::player::PlayerAvatar;
use super::state::Playfield;
use crate::consts::CATCH_BAND_FRACTION;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

/// Vertical path every item follows for the current playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTrack {
    pub item_size: f32,
    /// How far below the bottom edge an item ends its fall
    pub exit_margin: f32,
    pub field_height: f32,
}

impl ItemTrack {
    /// Box of an item at `progress`: fully above the top edge at 0,
    /// `exit_margin` below the bottom edge at 1
    pub fn item_box(&self, x: f32, progress: f64) -> Aabb {
        let travel = self.field_height + self.item_size + self.exit_margin;
        let top = -self.item_size + progress as f32 * travel;
        Aabb::new(x, top, self.item_size, self.item_size)
    }
}

/// Avatar box, resting `bottom_margin` px above the bottom edge
pub fn avatar_box(avatar: &PlayerAvatar, field: &Playfield, bottom_margin: f32) -> Aabb {
    let top = field.height - bottom_margin - avatar.height;
    Aabb::new(avatar.x, top, avatar.width, avatar.height)
}

/// Catch rule between an item box and the avatar box
pub fn catch_overlap(item: &Aabb, avatar: &Aabb) -> bool {
    let vertical = item.bottom() >= avatar.top() && item.top() <= avatar.bottom();
    if !vertical {
        return false;
    }

    let band_width = item.width() * CATCH_BAND_FRACTION;
    let band_left = item.left() + (item.width() - band_width) / 2.0;
    let band_right = band_left + band_width;
    band_right >= avatar.left() && band_left <= avatar.right()
}

/// A first contact between an item and the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub kind: ItemKind,
}

/// Test every catchable item against the avatar, flag hits as taken and
/// report them in id order. An item reports at most one contact ever.
pub fn detect_contacts(
    registry: &mut ItemRegistry,
    avatar: &Aabb,
    track: &ItemTrack,
    now_ms: f64,
    linger_ms: f64,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for item in registry.items_mut() {
        if !item.is_catchable(now_ms) {
            continue;
        }
        let item_box = track.item_box(item.x, item.progress(now_ms));
        if catch_overlap(&item_box, avatar) && item.mark_taken(now_ms, linger_ms) {
            contacts.push(Contact {
                id: item.id,
                kind: item.kind,
            });
        }
    }
    contacts
}
