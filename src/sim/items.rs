//! Falling items and the registry that owns them

use serde::{Deserialize, Serialize};

use super::spawner::SpawnRoll;

/// What an item does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Caught for points
    Gift,
    /// Coal - costs a life
    Hazard,
}

/// Cosmetic variety for gifts (renderer hint only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftStyle {
    Present,
    Tree,
    Teddy,
    Candy,
    Candle,
    Star,
    Sock,
}

impl GiftStyle {
    pub const ALL: [GiftStyle; 7] = [
        GiftStyle::Present,
        GiftStyle::Tree,
        GiftStyle::Teddy,
        GiftStyle::Candy,
        GiftStyle::Candle,
        GiftStyle::Star,
        GiftStyle::Sock,
    ];
}

/// An item in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Present only for gifts
    pub style: Option<GiftStyle>,
    /// Left edge in playfield pixels
    pub x: f32,
    pub spawned_at_ms: f64,
    /// Fixed at spawn time
    pub fall_duration_secs: f64,
    /// Set once on contact, never cleared
    pub taken: bool,
    /// Removal deadline once taken
    #[serde(default)]
    pub remove_at_ms: Option<f64>,
}

impl FallingItem {
    /// Fraction of the fall completed. 0 at spawn, 1 once past the bottom edge.
    pub fn progress(&self, now_ms: f64) -> f64 {
        let duration_ms = self.fall_duration_secs * 1000.0;
        if duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.spawned_at_ms) / duration_ms).max(0.0)
    }

    /// Whether the item may still produce a contact
    pub fn is_catchable(&self, now_ms: f64) -> bool {
        let p = self.progress(now_ms);
        !self.taken && p > 0.0 && p < 1.0
    }

    /// Flag first contact. Returns false if the item was already taken.
    pub fn mark_taken(&mut self, now_ms: f64, linger_ms: f64) -> bool {
        if self.taken {
            return false;
        }
        self.taken = true;
        self.remove_at_ms = Some(now_ms + linger_ms);
        true
    }

    fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0 || self.remove_at_ms.is_some_and(|t| now_ms >= t)
    }
}

/// Render descriptor for one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub kind: ItemKind,
    pub style: Option<GiftStyle>,
    pub x: f32,
    /// Clamped to [0, 1]
    pub progress: f64,
    pub taken: bool,
}

/// Owns every live item (sorted by id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRegistry {
    items: Vec<FallingItem>,
    next_id: u32,
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Take ownership of a freshly rolled item, returning its id
    pub fn admit(&mut self, roll: SpawnRoll) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(FallingItem {
            id,
            kind: roll.kind,
            style: roll.style,
            x: roll.x,
            spawned_at_ms: roll.spawned_at_ms,
            fall_duration_secs: roll.fall_duration_secs,
            taken: false,
            remove_at_ms: None,
        });
        id
    }

    /// Drop items that left the playfield or finished lingering after a catch.
    /// Returns how many were removed.
    pub fn retire(&mut self, now_ms: f64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_finished(now_ms));
        before - self.items.len()
    }

    /// Move every time reference forward (used when resuming from pause)
    pub fn shift(&mut self, delta_ms: f64) {
        for item in &mut self.items {
            item.spawned_at_ms += delta_ms;
            if let Some(t) = item.remove_at_ms.as_mut() {
                *t += delta_ms;
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [FallingItem] {
        &mut self.items
    }

    pub fn get(&self, id: u32) -> Option<&FallingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn views(&self, now_ms: f64) -> Vec<ItemView> {
        self.items
            .iter()
            .map(|item| ItemView {
                id: item.id,
                kind: item.kind,
                style: item.style,
                x: item.x,
                progress: item.progress(now_ms).min(1.0),
                taken: item.taken,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(kind: ItemKind, at: f64, duration: f64) -> SpawnRoll {
        SpawnRoll {
            kind,
            style: None,
            x: 10.0,
            spawned_at_ms: at,
            fall_duration_secs: duration,
        }
    }

    #[test]
    fn test_progress() {
        let mut registry = ItemRegistry::new();
        let id = registry.admit(roll(ItemKind::Gift, 1000.0, 2.0));
        let item = registry.get(id).unwrap();
        assert_eq!(item.progress(1000.0), 0.0);
        assert_eq!(item.progress(2000.0), 0.5);
        assert_eq!(item.progress(3000.0), 1.0);
        assert!(!item.is_catchable(1000.0));
        assert!(item.is_catchable(2000.0));
        assert!(!item.is_catchable(3000.0));
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut registry = ItemRegistry::new();
        let a = registry.admit(roll(ItemKind::Gift, 0.0, 1.0));
        let b = registry.admit(roll(ItemKind::Hazard, 0.0, 1.0));
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_retire_after_fall() {
        let mut registry = ItemRegistry::new();
        registry.admit(roll(ItemKind::Gift, 0.0, 1.0));
        registry.admit(roll(ItemKind::Gift, 500.0, 1.0));
        assert_eq!(registry.retire(999.0), 0);
        assert_eq!(registry.retire(1000.0), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.retire(1500.0), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_taken_lingers_then_retires() {
        let mut registry = ItemRegistry::new();
        let id = registry.admit(roll(ItemKind::Gift, 0.0, 4.0));
        let item = &mut registry.items_mut()[0];
        assert!(item.mark_taken(1000.0, 450.0));
        assert!(!item.mark_taken(1100.0, 450.0));
        assert!(!registry.get(id).unwrap().is_catchable(1200.0));
        assert_eq!(registry.retire(1449.0), 0);
        assert_eq!(registry.retire(1450.0), 1);
    }

    #[test]
    fn test_shift_freezes_progress() {
        let mut registry = ItemRegistry::new();
        let id = registry.admit(roll(ItemKind::Hazard, 0.0, 2.0));
        registry.items_mut()[0].mark_taken(500.0, 450.0);
        registry.shift(10_000.0);
        let item = registry.get(id).unwrap();
        assert_eq!(item.progress(10_500.0), 0.25);
        assert_eq!(item.remove_at_ms, Some(10_950.0));
    }

    #[test]
    fn test_views_clamp_progress() {
        let mut registry = ItemRegistry::new();
        registry.admit(roll(ItemKind::Gift, 0.0, 1.0));
        let views = registry.views(5000.0);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].progress, 1.0);
    }
}
