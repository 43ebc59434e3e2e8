//! Entity store
//!
//! Ordered collections of live platforms, obstacles and power-ups. Removal is
//! always a single stable filter pass so survivors keep their relative order.

use super::collision::Aabb;
use super::state::{Obstacle, Platform, PowerUp};

/// Common view of a stored entity
pub trait Body {
    fn id(&self) -> u32;
    fn bounds(&self) -> Aabb;
    /// Top edge
    fn y(&self) -> f32;
    fn shift_y(&mut self, delta: f32);
}

/// An ordered collection of one entity kind
#[derive(Debug, Clone)]
pub struct Layer<T> {
    items: Vec<T>,
}

impl<T> Default for Layer<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Body> Layer<T> {
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove every item matching `pred`, keeping survivors in order
    ///
    /// Returns the removed items in their original order.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) =
            std::mem::take(&mut self.items).into_iter().partition(|item| pred(item));
        self.items = kept;
        removed
    }

    /// Remove items by id
    pub fn remove_ids(&mut self, ids: &[u32]) -> Vec<T> {
        if ids.is_empty() {
            return Vec::new();
        }
        self.remove_where(|item| ids.contains(&item.id()))
    }

    pub fn shift_vertically(&mut self, delta: f32) {
        for item in &mut self.items {
            item.shift_y(delta);
        }
    }

    /// Remove items whose top edge is below `limit`
    pub fn prune_below(&mut self, limit: f32) -> usize {
        self.remove_where(|item| item.y() > limit).len()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Smallest top edge (the highest item on screen)
    pub fn topmost_y(&self) -> Option<f32> {
        self.items.iter().map(Body::y).reduce(f32::min)
    }

    /// Sum of every item's top edge
    pub fn sum_y(&self) -> f32 {
        self.items.iter().map(Body::y).sum()
    }
}

impl<'a, T> IntoIterator for &'a Layer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// All live non-player entities
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub platforms: Layer<Platform>,
    pub obstacles: Layer<Obstacle>,
    pub power_ups: Layer<PowerUp>,
}

impl EntityStore {
    /// Move every stored entity down by `delta` (the player is shifted by the caller)
    pub fn shift_all_vertically(&mut self, delta: f32) {
        self.platforms.shift_vertically(delta);
        self.obstacles.shift_vertically(delta);
        self.power_ups.shift_vertically(delta);
    }

    /// Remove every entity that scrolled below `limit`; returns how many were removed
    pub fn prune_below(&mut self, limit: f32) -> usize {
        self.platforms.prune_below(limit)
            + self.obstacles.prune_below(limit)
            + self.power_ups.prune_below(limit)
    }

    /// Where the next platform row is generated relative to
    pub fn frontier_y(&self) -> Option<f32> {
        self.platforms.topmost_y()
    }

    pub fn len(&self) -> usize {
        self.platforms.len() + self.obstacles.len() + self.power_ups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.platforms.clear();
        self.obstacles.clear();
        self.power_ups.clear();
    }

    /// Sum of every entity's top edge
    pub fn sum_y(&self) -> f32 {
        self.platforms.sum_y() + self.obstacles.sum_y() + self.power_ups.sum_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{PlatformKind, PowerUpKind};
    use glam::Vec2;

    fn platform(id: u32, y: f32) -> Platform {
        Platform {
            id,
            kind: PlatformKind::Normal,
            pos: Vec2::new(0.0, y),
            size: Vec2::new(60.0, 10.0),
        }
    }

    fn sample_store() -> EntityStore {
        let mut store = EntityStore::default();
        for (id, y) in [(1, 550.0), (2, 450.0), (3, 350.0), (4, 250.0)] {
            store.platforms.add(platform(id, y));
        }
        store.obstacles.add(Obstacle {
            id: 5,
            pos: Vec2::new(10.0, 320.0),
            size: Vec2::new(40.0, 20.0),
            dx: 2.0,
        });
        store.power_ups.add(PowerUp {
            id: 6,
            kind: PowerUpKind::SuperJump,
            pos: Vec2::new(10.0, 220.0),
            size: Vec2::new(20.0, 20.0),
        });
        store
    }

    #[test]
    fn test_remove_where_is_stable() {
        let mut store = sample_store();
        let removed = store.platforms.remove_where(|p| p.id % 2 == 0);

        let removed_ids: Vec<u32> = removed.iter().map(|p| p.id).collect();
        let kept_ids: Vec<u32> = store.platforms.iter().map(|p| p.id).collect();
        assert_eq!(removed_ids, vec![2, 4]);
        assert_eq!(kept_ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_ids() {
        let mut store = sample_store();
        assert!(store.platforms.remove_ids(&[]).is_empty());
        let removed = store.platforms.remove_ids(&[3]);
        assert_eq!(removed.len(), 1);
        assert!(store.platforms.get(3).is_none());
        assert_eq!(store.platforms.len(), 3);
    }

    #[test]
    fn test_shift_all_vertically() {
        let mut store = sample_store();
        let before = store.sum_y();
        store.shift_all_vertically(12.5);
        let after = store.sum_y();
        assert!((after - before - 12.5 * store.len() as f32).abs() < 0.001);
        assert_eq!(store.platforms.get(1).map(|p| p.pos.y), Some(562.5));
    }

    #[test]
    fn test_prune_below_and_idempotence() {
        let mut store = sample_store();
        store.shift_all_vertically(100.0);
        // Platform 1 is now at 650, below a 600 view
        assert_eq!(store.prune_below(600.0), 1);
        assert!(store.platforms.get(1).is_none());
        assert_eq!(store.prune_below(600.0), 0);
    }

    #[test]
    fn test_prune_keeps_entity_exactly_at_limit() {
        let mut store = EntityStore::default();
        store.platforms.add(platform(1, 600.0));
        assert_eq!(store.prune_below(600.0), 0);
    }

    #[test]
    fn test_frontier() {
        let mut store = sample_store();
        assert_eq!(store.frontier_y(), Some(250.0));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.frontier_y(), None);
    }
}
