//! Axis-aligned collision between the player and falling entities

use super::state::{Category, Entity};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap; rectangles that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Entities split by whether they hit the player this tick
#[derive(Debug, Default)]
pub struct Partition {
    /// Untouched entities, in their original order
    pub surviving: Vec<Entity>,
    /// Consumed entities, in their original order
    pub consumed: Vec<Entity>,
}

impl Partition {
    pub fn outcomes(&self) -> impl Iterator<Item = Category> + '_ {
        self.consumed.iter().map(|e| e.category)
    }
}

/// Split entities into survivors and those overlapping the player.
///
/// Every overlapping entity is consumed; there is no tie-break between
/// simultaneous hits.
pub fn partition_collisions(entities: Vec<Entity>, player: &Rect, entity_size: f32) -> Partition {
    let (consumed, surviving) = entities
        .into_iter()
        .partition(|e| e.rect(entity_size).overlaps(player));
    Partition {
        surviving,
        consumed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn entity(id: u32, x: f32, y: f32, category: Category) -> Entity {
        Entity {
            id,
            pos: Vec2::new(x, y),
            fall_speed: 3.0,
            category,
        }
    }

    #[test]
    fn test_overlap() {
        let player = Rect::new(100.0, 500.0, 50.0, 50.0);
        assert!(Rect::new(120.0, 480.0, 40.0, 40.0).overlaps(&player));
        assert!(Rect::new(61.0, 520.0, 40.0, 40.0).overlaps(&player));
        assert!(!Rect::new(0.0, 0.0, 40.0, 40.0).overlaps(&player));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let player = Rect::new(100.0, 500.0, 50.0, 50.0);
        // Left, right, above, below
        assert!(!Rect::new(60.0, 500.0, 40.0, 40.0).overlaps(&player));
        assert!(!Rect::new(150.0, 500.0, 40.0, 40.0).overlaps(&player));
        assert!(!Rect::new(100.0, 460.0, 40.0, 40.0).overlaps(&player));
        assert!(!Rect::new(100.0, 550.0, 40.0, 40.0).overlaps(&player));
    }

    #[test]
    fn test_partition_keeps_order_and_consumes_all_hits() {
        let player = Rect::new(100.0, 500.0, 50.0, 50.0);
        let entities = vec![
            entity(1, 0.0, 100.0, Category::Coin),
            entity(2, 110.0, 480.0, Category::Hazard),
            entity(3, 300.0, 200.0, Category::Gem),
            entity(4, 90.0, 510.0, Category::Star),
        ];

        let partition = partition_collisions(entities, &player, 40.0);
        let surviving: Vec<u32> = partition.surviving.iter().map(|e| e.id).collect();
        let consumed: Vec<u32> = partition.consumed.iter().map(|e| e.id).collect();
        assert_eq!(surviving, vec![1, 3]);
        assert_eq!(consumed, vec![2, 4]);
        assert_eq!(
            partition.outcomes().collect::<Vec<_>>(),
            vec![Category::Hazard, Category::Star]
        );
    }
}
