//! Entity spawning on a wall-clock cadence
//!
//! Cadence is measured in milliseconds rather than ticks so the spawn rate
//! holds steady when the display refresh rate varies.

use glam::Vec2;
use rand::Rng;

use super::geometry::Geometry;
use super::state::{Category, Entity};
use crate::tuning::{CategoryWeights, SpeedRange, Tuning};

/// True when enough time has passed since the last spawn.
///
/// With no previous spawn the next tick spawns immediately.
#[inline]
pub fn spawn_due(now_ms: f64, last_spawn_ms: Option<f64>, interval_ms: f64) -> bool {
    match last_spawn_ms {
        Some(last) => now_ms - last > interval_ms,
        None => true,
    }
}

/// Draw a category from the weighted table
pub fn pick_category<R: Rng + ?Sized>(weights: &CategoryWeights, rng: &mut R) -> Category {
    let total = weights.total();
    if total == 0 {
        return Category::Hazard;
    }
    let mut roll = rng.random_range(0..total);
    for category in Category::ALL {
        let weight = weights.weight(category);
        if roll < weight {
            return category;
        }
        roll -= weight;
    }
    Category::Hazard
}

/// Produces falling entities and owns the id counter
#[derive(Debug, Clone)]
pub struct Spawner {
    interval_ms: f64,
    weights: CategoryWeights,
    hazard_speed: SpeedRange,
    reward_speed: SpeedRange,
    last_spawn_ms: Option<f64>,
    /// Never reset, so ids stay unique across restarts
    next_id: u32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval_ms: tuning.spawn_interval_ms,
            weights: tuning.weights,
            hazard_speed: tuning.hazard_speed,
            reward_speed: tuning.reward_speed,
            last_spawn_ms: None,
            next_id: 1,
        }
    }

    /// Forget the last spawn time (on start/restart)
    pub fn reset(&mut self) {
        self.last_spawn_ms = None;
    }

    pub fn last_spawn_ms(&self) -> Option<f64> {
        self.last_spawn_ms
    }

    /// Spawn one entity if the cadence allows it
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        geometry: &Geometry,
        rng: &mut R,
    ) -> Option<Entity> {
        if !spawn_due(now_ms, self.last_spawn_ms, self.interval_ms) {
            return None;
        }
        self.last_spawn_ms = Some(now_ms);

        let category = pick_category(&self.weights, rng);
        let range = if category.is_hazard() {
            self.hazard_speed
        } else {
            self.reward_speed
        };
        let fall_speed = rng.random_range(range.min..range.max) * geometry.fall_scale();
        let x = rng.random_range(0.0..=geometry.max_entity_x());

        let id = self.next_id;
        self.next_id += 1;

        log::debug!("Spawned {:?} #{} at x={:.1} speed={:.2}", category, id, x, fall_speed);

        Some(Entity {
            id,
            pos: Vec2::new(x, -geometry.entity_size),
            fall_speed,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_due() {
        assert!(spawn_due(0.0, None, 1000.0));
        assert!(!spawn_due(1000.0, Some(0.0), 1000.0));
        assert!(spawn_due(1000.5, Some(0.0), 1000.0));
    }

    #[test]
    fn test_try_spawn_respects_interval() {
        let geometry = Geometry::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = Spawner::new(&Tuning::default());

        let first = spawner.try_spawn(500.0, &geometry, &mut rng).expect("first spawn");
        assert_eq!(first.id, 1);
        assert!(spawner.try_spawn(1000.0, &geometry, &mut rng).is_none());
        assert!(spawner.try_spawn(1500.0, &geometry, &mut rng).is_none());
        let second = spawner.try_spawn(1501.0, &geometry, &mut rng).expect("second spawn");
        assert_eq!(second.id, 2);
        assert_eq!(spawner.last_spawn_ms(), Some(1501.0));
    }

    #[test]
    fn test_spawned_entity_bounds() {
        let geometry = Geometry::from_viewport(300, 600);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut spawner = Spawner::new(&Tuning::default());
        let scale = geometry.fall_scale();

        for i in 0..500 {
            let e = spawner
                .try_spawn(i as f64 * 2000.0, &geometry, &mut rng)
                .expect("due every call");
            assert_eq!(e.pos.y, -geometry.entity_size);
            assert!(e.pos.x >= 0.0 && e.pos.x <= geometry.max_entity_x());
            let (lo, hi) = if e.category.is_hazard() { (3.0, 5.0) } else { (2.0, 3.5) };
            assert!(e.fall_speed >= lo * scale && e.fall_speed <= hi * scale);
        }
    }

    #[test]
    fn test_category_distribution() {
        let weights = CategoryWeights::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[pick_category(&weights, &mut rng).index()] += 1;
        }
        // Expect ~4000 hazards and ~2000 of each reward
        assert!((3700..4300).contains(&counts[Category::Hazard.index()]));
        for reward in [Category::Coin, Category::Star, Category::Gem] {
            assert!((1800..2200).contains(&counts[reward.index()]));
        }
    }

    #[test]
    fn test_zero_weight_category_never_drawn() {
        let weights = CategoryWeights {
            hazard: 0,
            coin: 1,
            star: 0,
            gem: 1,
        };
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..1000 {
            let c = pick_category(&weights, &mut rng);
            assert!(c == Category::Coin || c == Category::Gem);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let geometry = Geometry::default();
        let spawn_all = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = Spawner::new(&Tuning::default());
            (0..20)
                .filter_map(|i| spawner.try_spawn(i as f64 * 1001.0, &geometry, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(spawn_all(9), spawn_all(9));
        assert_eq!(spawn_all(9).len(), 20);
    }
}
