//! Obstacle pool
//!
//! A fixed set of obstacles is spawned once and then endlessly recycled:
//! whenever one falls behind the recycle boundary it is moved far ahead
//! again. Nothing is allocated or freed during play.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::event::SimEvent;
use crate::config::SpawnRange;
use crate::error::{Result, SimError};

/// A pooled obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub position: Vec3,
    /// Cleared once the obstacle has hit the avatar on this approach
    pub active: bool,
    pub half_extents: Vec3,
}

impl Obstacle {
    /// World-space bounding box (position is the box centre)
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }

    /// Has this obstacle scrolled past the boundary?
    #[inline]
    pub fn is_passed(&self, boundary_z: f32) -> bool {
        self.position.z > boundary_z
    }
}

/// Fixed-size obstacle pool with seeded placement
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    x_range: SpawnRange,
    z_range: SpawnRange,
    fixed_y: f32,
    half_extents: Vec3,
    rng: Pcg32,
}

impl ObstaclePool {
    /// Empty pool with a seeded generator
    pub fn new(seed: u64, half_extents: Vec3) -> Self {
        Self::from_rng(Pcg32::seed_from_u64(seed), half_extents)
    }

    /// Empty pool using an injected generator
    pub fn from_rng(rng: Pcg32, half_extents: Vec3) -> Self {
        Self {
            obstacles: Vec::new(),
            x_range: SpawnRange::new(0, 0),
            z_range: SpawnRange::new(0, 0),
            fixed_y: 0.0,
            half_extents,
            rng,
        }
    }

    /// Populate the pool with `count` obstacles at random x/z and fixed y.
    ///
    /// Replaces any previous population. The z range is taken relative to
    /// the world origin here and relative to the boundary on recycle.
    pub fn spawn_all(
        &mut self,
        count: usize,
        x_range: SpawnRange,
        z_range: SpawnRange,
        fixed_y: f32,
    ) -> Result<()> {
        if count == 0 {
            return Err(SimError::invalid("obstacle count must be at least 1"));
        }
        for (name, range) in [("x", x_range), ("z", z_range)] {
            if !range.is_valid() {
                return Err(SimError::invalid(format!(
                    "{name} spawn range is degenerate: min {} > max {}",
                    range.min, range.max
                )));
            }
        }
        if !fixed_y.is_finite() {
            return Err(SimError::invalid(format!(
                "obstacle y must be finite, got {fixed_y}"
            )));
        }

        self.x_range = x_range;
        self.z_range = z_range;
        self.fixed_y = fixed_y;

        self.obstacles.clear();
        self.obstacles.reserve_exact(count);
        for id in 0..count as u32 {
            let position = Vec3::new(self.random_x(), fixed_y, self.random_z());
            self.obstacles.push(Obstacle {
                id,
                position,
                active: true,
                half_extents: self.half_extents,
            });
        }

        log::info!(
            "Spawned {} obstacles (x {}..={}, z {}..={})",
            count,
            x_range.min,
            x_range.max,
            z_range.min,
            z_range.max
        );
        Ok(())
    }

    /// Move obstacle `index` far ahead of `boundary_z` if it has passed it.
    ///
    /// Returns the recycle event for the renderer, or `None` when the
    /// obstacle is still ahead (or the index is out of range).
    pub fn recycle_if_passed(&mut self, index: usize, boundary_z: f32) -> Option<SimEvent> {
        if !self.obstacles.get(index)?.is_passed(boundary_z) {
            return None;
        }

        let x = self.random_x();
        let z = boundary_z + self.random_z();
        let obstacle = &mut self.obstacles[index];
        obstacle.position = Vec3::new(x, self.fixed_y, z);
        obstacle.active = true;

        log::debug!(
            "Recycled obstacle {} to ({}, {}) behind boundary {}",
            obstacle.id,
            x,
            z,
            boundary_z
        );
        Some(SimEvent::ObstacleRecycled {
            id: obstacle.id,
            position: obstacle.position,
        })
    }

    /// Recycle every passed obstacle, pushing one event per recycle.
    /// Returns how many were recycled.
    pub fn recycle_passed(&mut self, boundary_z: f32, events: &mut Vec<SimEvent>) -> usize {
        let mut recycled = 0;
        for index in 0..self.obstacles.len() {
            if let Some(event) = self.recycle_if_passed(index, boundary_z) {
                events.push(event);
                recycled += 1;
            }
        }
        recycled
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn x_range(&self) -> SpawnRange {
        self.x_range
    }

    pub fn z_range(&self) -> SpawnRange {
        self.z_range
    }

    fn random_x(&mut self) -> f32 {
        self.rng.random_range(self.x_range.min..=self.x_range.max) as f32
    }

    fn random_z(&mut self) -> f32 {
        self.rng.random_range(self.z_range.min..=self.z_range.max) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool(seed: u64) -> ObstaclePool {
        ObstaclePool::new(seed, Vec3::splat(5.0))
    }

    #[test]
    fn test_spawn_all_places_within_ranges() {
        let mut pool = pool(7);
        let x_range = SpawnRange::new(-200, 200);
        let z_range = SpawnRange::new(-3000, -1000);
        pool.spawn_all(50, x_range, z_range, 7.0).unwrap();

        assert_eq!(pool.len(), 50);
        for (i, obstacle) in pool.obstacles().iter().enumerate() {
            assert_eq!(obstacle.id, i as u32);
            assert!(obstacle.active);
            assert!(x_range.contains(obstacle.position.x));
            assert!(z_range.contains(obstacle.position.z));
            assert_eq!(obstacle.position.y, 7.0);
            assert_eq!(obstacle.position.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_spawn_all_rejects_bad_input() {
        let mut pool = pool(1);
        let ok = SpawnRange::new(-10, 10);
        let bad = SpawnRange::new(10, -10);

        assert!(matches!(
            pool.spawn_all(0, ok, ok, 0.0),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(pool.spawn_all(5, bad, ok, 0.0).is_err());
        assert!(pool.spawn_all(5, ok, bad, 0.0).is_err());
        assert!(pool.spawn_all(5, ok, ok, f32::NAN).is_err());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_recycle_ignores_obstacles_ahead() {
        let mut pool = pool(3);
        pool.spawn_all(1, SpawnRange::new(0, 0), SpawnRange::new(-100, -100), 0.0)
            .unwrap();

        assert!(pool.recycle_if_passed(0, 0.0).is_none());
        // Exactly on the boundary is not past it
        assert!(pool.recycle_if_passed(0, -100.0).is_none());
        assert_eq!(pool.get(0).unwrap().position.z, -100.0);
    }

    #[test]
    fn test_recycle_moves_passed_obstacle_ahead() {
        let mut pool = pool(3);
        pool.spawn_all(1, SpawnRange::new(-5, 5), SpawnRange::new(-100, -100), 2.0)
            .unwrap();
        pool.obstacles_mut()[0].active = false;

        let boundary = -150.0;
        let event = pool.recycle_if_passed(0, boundary).unwrap();
        let obstacle = pool.get(0).unwrap();

        assert_eq!(obstacle.position.z, -250.0);
        assert_eq!(obstacle.position.y, 2.0);
        assert!(obstacle.active);
        assert!(!obstacle.is_passed(boundary));
        assert_eq!(
            event,
            SimEvent::ObstacleRecycled {
                id: 0,
                position: obstacle.position
            }
        );
    }

    #[test]
    fn test_recycle_out_of_range_index() {
        let mut pool = pool(3);
        assert!(pool.recycle_if_passed(4, 0.0).is_none());
    }

    #[test]
    fn test_recycle_passed_sweeps_pool() {
        let mut pool = pool(11);
        pool.spawn_all(10, SpawnRange::new(-5, 5), SpawnRange::new(-100, -10), 0.0)
            .unwrap();

        let mut events = Vec::new();
        let recycled = pool.recycle_passed(-50.0, &mut events);
        let expected = events.len();
        assert_eq!(recycled, expected);
        assert!(pool.obstacles().iter().all(|o| !o.is_passed(-50.0)));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let x = SpawnRange::new(-200, 200);
        let z = SpawnRange::new(-3000, -1000);
        let mut a = pool(42);
        let mut b = pool(42);
        a.spawn_all(20, x, z, 7.0).unwrap();
        b.spawn_all(20, x, z, 7.0).unwrap();

        let positions = |p: &ObstaclePool| p.obstacles().iter().map(|o| o.position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_injected_rng() {
        let x = SpawnRange::new(-200, 200);
        let z = SpawnRange::new(-3000, -1000);
        let mut a = ObstaclePool::from_rng(Pcg32::seed_from_u64(9), Vec3::ONE);
        let mut b = ObstaclePool::new(9, Vec3::ONE);
        a.spawn_all(5, x, z, 0.0).unwrap();
        b.spawn_all(5, x, z, 0.0).unwrap();
        assert_eq!(a.get(4).unwrap().position, b.get(4).unwrap().position);
    }

    proptest! {
        #[test]
        fn prop_recycled_obstacle_lands_in_range_ahead(
            seed in any::<u64>(),
            z_min in -5000i32..-1,
            z_span in 0i32..2000,
            boundary in -10_000.0f32..10_000.0,
        ) {
            let z_max = (z_min + z_span).min(-1);
            let z_range = SpawnRange::new(z_min, z_max);
            let mut pool = ObstaclePool::new(seed, Vec3::ONE);
            pool.spawn_all(1, SpawnRange::new(-10, 10), z_range, 0.0).unwrap();
            pool.obstacles_mut()[0].position.z = boundary + 1.0;

            prop_assert!(pool.recycle_if_passed(0, boundary).is_some());
            let obstacle = pool.get(0).unwrap();
            let relative = obstacle.position.z - boundary;
            prop_assert!(relative >= z_min as f32 - 0.5 && relative <= z_max as f32 + 0.5);
            prop_assert!(!obstacle.is_passed(boundary));
        }
    }
}
