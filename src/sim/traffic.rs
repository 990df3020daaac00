//! Autonomous traffic on the main avenue
//!
//! Pure scalar translation: each car advances along z at a fixed per-car
//! speed and teleports to the opposite boundary when it runs off the strip,
//! faking an endless stream of oncoming and passing cars. No pathfinding,
//! no lane changes, no agent-to-agent collision.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{TRAFFIC_BOUND, TRAFFIC_LANE_X};

/// One traffic car. `position.x` is the lane offset, fixed for life;
/// `speed` only ever changes when a crash stops the car for good.
#[derive(Debug, Clone, Copy)]
pub struct TrafficCar {
    pub position: Vec3,
    pub speed: f32,
}

impl TrafficCar {
    /// Advance one frame and wrap past the forward boundary. The wrap is a
    /// teleport to the exact negative boundary, not physical travel.
    pub fn advance(&mut self) {
        self.position.z += self.speed;
        if self.position.z > TRAFFIC_BOUND {
            self.position.z = -TRAFFIC_BOUND;
        }
    }
}

/// Spawn the session's traffic set: one of two lanes, scattered along the
/// strip, speed fixed per car in [0.5, 1.0). Deterministic per seed.
pub fn spawn_set(count: usize, seed: u64) -> Vec<TrafficCar> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let lane = if rng.random_bool(0.5) {
                TRAFFIC_LANE_X
            } else {
                -TRAFFIC_LANE_X
            };
            TrafficCar {
                position: Vec3::new(lane, 1.5, rng.random_range(-1000.0..1000.0)),
                speed: rng.random_range(0.5..1.0),
            }
        })
        .collect()
}

/// Advance every car one frame, stopped wrecks included (their speed is 0,
/// so the add is a no-op).
pub fn advance_all(traffic: &mut [TrafficCar]) {
    for car in traffic {
        car.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_by_speed() {
        let mut car = TrafficCar {
            position: Vec3::new(10.0, 1.5, 100.0),
            speed: 0.75,
        };
        car.advance();
        assert_eq!(car.position.z, 100.75);
        assert_eq!(car.position.x, 10.0);
    }

    #[test]
    fn test_wrap_is_exact_boundary() {
        // 1999.5 + 1.0 crosses the 2000 boundary and must land on -2000
        // within the same update
        let mut car = TrafficCar {
            position: Vec3::new(-10.0, 1.5, 1999.5),
            speed: 1.0,
        };
        car.advance();
        assert_eq!(car.position.z, -2000.0);
    }

    #[test]
    fn test_exactly_at_boundary_does_not_wrap() {
        let mut car = TrafficCar {
            position: Vec3::new(10.0, 1.5, 1999.0),
            speed: 1.0,
        };
        car.advance();
        assert_eq!(car.position.z, 2000.0);
    }

    #[test]
    fn test_stopped_car_stays_put() {
        let mut car = TrafficCar {
            position: Vec3::new(10.0, 1.5, 42.0),
            speed: 0.0,
        };
        car.advance();
        assert_eq!(car.position.z, 42.0);
    }

    #[test]
    fn test_spawn_set_is_deterministic_and_in_bounds() {
        let a = spawn_set(40, 99);
        let b = spawn_set(40, 99);
        assert_eq!(a.len(), 40);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.speed, y.speed);
        }
        for car in &a {
            assert!(car.position.x == 10.0 || car.position.x == -10.0);
            assert!(car.position.z >= -1000.0 && car.position.z < 1000.0);
            assert!(car.speed >= 0.5 && car.speed < 1.0);
        }
    }
}
