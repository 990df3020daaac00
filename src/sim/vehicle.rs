//! Player vehicle dynamics
//!
//! One call per frame, steps in a fixed order because each step reads the
//! result of the one before it: throttle, drift bleed, steering, position
//! integration, cosmetic tilt, particle emission, traffic collision, and
//! finally the audio/HUD parameter derivation.
//!
//! The model is deliberately arcade: speed is a damped approach toward a
//! target (never clamped), and turn rate scales with speed so a parked car
//! cannot spin in place.

use glam::Vec3;

use super::collision::{Aabb, PLAYER_HALF_EXTENTS, TRAFFIC_HALF_EXTENTS};
use super::particles::ParticlePool;
use super::state::{FrameOutput, InputState, VehicleState};
use super::traffic::TrafficCar;
use crate::consts::*;
use crate::lerp;

/// Exhaust pipe mount points in car-local space (nitro flames)
const EXHAUST_MOUNTS: [Vec3; 2] = [Vec3::new(0.8, 0.6, -2.5), Vec3::new(-0.8, 0.6, -2.5)];
/// Rear axle mount point in car-local space (drift smoke)
const SMOKE_MOUNT: Vec3 = Vec3::new(0.0, 0.0, -1.5);

const NITRO_FLAME_COLOR: [f32; 3] = [0.0, 1.0, 1.0];
const DRIFT_SMOKE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Advance the player car by one frame.
///
/// Mutates the vehicle, stops any traffic car it crashes into, spawns
/// effect particles into the pool, and returns the scalar parameters for
/// the audio and display sinks.
pub fn update(
    vehicle: &mut VehicleState,
    input: &InputState,
    traffic: &mut [TrafficCar],
    particles: &mut ParticlePool,
    time_ticks: u64,
) -> FrameOutput {
    // 1-2. Throttle: damped approach toward the target, or coasting decay
    if input.forward || input.reverse {
        let target = if input.forward {
            if input.nitro { NITRO_SPEED } else { MAX_SPEED }
        } else {
            -MAX_SPEED / 2.0
        };
        let rate = ACCELERATION * if input.nitro { 2.0 } else { 1.0 };
        vehicle.speed += (target - vehicle.speed) * rate;
    } else {
        vehicle.speed *= FRICTION;
    }

    // 3. Drift always bleeds speed, whatever else is held
    if input.drift {
        vehicle.speed *= DRIFT_FRICTION;
    }

    // 4. Steering, dead below the speed deadzone
    if vehicle.speed.abs() > SPEED_DEADZONE {
        vehicle.steering = lerp(vehicle.steering, input.turn_sign() * STEERING, STEER_BLEND);
        vehicle.heading += vehicle.steering * vehicle.speed * TURN_GAIN;
    } else {
        vehicle.steering = 0.0;
    }

    // 5. Forward-Euler translation along the heading
    vehicle.position.x += vehicle.heading.sin() * vehicle.speed;
    vehicle.position.z += vehicle.heading.cos() * vehicle.speed;

    // 6. Cosmetic tilt and wobble (no feedback into physics)
    let wobble = (time_ticks as f32 * 0.8).sin() * (vehicle.speed * 0.1);
    vehicle.body_roll = vehicle.steering * -0.5 + wobble * 0.1;
    vehicle.body_pitch = -(vehicle.speed * 0.05);

    // 7. Wheel visuals
    vehicle.wheel_spin += vehicle.speed;
    vehicle.wheel_steer = vehicle.steering * 3.0;

    // 8. Particle emission, every frame the condition holds
    let transform = vehicle.transform();
    if input.nitro && vehicle.speed.abs() > NITRO_PARTICLE_MIN_SPEED {
        for mount in EXHAUST_MOUNTS {
            let world = transform.transform_point3(mount);
            particles.spawn(world, NITRO_FLAME_COLOR, 0.4, Vec3::ZERO);
        }
    }
    if input.drift && vehicle.speed.abs() > DRIFT_PARTICLE_MIN_SPEED {
        let world = transform.transform_point3(SMOKE_MOUNT);
        particles.spawn(world, DRIFT_SMOKE_COLOR, 0.3, Vec3::new(0.0, 0.1, 0.0));
    }

    // 9. Crash bounce: one idempotent speed reversal per frame no matter
    // how many cars overlap, and every overlapping car stops for good
    let player_box = Aabb::from_transform(&transform, PLAYER_HALF_EXTENTS);
    let pre_crash_speed = vehicle.speed;
    let mut crashed = false;
    for car in traffic.iter_mut() {
        let car_box = Aabb::from_center(car.position, TRAFFIC_HALF_EXTENTS);
        if player_box.intersects(&car_box) {
            crashed = true;
            car.speed = 0.0;
        }
    }
    if crashed {
        vehicle.speed = pre_crash_speed * -0.5;
    }

    // 10. Audio and HUD parameters from the final state
    let screeching = input.drift && vehicle.speed.abs() > DRIFT_PARTICLE_MIN_SPEED;
    FrameOutput {
        engine_freq: ENGINE_BASE_HZ + vehicle.speed.abs() * ENGINE_HZ_PER_SPEED,
        screech_gain: if screeching { SCREECH_GAIN } else { 0.0 },
        hud_speed: (vehicle.speed.abs() * HUD_SPEED_SCALE) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        vehicle: &mut VehicleState,
        input: &InputState,
        traffic: &mut [TrafficCar],
    ) -> FrameOutput {
        let mut pool = ParticlePool::new(16);
        update(vehicle, input, traffic, &mut pool, 0)
    }

    #[test]
    fn test_nitro_approach_scenario() {
        // Speed 2.0, forward + nitro: approach 3.5 at double rate
        // (3.5 - 2.0) * 0.05 = 0.075 -> 2.075
        let mut v = VehicleState {
            speed: 2.0,
            ..Default::default()
        };
        let input = InputState {
            forward: true,
            nitro: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        assert!((v.speed - 2.075).abs() < 1e-5);
    }

    #[test]
    fn test_coasting_decay_is_exact() {
        let mut v = VehicleState {
            speed: 1.5,
            ..Default::default()
        };
        run(&mut v, &InputState::default(), &mut []);
        assert_eq!(v.speed, 1.5f32 * FRICTION);
    }

    #[test]
    fn test_drift_stacks_on_coasting() {
        let mut v = VehicleState {
            speed: 1.5,
            ..Default::default()
        };
        let input = InputState {
            drift: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        assert_eq!(v.speed, 1.5f32 * FRICTION * DRIFT_FRICTION);
    }

    #[test]
    fn test_drift_bleeds_even_under_throttle() {
        let mut v = VehicleState {
            speed: 2.2,
            ..Default::default()
        };
        let input = InputState {
            forward: true,
            drift: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        // Throttle leaves speed at the 2.2 target, drift then bleeds it
        assert_eq!(v.speed, 2.2f32 * DRIFT_FRICTION);
    }

    #[test]
    fn test_reverse_targets_half_max_speed() {
        let mut v = VehicleState::default();
        let input = InputState {
            reverse: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        assert!((v.speed - (-MAX_SPEED / 2.0) * ACCELERATION).abs() < 1e-6);
        assert!(v.speed < 0.0);
    }

    #[test]
    fn test_forward_wins_over_reverse() {
        let mut v = VehicleState::default();
        let input = InputState {
            forward: true,
            reverse: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        assert!(v.speed > 0.0);
    }

    #[test]
    fn test_steering_dead_below_deadzone() {
        let mut v = VehicleState {
            speed: 0.05,
            steering: 0.04,
            ..Default::default()
        };
        let input = InputState {
            left: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        // Snap to zero, not interpolated
        assert_eq!(v.steering, 0.0);
        assert_eq!(v.heading, 0.0);
    }

    #[test]
    fn test_steering_interpolates_and_turns_with_speed() {
        let mut v = VehicleState {
            speed: MAX_SPEED,
            ..Default::default()
        };
        let input = InputState {
            forward: true,
            left: true,
            ..Default::default()
        };
        run(&mut v, &input, &mut []);
        // One blend step toward full left lock
        assert!((v.steering - STEERING * STEER_BLEND).abs() < 1e-6);
        assert!((v.heading - v.steering * v.speed * TURN_GAIN).abs() < 1e-6);
        assert!(v.heading > 0.0);
    }

    #[test]
    fn test_position_integrates_along_heading() {
        let mut v = VehicleState {
            speed: 2.0,
            heading: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        run(&mut v, &InputState::default(), &mut []);
        let s = 2.0f32 * FRICTION;
        assert!((v.position.x - v.heading.sin() * s).abs() < 1e-5);
        assert!((v.position.z - v.heading.cos() * s).abs() < 1e-5);
    }

    #[test]
    fn test_nitro_emits_one_particle_per_exhaust() {
        let mut v = VehicleState {
            speed: 2.0,
            ..Default::default()
        };
        let input = InputState {
            forward: true,
            nitro: true,
            ..Default::default()
        };
        let mut pool = ParticlePool::new(16);
        update(&mut v, &input, &mut [], &mut pool, 0);
        assert_eq!(pool.live_count(), 2);
        // Zero initial velocity, cyan hue
        for p in pool.iter_live() {
            assert_eq!(p.velocity, Vec3::ZERO);
            assert_eq!(p.color, NITRO_FLAME_COLOR);
        }
    }

    #[test]
    fn test_drift_smoke_needs_more_speed_than_nitro_flames() {
        let input = InputState {
            nitro: true,
            drift: true,
            ..Default::default()
        };

        // Fast enough for flames, too slow for smoke. Use a coasting speed
        // that stays above 0.5 and below 1.0 after friction.
        let mut v = VehicleState {
            speed: 0.9,
            ..Default::default()
        };
        let mut pool = ParticlePool::new(16);
        update(&mut v, &input, &mut [], &mut pool, 0);
        assert_eq!(pool.live_count(), 2);

        // Fast enough for both
        let mut v = VehicleState {
            speed: 2.0,
            ..Default::default()
        };
        let mut pool = ParticlePool::new(16);
        update(&mut v, &input, &mut [], &mut pool, 0);
        assert_eq!(pool.live_count(), 3);
        let smoke = pool
            .iter_live()
            .find(|p| p.color == DRIFT_SMOKE_COLOR)
            .unwrap();
        assert!(smoke.velocity.y > 0.0);
    }

    #[test]
    fn test_slow_car_emits_nothing() {
        let mut v = VehicleState {
            speed: 0.3,
            ..Default::default()
        };
        let input = InputState {
            nitro: true,
            drift: true,
            ..Default::default()
        };
        let mut pool = ParticlePool::new(16);
        update(&mut v, &input, &mut [], &mut pool, 0);
        assert_eq!(pool.live_count(), 0);
    }

    fn overlapping_traffic_pair(z: f32) -> [TrafficCar; 2] {
        [
            TrafficCar {
                position: Vec3::new(1.0, 1.5, z),
                speed: 0.7,
            },
            TrafficCar {
                position: Vec3::new(-1.0, 1.5, z),
                speed: 0.9,
            },
        ]
    }

    #[test]
    fn test_crash_bounce_is_idempotent_and_order_independent() {
        let coasted = 2.0f32 * FRICTION;

        let mut forward = overlapping_traffic_pair(coasted);
        let mut v = VehicleState {
            speed: 2.0,
            ..Default::default()
        };
        run(&mut v, &InputState::default(), &mut forward);
        assert_eq!(v.speed, coasted * -0.5);
        assert_eq!(forward[0].speed, 0.0);
        assert_eq!(forward[1].speed, 0.0);

        // Same pair, reversed iteration order: same final speed
        let mut reversed = overlapping_traffic_pair(coasted);
        reversed.swap(0, 1);
        let mut v2 = VehicleState {
            speed: 2.0,
            ..Default::default()
        };
        run(&mut v2, &InputState::default(), &mut reversed);
        assert_eq!(v2.speed, v.speed);
    }

    #[test]
    fn test_miss_leaves_traffic_alone() {
        let mut traffic = [TrafficCar {
            position: Vec3::new(10.0, 1.5, 500.0),
            speed: 0.8,
        }];
        let mut v = VehicleState {
            speed: 1.0,
            ..Default::default()
        };
        run(&mut v, &InputState::default(), &mut traffic);
        assert_eq!(traffic[0].speed, 0.8);
        assert_eq!(v.speed, 1.0f32 * FRICTION);
    }

    #[test]
    fn test_audio_and_hud_derivation() {
        let mut v = VehicleState {
            speed: 2.0,
            ..Default::default()
        };
        let out = run(&mut v, &InputState::default(), &mut []);
        let s = v.speed.abs();
        assert!((out.engine_freq - (50.0 + s * 200.0)).abs() < 1e-4);
        assert_eq!(out.screech_gain, 0.0);
        assert_eq!(out.hud_speed, (s * 120.0) as u32);
    }

    #[test]
    fn test_screech_only_while_drifting_fast() {
        let input = InputState {
            forward: true,
            drift: true,
            ..Default::default()
        };
        let mut v = VehicleState {
            speed: 2.2,
            ..Default::default()
        };
        let out = run(&mut v, &input, &mut []);
        assert_eq!(out.screech_gain, SCREECH_GAIN);

        let mut slow = VehicleState {
            speed: 0.8,
            ..Default::default()
        };
        let out = run(&mut slow, &input, &mut []);
        assert_eq!(out.screech_gain, 0.0);
    }
}
