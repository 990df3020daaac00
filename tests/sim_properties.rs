//! Property-based tests for the simulation core

use glam::Vec3;
use proptest::prelude::*;

use neon_drift::consts::*;
use neon_drift::sim::{
    InputState, ParticlePool, SimState, TrafficCar, VehicleState, tick, vehicle,
};

fn step(vehicle: &mut VehicleState, input: &InputState, traffic: &mut [TrafficCar]) {
    let mut pool = ParticlePool::new(16);
    vehicle::update(vehicle, input, traffic, &mut pool, 0);
}

proptest! {
    /// Coasting is exactly one friction multiply, at any speed.
    #[test]
    fn coasting_decay_is_exact(speed in -3.5f32..3.5) {
        let mut v = VehicleState { speed, ..Default::default() };
        step(&mut v, &InputState::default(), &mut []);
        prop_assert_eq!(v.speed, speed * FRICTION);
    }

    /// Drift bleed stacks on top of coasting decay.
    #[test]
    fn drift_stacks_on_coasting(speed in -3.5f32..3.5) {
        let mut v = VehicleState { speed, ..Default::default() };
        let input = InputState { drift: true, ..Default::default() };
        step(&mut v, &input, &mut []);
        prop_assert_eq!(v.speed, (speed * FRICTION) * DRIFT_FRICTION);
    }

    /// Below the deadzone the car never turns, whatever steering it had.
    #[test]
    fn deadzone_kills_steering(
        speed in -0.102f32..0.102,
        steering in -0.06f32..0.06,
        left in any::<bool>(),
        right in any::<bool>(),
    ) {
        // Post-friction |speed| stays under the deadzone for this range
        let mut v = VehicleState { speed, steering, ..Default::default() };
        let input = InputState { left, right, ..Default::default() };
        step(&mut v, &input, &mut []);
        prop_assert_eq!(v.steering, 0.0);
        prop_assert_eq!(v.heading, 0.0);
    }

    /// Throttle never overshoots the active target speed.
    #[test]
    fn throttle_never_overshoots(speed in 0.0f32..3.5, nitro in any::<bool>()) {
        let target = if nitro { NITRO_SPEED } else { MAX_SPEED };
        prop_assume!(speed <= target);
        let mut v = VehicleState { speed, ..Default::default() };
        let input = InputState { forward: true, nitro, ..Default::default() };
        step(&mut v, &input, &mut []);
        prop_assert!(v.speed >= speed);
        prop_assert!(v.speed <= target);
    }

    /// Advancing traffic keeps every car inside the patrol corridor.
    #[test]
    fn traffic_stays_in_bounds(
        z in -TRAFFIC_BOUND..TRAFFIC_BOUND,
        speed in 0.0f32..2.0,
        lane in any::<bool>(),
    ) {
        let x = if lane { TRAFFIC_LANE_X } else { -TRAFFIC_LANE_X };
        let mut car = TrafficCar { position: Vec3::new(x, 1.5, z), speed };
        for _ in 0..100 {
            car.advance();
            prop_assert!(car.position.z >= -TRAFFIC_BOUND);
            prop_assert!(car.position.z <= TRAFFIC_BOUND);
        }
        // Lane and height never drift
        prop_assert_eq!(car.position.x, x);
        prop_assert_eq!(car.position.y, 1.5);
    }

    /// The pool never holds more live particles than its capacity.
    #[test]
    fn pool_never_exceeds_capacity(spawns in 0usize..200) {
        let mut pool = ParticlePool::new(32);
        for i in 0..spawns {
            pool.spawn(
                Vec3::new(i as f32, 0.0, 0.0),
                [1.0, 1.0, 1.0],
                0.4,
                Vec3::ZERO,
            );
            prop_assert!(pool.live_count() <= pool.capacity());
        }
        prop_assert_eq!(pool.live_count(), spawns.min(32));
    }

    /// Two sessions with the same seed and inputs stay in lockstep.
    #[test]
    fn sessions_are_deterministic(
        seed in any::<u64>(),
        keys in prop::collection::vec(any::<[bool; 6]>(), 1..60),
    ) {
        let mut a = SimState::new(seed, 64);
        let mut b = SimState::new(seed, 64);
        a.start();
        b.start();

        for [forward, reverse, left, right, nitro, drift] in keys {
            let input = InputState { forward, reverse, left, right, nitro, drift };
            let out_a = tick(&mut a, &input);
            let out_b = tick(&mut b, &input);
            prop_assert_eq!(out_a, out_b);
        }
        prop_assert_eq!(a.vehicle.position, b.vehicle.position);
        prop_assert_eq!(a.vehicle.heading, b.vehicle.heading);
        prop_assert_eq!(a.particles.live_count(), b.particles.live_count());
        for (ca, cb) in a.traffic.iter().zip(&b.traffic) {
            prop_assert_eq!(ca.position, cb.position);
            prop_assert_eq!(ca.speed, cb.speed);
        }
    }
}
