//! Simulation state and core types
//!
//! The whole simulation is an explicit context object owned by the frame
//! scheduler; nothing lives in module globals, so every component can be
//! driven in isolation with a synthetic input or traffic set.

use glam::{Mat4, Vec3};

use super::particles::ParticlePool;
use super::traffic::{self, TrafficCar};
use crate::body_transform;
use crate::consts::*;

/// Held-key snapshot for one frame.
///
/// Written by asynchronous key events, read once per simulation tick.
/// Each flag is a whole boolean write, so there is nothing to tear.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    pub nitro: bool,
    pub drift: bool,
}

impl InputState {
    /// Apply a key-down/key-up event identified by its lower-cased key name.
    pub fn set_key(&mut self, key: &str, held: bool) {
        match key {
            "w" => self.forward = held,
            "s" => self.reverse = held,
            "a" => self.left = held,
            "d" => self.right = held,
            "shift" => self.nitro = held,
            " " => self.drift = held,
            _ => {}
        }
    }

    /// Turn input as a sign: left = +1, right = -1, neither/both cancel out
    pub fn turn_sign(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// The player car's physics and cosmetic state.
///
/// Created once at session start and mutated exactly once per frame.
#[derive(Debug, Clone)]
pub struct VehicleState {
    pub position: Vec3,
    /// Yaw in radians; 0 faces +z
    pub heading: f32,
    /// Signed scalar, forward positive
    pub speed: f32,
    /// Current steering angle, interpolated toward full lock
    pub steering: f32,
    /// Cosmetic roll from steering + wobble (no physics feedback)
    pub body_roll: f32,
    /// Cosmetic pitch from speed
    pub body_pitch: f32,
    /// Accumulated wheel roll for rendering
    pub wheel_spin: f32,
    /// Front wheel yaw for rendering
    pub wheel_steer: f32,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: 0.0,
            speed: 0.0,
            steering: 0.0,
            body_roll: 0.0,
            body_pitch: 0.0,
            wheel_spin: 0.0,
            wheel_steer: 0.0,
        }
    }
}

impl VehicleState {
    /// Full world transform including cosmetic tilt (used for rendering
    /// and for placing particle mount points).
    pub fn transform(&self) -> Mat4 {
        body_transform(self.position, self.heading, self.body_pitch, self.body_roll)
    }
}

/// Per-frame scalar outputs pushed to the audio and display sinks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Engine oscillator frequency in Hz
    pub engine_freq: f32,
    /// Tire screech gain, 0..1
    pub screech_gain: f32,
    /// Integer speed readout for the HUD
    pub hud_speed: u32,
}

/// Complete simulation state, owned by the frame scheduler.
#[derive(Debug, Clone)]
pub struct SimState {
    /// One-way session latch: no physics run before `start()`
    started: bool,
    /// Frame counter, drives the cosmetic wobble oscillator
    pub time_ticks: u64,
    pub vehicle: VehicleState,
    pub traffic: Vec<TrafficCar>,
    pub particles: ParticlePool,
}

impl SimState {
    /// Build a fresh session: player at the origin, a seeded traffic set,
    /// and an empty particle pool of the given capacity.
    pub fn new(seed: u64, particle_capacity: usize) -> Self {
        Self {
            started: false,
            time_ticks: 0,
            vehicle: VehicleState::default(),
            traffic: traffic::spawn_set(TRAFFIC_COUNT, seed),
            particles: ParticlePool::new(particle_capacity),
        }
    }

    /// Flip the session latch. There is no way back to the menu.
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            log::info!("Session started ({} traffic cars)", self.traffic.len());
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }
}
