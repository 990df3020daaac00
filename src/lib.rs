//! Neon Drift - an arcade night-city driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle dynamics, traffic, collisions, particles)
//! - `camera`: Menu orbit and smoothed chase camera
//! - `world`: One-shot procedural city layout
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Quality presets and volumes

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod camera;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod world;

pub use settings::{QualityPreset, Settings};

use glam::{Mat4, Vec3};

/// Game configuration constants
pub mod consts {
    /// Acceleration blend factor toward target speed (must stay in (0, 1])
    pub const ACCELERATION: f32 = 0.025;
    /// Top speed with the throttle held
    pub const MAX_SPEED: f32 = 2.2;
    /// Top speed with nitro engaged
    pub const NITRO_SPEED: f32 = 3.5;
    /// Per-frame coasting decay when no throttle input is held
    pub const FRICTION: f32 = 0.98;
    /// Extra per-frame decay while drifting
    pub const DRIFT_FRICTION: f32 = 0.95;
    /// Steering angle magnitude (radians) at full lock
    pub const STEERING: f32 = 0.06;
    /// Blend factor for steering interpolation
    pub const STEER_BLEND: f32 = 0.1;
    /// Heading change per frame = steering * speed * TURN_GAIN
    pub const TURN_GAIN: f32 = 0.6;
    /// Below this |speed| the car cannot turn and steering snaps to zero
    pub const SPEED_DEADZONE: f32 = 0.1;

    /// Number of traffic cars spawned at session start
    pub const TRAFFIC_COUNT: usize = 40;
    /// Traffic wraps from +TRAFFIC_BOUND to -TRAFFIC_BOUND on the z axis
    pub const TRAFFIC_BOUND: f32 = 2000.0;
    /// Traffic lane offset from the road centerline
    pub const TRAFFIC_LANE_X: f32 = 10.0;

    /// Main road width
    pub const ROAD_WIDTH: f32 = 40.0;

    /// Minimum |speed| for nitro exhaust flames
    pub const NITRO_PARTICLE_MIN_SPEED: f32 = 0.5;
    /// Minimum |speed| for drift smoke (also gates the screech)
    pub const DRIFT_PARTICLE_MIN_SPEED: f32 = 1.0;
    /// Per-frame particle life decrement
    pub const PARTICLE_DECAY: f32 = 0.05;
    /// Per-frame particle scale multiplier
    pub const PARTICLE_SHRINK: f32 = 0.95;
    /// Default particle pool capacity (quality presets override)
    pub const MAX_PARTICLES: usize = 256;

    /// Engine oscillator base frequency (Hz)
    pub const ENGINE_BASE_HZ: f32 = 50.0;
    /// Engine frequency gain per unit of |speed|
    pub const ENGINE_HZ_PER_SPEED: f32 = 200.0;
    /// Screech gain while drifting above the speed threshold
    pub const SCREECH_GAIN: f32 = 0.1;
    /// HUD readout = floor(|speed| * HUD_SPEED_SCALE)
    pub const HUD_SPEED_SCALE: f32 = 120.0;

    /// Chase camera local offset behind and above the car
    pub const CAMERA_OFFSET: [f32; 3] = [0.0, 6.0, -15.0];
    /// Chase camera blend factor per frame
    pub const CAMERA_LERP: f32 = 0.1;
    /// Look-at target height above the car
    pub const CAMERA_LOOK_UP: f32 = 2.0;
}

/// World transform for the car body: yaw, then cosmetic pitch and roll.
#[inline]
pub fn body_transform(position: Vec3, heading: f32, pitch: f32, roll: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_y(heading)
        * Mat4::from_rotation_x(pitch)
        * Mat4::from_rotation_z(roll)
}

/// Linear interpolation with a fixed blend factor
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
