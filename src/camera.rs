//! Menu orbit and smoothed chase camera
//!
//! Before the session starts the camera circles the city center as a pure
//! function of wall-clock time. Once driving, it trails a point behind and
//! above the car, easing toward it each frame instead of teleporting.

use glam::{Mat4, Vec3};

use crate::consts::{CAMERA_LERP, CAMERA_LOOK_UP, CAMERA_OFFSET};
use crate::sim::VehicleState;

const FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 3000.0;

/// Menu orbit radius and height
const ORBIT_RADIUS: f32 = 50.0;
const ORBIT_HEIGHT: f32 = 20.0;
const ORBIT_RATE: f64 = 0.0005;

#[derive(Debug, Clone)]
pub struct FollowCamera {
    pub eye: Vec3,
    pub target: Vec3,
    aspect: f32,
}

impl FollowCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, ORBIT_HEIGHT, ORBIT_RADIUS),
            target: Vec3::ZERO,
            aspect,
        }
    }

    /// Viewport resize: only the aspect ratio changes, never the pose.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Idle menu orbit around the city center, a pure function of
    /// wall-clock milliseconds. No smoothing: the pose is absolute.
    pub fn orbit(&mut self, time_ms: f64) {
        let phase = time_ms * ORBIT_RATE;
        self.eye = Vec3::new(
            phase.sin() as f32 * ORBIT_RADIUS,
            ORBIT_HEIGHT,
            phase.cos() as f32 * ORBIT_RADIUS,
        );
        self.target = Vec3::ZERO;
    }

    /// Chase the car: ease toward a fixed offset behind and above it,
    /// looking at a point just over the roof.
    pub fn follow(&mut self, vehicle: &VehicleState) {
        let desired = vehicle.transform().transform_point3(Vec3::from(CAMERA_OFFSET));
        self.eye = self.eye.lerp(desired, CAMERA_LERP);
        self.target = vehicle.position + Vec3::new(0.0, CAMERA_LOOK_UP, 0.0);
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(FOV_Y, self.aspect, Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }
}
