//! Triangle-list mesh emission for the box world
//!
//! Everything on screen is a shaded box or quad. Faces get a fixed
//! brightness per orientation to fake directional light without normals.

use glam::{Mat4, Vec3};

use super::vertex::{Vertex, colors};
use crate::sim::{SimState, TRAFFIC_HALF_EXTENTS};

/// Per-face brightness: +y, -y, +x, -x, +z, -z
const FACE_SHADE: [f32; 6] = [1.0, 0.35, 0.8, 0.8, 0.65, 0.65];

/// Unit-box face corners (two triangles each), indexed as FACE_SHADE
const FACES: [[Vec3; 6]; 6] = {
    const fn v(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z)
    }
    [
        // +y
        [
            v(-1.0, 1.0, -1.0),
            v(-1.0, 1.0, 1.0),
            v(1.0, 1.0, 1.0),
            v(-1.0, 1.0, -1.0),
            v(1.0, 1.0, 1.0),
            v(1.0, 1.0, -1.0),
        ],
        // -y
        [
            v(-1.0, -1.0, -1.0),
            v(1.0, -1.0, -1.0),
            v(1.0, -1.0, 1.0),
            v(-1.0, -1.0, -1.0),
            v(1.0, -1.0, 1.0),
            v(-1.0, -1.0, 1.0),
        ],
        // +x
        [
            v(1.0, -1.0, -1.0),
            v(1.0, 1.0, -1.0),
            v(1.0, 1.0, 1.0),
            v(1.0, -1.0, -1.0),
            v(1.0, 1.0, 1.0),
            v(1.0, -1.0, 1.0),
        ],
        // -x
        [
            v(-1.0, -1.0, -1.0),
            v(-1.0, -1.0, 1.0),
            v(-1.0, 1.0, 1.0),
            v(-1.0, -1.0, -1.0),
            v(-1.0, 1.0, 1.0),
            v(-1.0, 1.0, -1.0),
        ],
        // +z
        [
            v(-1.0, -1.0, 1.0),
            v(1.0, -1.0, 1.0),
            v(1.0, 1.0, 1.0),
            v(-1.0, -1.0, 1.0),
            v(1.0, 1.0, 1.0),
            v(-1.0, 1.0, 1.0),
        ],
        // -z
        [
            v(-1.0, -1.0, -1.0),
            v(-1.0, 1.0, -1.0),
            v(1.0, 1.0, -1.0),
            v(-1.0, -1.0, -1.0),
            v(1.0, 1.0, -1.0),
            v(1.0, -1.0, -1.0),
        ],
    ]
};

/// Emit a box under an arbitrary transform. 36 vertices.
pub fn push_box(out: &mut Vec<Vertex>, transform: &Mat4, half_extents: Vec3, color: [f32; 4]) {
    for (face, shade) in FACES.iter().zip(FACE_SHADE) {
        let shaded = [
            color[0] * shade,
            color[1] * shade,
            color[2] * shade,
            color[3],
        ];
        for corner in face {
            let p = transform.transform_point3(*corner * half_extents);
            out.push(Vertex::new(p.x, p.y, p.z, shaded));
        }
    }
}

/// Emit an axis-aligned box at `center`.
pub fn push_box_at(out: &mut Vec<Vertex>, center: Vec3, half_extents: Vec3, color: [f32; 4]) {
    push_box(out, &Mat4::from_translation(center), half_extents, color);
}

/// Emit a flat ground quad in the xz plane. 6 vertices.
pub fn push_ground(out: &mut Vec<Vertex>, half_size: f32, y: f32, color: [f32; 4]) {
    let corners = [
        [-half_size, -half_size],
        [half_size, -half_size],
        [half_size, half_size],
        [-half_size, -half_size],
        [half_size, half_size],
        [-half_size, half_size],
    ];
    for [x, z] in corners {
        out.push(Vertex::new(x, y, z, color));
    }
}

/// Player car mesh: body, cabin, spoiler, four wheels. Wheel boxes roll
/// with accumulated spin; the front pair yaws with the steering visual.
pub fn push_player_car(out: &mut Vec<Vertex>, state: &SimState) {
    let car = state.vehicle.transform();

    // Body
    let body = car * Mat4::from_translation(Vec3::new(0.0, 0.8, 0.0));
    push_box(out, &body, Vec3::new(1.2, 0.4, 2.5), colors::PLAYER_BODY);

    // Cabin
    let cabin = car * Mat4::from_translation(Vec3::new(0.0, 1.4, -0.2));
    push_box(out, &cabin, Vec3::new(1.0, 0.3, 1.25), colors::PLAYER_CABIN);

    // Spoiler
    let wing = car * Mat4::from_translation(Vec3::new(0.0, 1.5, -2.2));
    push_box(out, &wing, Vec3::new(1.3, 0.05, 0.4), colors::PLAYER_BODY);

    // Wheels: front pair first
    let mounts = [
        Vec3::new(-1.3, 0.5, 1.5),
        Vec3::new(1.3, 0.5, 1.5),
        Vec3::new(-1.3, 0.5, -1.5),
        Vec3::new(1.3, 0.5, -1.5),
    ];
    for (i, mount) in mounts.iter().enumerate() {
        let steer = if i < 2 { state.vehicle.wheel_steer } else { 0.0 };
        let wheel = car
            * Mat4::from_translation(*mount)
            * Mat4::from_rotation_y(steer)
            * Mat4::from_rotation_x(state.vehicle.wheel_spin);
        push_box(out, &wheel, Vec3::new(0.25, 0.5, 0.5), colors::WHEEL);
    }
}

/// All per-frame geometry: player car, traffic, live particles.
pub fn build_dynamic(state: &SimState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity((1 + state.traffic.len()) * 7 * 36);

    push_player_car(&mut out, state);

    for car in &state.traffic {
        push_box_at(&mut out, car.position, TRAFFIC_HALF_EXTENTS, colors::TRAFFIC);
    }

    for p in state.particles.iter_live() {
        let color = [p.color[0], p.color[1], p.color[2], p.opacity.clamp(0.0, 1.0) * 0.8];
        push_box_at(&mut out, p.position, Vec3::splat(p.scale), color);
    }

    out
}
