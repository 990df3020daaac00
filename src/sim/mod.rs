//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed nominal step (one tick per display frame)
//! - Seeded RNG only
//! - Stable iteration order (traffic by spawn index, particles by slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;
pub mod traffic;
pub mod vehicle;

pub use collision::{Aabb, PLAYER_HALF_EXTENTS, TRAFFIC_HALF_EXTENTS};
pub use particles::{Particle, ParticlePool};
pub use state::{FrameOutput, InputState, SimState, VehicleState};
pub use tick::tick;
pub use traffic::TrafficCar;
