//! Per-frame simulation pipeline
//!
//! The scheduler calls `tick` once per display refresh with a snapshot of
//! the held keys. The step is a fixed nominal frame, not measured elapsed
//! time: physics are frame-locked exactly like the tuning constants assume.

use super::state::{FrameOutput, InputState, SimState};
use super::{traffic, vehicle};

/// Advance the whole simulation by one frame.
///
/// Order: vehicle dynamics (including collision response and particle
/// emission), then traffic translation, then the particle pool. Returns
/// `None` before the session start latch has been flipped - the menu phase
/// runs no physics at all.
pub fn tick(state: &mut SimState, input: &InputState) -> Option<FrameOutput> {
    if !state.started() {
        return None;
    }
    state.time_ticks += 1;

    let output = vehicle::update(
        &mut state.vehicle,
        input,
        &mut state.traffic,
        &mut state.particles,
        state.time_ticks,
    );

    traffic::advance_all(&mut state.traffic);
    state.particles.advance();

    Some(output)
}
