//! Audio system using Web Audio API
//!
//! Two continuously running oscillators, driven by scalar parameters from
//! the simulation each frame: a sawtooth engine drone pitched by speed
//! (muffled through a lowpass so the raw wave doesn't buzz) and a
//! high-pitched triangle screech gated by drifting. Parameter changes are
//! smoothed by the audio graph itself via `set_target_at_time`.

use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

use crate::consts::ENGINE_BASE_HZ;
use crate::sim::FrameOutput;

/// Smoothing time constant for parameter ramps (seconds)
const RAMP_TAU: f64 = 0.1;
const ENGINE_GAIN: f32 = 0.15;
const LOWPASS_HZ: f32 = 400.0;
const SCREECH_HZ: f32 = 600.0;

struct Graph {
    engine_osc: OscillatorNode,
    engine_gain: GainNode,
    screech_gain: GainNode,
}

/// Audio sink for the driving session
pub struct EngineAudio {
    ctx: Option<AudioContext>,
    graph: Option<Graph>,
    master_volume: f32,
    muted: bool,
}

impl EngineAudio {
    /// Create the context and start both oscillators. Must be called from a
    /// user gesture (the start button) or the browser keeps it suspended.
    pub fn new(master_volume: f32) -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let graph = ctx.as_ref().and_then(|ctx| build_graph(ctx, master_volume));
        Self {
            ctx,
            graph,
            master_volume,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let (Some(ctx), Some(graph)) = (&self.ctx, &self.graph) {
            let vol = if muted { 0.0 } else { ENGINE_GAIN * self.master_volume };
            let _ = graph
                .engine_gain
                .gain()
                .set_target_at_time(vol, ctx.current_time(), RAMP_TAU);
        }
    }

    /// Push one frame of simulation parameters into the graph.
    pub fn apply(&self, output: &FrameOutput) {
        let (Some(ctx), Some(graph)) = (&self.ctx, &self.graph) else {
            return;
        };
        let t = ctx.current_time();
        let _ = graph
            .engine_osc
            .frequency()
            .set_target_at_time(output.engine_freq, t, RAMP_TAU);

        let screech = if self.muted {
            0.0
        } else {
            output.screech_gain * self.master_volume
        };
        let _ = graph
            .screech_gain
            .gain()
            .set_target_at_time(screech, t, RAMP_TAU);
    }
}

/// Engine: sawtooth -> lowpass -> gain. Screech: triangle -> gain (silent
/// until a drift opens it).
fn build_graph(ctx: &AudioContext, master_volume: f32) -> Option<Graph> {
    let engine_osc = ctx.create_oscillator().ok()?;
    let engine_gain = ctx.create_gain().ok()?;
    let filter = ctx.create_biquad_filter().ok()?;

    engine_osc.set_type(OscillatorType::Sawtooth);
    engine_osc.frequency().set_value(ENGINE_BASE_HZ);
    filter.set_type(BiquadFilterType::Lowpass);
    filter.frequency().set_value(LOWPASS_HZ);

    engine_osc.connect_with_audio_node(&filter).ok()?;
    filter.connect_with_audio_node(&engine_gain).ok()?;
    engine_gain.connect_with_audio_node(&ctx.destination()).ok()?;
    engine_gain.gain().set_value(ENGINE_GAIN * master_volume);
    engine_osc.start().ok()?;

    let screech_osc = ctx.create_oscillator().ok()?;
    let screech_gain = ctx.create_gain().ok()?;
    screech_osc.set_type(OscillatorType::Triangle);
    screech_osc.frequency().set_value(SCREECH_HZ);
    screech_osc.connect_with_audio_node(&screech_gain).ok()?;
    screech_gain
        .connect_with_audio_node(&ctx.destination())
        .ok()?;
    screech_gain.gain().set_value(0.0);
    screech_osc.start().ok()?;

    Some(Graph {
        engine_osc,
        engine_gain,
        screech_gain,
    })
}
