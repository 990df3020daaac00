//! WebGPU rendering module
//!
//! One pipeline, two vertex streams: the static city mesh built at startup
//! and a per-frame stream for the car, traffic, and particles.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
