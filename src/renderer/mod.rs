//! WebGPU rendering module
//!
//! Flat-colored quads built from a simulation [`Snapshot`](crate::sim::Snapshot).
//! Scene assembly is platform-free; only `pipeline` talks to the GPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::{Palette, Vertex};
