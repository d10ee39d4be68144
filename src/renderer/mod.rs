//! WebGPU rendering module
//!
//! `scene` builds a triangle list from the game state; `pipeline` maps it
//! from playfield units to the viewport and draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_frame;
pub use vertex::Vertex;
