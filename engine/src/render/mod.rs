//! Render Module
//!
//! Instanced wgpu forward renderer for the playground. The scene module feeds
//! it; nothing outside this module touches the GPU.

pub mod gpu_context;
pub mod mesh;
pub mod pipeline;
pub mod uniforms;

pub use gpu_context::{GpuContext, GpuContextConfig};
pub use mesh::{MeshBuffer, MeshVertex};
pub use pipeline::{RenderState, MAX_INSTANCES};
pub use uniforms::{MeshInstanceGpu, SceneUniforms};
