//! Render Uniforms
//!
//! GPU-compatible structs shared between the renderer and the playground
//! shader. Layouts are fixed and compile-time checked.

use glam::Mat4;
use static_assertions::assert_eq_size;

use crate::scene::{MaterialId, MeshInstance};

/// Per-frame uniform data for the playground shader.
///
/// Layout (96 bytes total, 16-byte aligned):
/// - view_proj:  mat4x4<f32> (64 bytes) - Camera view-projection matrix
/// - camera_pos: vec3<f32> (12 bytes) - Eye position in world space
/// - time:       f32 (4 bytes) - Seconds since startup
/// - sun_dir:    vec3<f32> (12 bytes) - Direction toward the light, normalized
/// - ambient:    f32 (4 bytes) - Ambient light intensity
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub sun_dir: [f32; 3],
    pub ambient: f32,
}

assert_eq_size!(SceneUniforms, [u8; 96]);

impl Default for SceneUniforms {
    fn default() -> Self {
        // Light setup: mostly ambient with a weak directional key light
        // from above and to the side.
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0, 0.0, 0.0],
            time: 0.0,
            sun_dir: normalize([5.0, 5.0, 5.0]),
            ambient: 0.7,
        }
    }
}

/// GPU instance data for one drawn mesh.
///
/// Layout (64 bytes total, 16-byte aligned):
/// - position: vec3<f32> (12 bytes) - World position
/// - _pad0:    u32 (4 bytes) - Padding for alignment
/// - rotation: vec4<f32> (16 bytes) - Quaternion rotation (x, y, z, w)
/// - scale:    vec3<f32> (12 bytes) - Per-axis scale
/// - _pad1:    u32 (4 bytes) - Padding for alignment
/// - color:    vec4<f32> (16 bytes) - Material albedo (rgb) + gloss (a)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstanceGpu {
    pub position: [f32; 3],
    pub _pad0: u32,
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub _pad1: u32,
    pub color: [f32; 4],
}

assert_eq_size!(MeshInstanceGpu, [u8; 64]);

impl MeshInstanceGpu {
    /// Flatten a scene instance into its GPU form.
    pub fn from_instance(instance: &MeshInstance) -> Self {
        Self {
            position: instance.position.to_array(),
            _pad0: 0,
            rotation: instance.rotation.to_array(),
            scale: instance.scale.to_array(),
            _pad1: 0,
            color: material_color(instance.material),
        }
    }
}

/// Albedo (rgb) and gloss (a) per material.
pub fn material_color(material: MaterialId) -> [f32; 4] {
    match material {
        MaterialId::Shiny => [0.75, 0.77, 0.82, 0.9],
        MaterialId::Wood => [0.55, 0.36, 0.20, 0.1],
        MaterialId::Crystal => [0.55, 0.80, 0.95, 0.8],
        MaterialId::Mirror => [0.12, 0.13, 0.15, 1.0],
    }
}

/// Vertex buffer layout for [`MeshInstanceGpu`], stepped per instance.
/// Shader locations continue after the mesh vertex attributes (0 and 1).
pub fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshInstanceGpu>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            // position: vec3<f32> at offset 0
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 2,
            },
            // _pad0 is skipped (offset 12)
            // rotation: vec4<f32> at offset 16
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3,
            },
            // scale: vec3<f32> at offset 32
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 32,
                shader_location: 4,
            },
            // _pad1 is skipped (offset 44)
            // color: vec4<f32> at offset 48
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 48,
                shader_location: 5,
            },
        ],
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}
