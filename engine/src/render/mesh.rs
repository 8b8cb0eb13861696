//! Mesh Geometry
//!
//! CPU-side generators for the playground's shared unit geometries. Every
//! instance of a geometry reuses the same vertex/index buffers; per-instance
//! scale does the sizing, so the sphere here has radius 1 and the cube spans
//! [-0.5, 0.5] on each axis.

use wgpu::util::DeviceExt;

use crate::scene::GeometryId;

/// Vertex for mesh rendering (position, normal)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A mesh buffer that can be drawn
pub struct MeshBuffer {
    pub label: &'static str,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// CPU-side geometry before upload.
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Upload to GPU buffers.
    pub fn upload(&self, device: &wgpu::Device, label: &'static str) -> MeshBuffer {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        MeshBuffer {
            label,
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Generate the geometry for a geometry id.
pub fn build_geometry(id: GeometryId) -> MeshData {
    match id {
        GeometryId::Sphere => unit_sphere(20, 20),
        GeometryId::Cube => unit_cube(),
        GeometryId::Icosahedron => icosahedron(),
        GeometryId::Floor => floor_plane(),
    }
}

/// UV sphere of radius 1 centered at the origin. Smooth normals.
pub fn unit_sphere(stacks: u32, sectors: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for stack in 0..=stacks {
        let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();
        for sector in 0..=sectors {
            let theta = std::f32::consts::TAU * sector as f32 / sectors as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();
            // On a unit sphere the normal equals the position.
            vertices.push(MeshVertex {
                position: [x, y, z],
                normal: [x, y, z],
            });
        }
    }

    for stack in 0..stacks {
        for sector in 0..sectors {
            let row0 = stack * (sectors + 1) + sector;
            let row1 = row0 + sectors + 1;
            indices.extend_from_slice(&[row0, row1, row0 + 1]);
            indices.extend_from_slice(&[row0 + 1, row1, row1 + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// Axis-aligned cube spanning [-0.5, 0.5] on each axis. Flat normals, so each
/// face gets its own four vertices.
pub fn unit_cube() -> MeshData {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // (normal, tangent u, tangent v)
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in FACES {
        let base = vertices.len() as u32;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let position = [
                normal[0] * 0.5 + u[0] * su + v[0] * sv,
                normal[1] * 0.5 + u[1] * su + v[1] * sv,
                normal[2] * 0.5 + u[2] * su + v[2] * sv,
            ];
            vertices.push(MeshVertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Regular icosahedron with circumradius 1. Flat shaded: every face gets its
/// own three vertices carrying the face normal, which gives the marble its
/// faceted gem look.
pub fn icosahedron() -> MeshData {
    // Golden-ratio construction, scaled so vertices sit on the unit sphere.
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = 1.0 / (1.0 + t * t).sqrt();
    let a = s;
    let b = t * s;

    let corners: [[f32; 3]; 12] = [
        [-a, b, 0.0],
        [a, b, 0.0],
        [-a, -b, 0.0],
        [a, -b, 0.0],
        [0.0, -a, b],
        [0.0, a, b],
        [0.0, -a, -b],
        [0.0, a, -b],
        [b, 0.0, -a],
        [b, 0.0, a],
        [-b, 0.0, -a],
        [-b, 0.0, a],
    ];

    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut vertices = Vec::with_capacity(60);
    let mut indices = Vec::with_capacity(60);

    for face in FACES {
        let p0 = corners[face[0]];
        let p1 = corners[face[1]];
        let p2 = corners[face[2]];
        let normal = face_normal(p0, p1, p2);
        let base = vertices.len() as u32;
        for position in [p0, p1, p2] {
            vertices.push(MeshVertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    MeshData { vertices, indices }
}

/// Unit floor quad in the XZ plane at y = 0, facing up. Scaled per instance
/// to the arena size.
pub fn floor_plane() -> MeshData {
    let normal = [0.0, 1.0, 0.0];
    let vertices = vec![
        MeshVertex {
            position: [-0.5, 0.0, -0.5],
            normal,
        },
        MeshVertex {
            position: [-0.5, 0.0, 0.5],
            normal,
        },
        MeshVertex {
            position: [0.5, 0.0, 0.5],
            normal,
        },
        MeshVertex {
            position: [0.5, 0.0, -0.5],
            normal,
        },
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];
    MeshData { vertices, indices }
}

fn face_normal(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> [f32; 3] {
    let e1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
    let e2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    [n[0] / len, n[1] / len, n[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn test_sphere_vertices_on_unit_radius() {
        let mesh = unit_sphere(20, 20);
        assert_eq!(mesh.indices.len(), 20 * 20 * 6);
        for v in &mesh.vertices {
            assert!((length(v.position) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cube_counts_and_extent() {
        let mesh = unit_cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            for c in v.position {
                assert!(c.abs() <= 0.5 + 1e-6);
            }
        }
    }

    #[test]
    fn test_icosahedron_is_flat_shaded() {
        let mesh = icosahedron();
        assert_eq!(mesh.vertices.len(), 60);
        assert_eq!(mesh.indices.len(), 60);
        // Vertices sit on the unit sphere, normals are unit length.
        for v in &mesh.vertices {
            assert!((length(v.position) - 1.0).abs() < 1e-4);
            assert!((length(v.normal) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_floor_faces_up() {
        let mesh = floor_plane();
        assert_eq!(mesh.indices.len(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.position[1], 0.0);
        }
    }
}
