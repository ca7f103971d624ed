use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Interleaved mesh vertex: position + normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal (zero for line vertices).
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout matching the raster shaders.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Line vertex at `position` with no normal.
    #[must_use]
    pub fn point(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0; 3],
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices, counter-clockwise front faces.
    pub indices: Vec<u32>,
}

/// Parametric shape descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere centred on the origin.
    Sphere {
        /// Sphere radius.
        radius: f32,
        /// Segments around the equator.
        width_segments: u32,
        /// Segments from pole to pole.
        height_segments: u32,
    },
    /// Torus in the XY plane centred on the origin.
    Torus {
        /// Distance from the centre to the middle of the tube.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments around the tube cross-section.
        radial_segments: u32,
        /// Segments along the ring.
        tubular_segments: u32,
    },
}

impl Geometry {
    /// Tessellate into an indexed triangle mesh.
    #[must_use]
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments.max(3), height_segments.max(2)),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(
                radius,
                tube,
                radial_segments.max(3),
                tubular_segments.max(3),
            ),
        }
    }
}

fn sphere(radius: f32, width: u32, height: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let row = width + 1;

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let dir = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex {
                position: (dir * radius).to_array(),
                normal: dir.normalize_or_zero().to_array(),
            });
        }
    }

    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Pole rows collapse to a single triangle per quad.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let row = tubular + 1;

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(Vertex {
                position: position.to_array(),
                normal: (position - centre).normalize_or_zero().to_array(),
            });
        }
    }

    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = Geometry::Sphere {
            radius: 0.6,
            width_segments: 32,
            height_segments: 32,
        }
        .tessellate();

        assert_eq!(mesh.vertices.len(), 33 * 33);
        // Two pole rows contribute one triangle per quad, the rest two.
        assert_eq!(mesh.indices.len(), 6 * 32 * 31);
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 0.6).abs() < 1e-5);
        }
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn torus_wraps_ring_in_xy_plane() {
        let mesh = Geometry::Torus {
            radius: 3.5,
            tube: 0.02,
            radial_segments: 8,
            tubular_segments: 100,
        }
        .tessellate();

        assert_eq!(mesh.vertices.len(), 9 * 101);
        assert_eq!(mesh.indices.len(), 6 * 8 * 100);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let ring_dist = p.truncate().length();
            assert!((ring_dist - 3.5).abs() <= 0.02 + 1e-5);
            assert!(p.z.abs() <= 0.02 + 1e-6);
        }
    }

    #[test]
    fn line_vertex_has_no_normal() {
        let v = Vertex::point(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.normal, [0.0; 3]);
    }
}
