//! CPU mesh generation for the primitive shapes.
//!
//! Conventions follow the usual WebGL primitive geometries: every shape is
//! centred on the origin, cylinders run along Y, planes lie in XY facing +Z.
//! Triangles wind counter-clockwise seen from outside.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Interleaved vertex: position then normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex pool.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of all vertex positions.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| {
                let p = Vec3::from_array(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// Axis-aligned box of the given extents.
#[must_use]
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u axis, v axis): u × v == normal keeps CCW winding.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let base = mesh.next_index();
        let center = normal * half;
        let du = u * half;
        let dv = v * half;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.vertices
                .push(Vertex::new(center + du * su + dv * sv, normal));
        }
        mesh.indices
            .extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base + 2,
                base + 3,
                base,
            ]);
    }
    mesh
}

/// UV sphere. Degenerate triangles at the poles are skipped.
#[must_use]
pub fn sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);

    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let theta = PI * iy as f32 / hs as f32;
        for ix in 0..=ws {
            let phi = TAU * ix as f32 / ws as f32;
            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.vertices.push(Vertex::new(normal * radius, normal));
        }
    }

    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Capped cylinder (or cone frustum) along Y.
#[must_use]
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> MeshData {
    let segments = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    let mut mesh = MeshData::default();

    // Side wall: top ring then bottom ring.
    for (y, r) in [(half_height, radius_top), (-half_height, radius_bottom)] {
        for ix in 0..=segments {
            let theta = TAU * ix as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            mesh.vertices
                .push(Vertex::new(Vec3::new(r * sin, y, r * cos), normal));
        }
    }
    let row = segments + 1;
    for ix in 0..segments {
        let a = ix;
        let b = row + ix;
        let c = row + ix + 1;
        let d = ix + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    cap(&mut mesh, half_height, radius_top, segments, true);
    cap(&mut mesh, -half_height, radius_bottom, segments, false);
    mesh
}

fn cap(mesh: &mut MeshData, y: f32, radius: f32, segments: u32, top: bool) {
    if radius <= 0.0 {
        return;
    }
    let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
    let center = mesh.next_index();
    mesh.vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal));
    for ix in 0..=segments {
        let theta = TAU * ix as f32 / segments as f32;
        let (sin, cos) = theta.sin_cos();
        let position = Vec3::new(radius * sin, y, radius * cos);
        mesh.vertices.push(Vertex::new(position, normal));
    }
    for ix in 0..segments {
        let i = center + 1 + ix;
        if top {
            mesh.indices.extend_from_slice(&[i, i + 1, center]);
        } else {
            mesh.indices.extend_from_slice(&[i + 1, i, center]);
        }
    }
}

/// Flat rectangle in the XY plane facing +Z.
#[must_use]
pub fn plane(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let vertices = [
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ]
    .into_iter()
    .map(|p| Vertex::new(p, Vec3::Z))
    .collect();
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}
