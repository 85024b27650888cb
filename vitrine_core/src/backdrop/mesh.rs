// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for the backdrop: a wireframe torus and a particle cloud.

use alloc::vec::Vec;
use core::f64::consts::TAU;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use bytemuck::{Pod, Zeroable};

/// One vertex position, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
}

impl Vertex {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "GPU vertices are single precision"
    )]
    fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x as f32, y as f32, z as f32],
        }
    }
}

/// Indexed line list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineMesh {
    /// Vertex positions.
    pub vertices: Vec<Vertex>,
    /// Pairs of vertex indices, one pair per line segment.
    pub indices: Vec<u32>,
}

impl LineMesh {
    /// Vertex data as raw bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex data as a flat float slice.
    #[must_use]
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Torus dimensions and tessellation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusShape {
    /// Distance from the torus centre to the tube centre.
    pub radius: f64,
    /// Tube radius.
    pub tube: f64,
    /// Segments around the tube.
    pub radial_segments: u16,
    /// Segments around the ring.
    pub tubular_segments: u16,
}

/// Upper bound on either segment count of a torus.
pub const MAX_SEGMENTS: u16 = 4096;

/// Builds the wireframe of a triangulated torus lying in the XY plane.
///
/// The grid has `(radial + 1) × (tubular + 1)` vertices with the seam
/// duplicated. Each quad contributes its bottom edge, its left edge and one
/// diagonal, which is the edge set a triangle wireframe draws.
///
/// Segment counts are clamped to `3..=`[`MAX_SEGMENTS`].
#[must_use]
pub fn torus_wireframe(shape: &TorusShape) -> LineMesh {
    let radial = shape.radial_segments.clamp(3, MAX_SEGMENTS);
    let tubular = shape.tubular_segments.clamp(3, MAX_SEGMENTS);
    let row = u32::from(tubular) + 1;

    let mut vertices = Vec::with_capacity(usize::from(radial + 1) * usize::from(tubular + 1));
    for j in 0..=radial {
        let v = f64::from(j) / f64::from(radial) * TAU;
        for i in 0..=tubular {
            let u = f64::from(i) / f64::from(tubular) * TAU;
            let ring = shape.radius + shape.tube * v.cos();
            vertices.push(Vertex::from_f64(
                ring * u.cos(),
                ring * u.sin(),
                shape.tube * v.sin(),
            ));
        }
    }

    let mut indices = Vec::with_capacity(usize::from(radial) * usize::from(tubular) * 6);
    for j in 0..u32::from(radial) {
        for i in 0..u32::from(tubular) {
            let a = j * row + i;
            let b = (j + 1) * row + i;
            let d = j * row + i + 1;
            indices.extend_from_slice(&[a, d, a, b, b, d]);
        }
    }

    LineMesh { vertices, indices }
}

/// Scatters `count` points uniformly in a cube of side `spread` centred on
/// the origin.
///
/// `random` must yield values in `[0, 1)`; the web backend passes
/// `Math.random`.
pub fn particle_cloud(count: usize, spread: f64, mut random: impl FnMut() -> f64) -> Vec<Vertex> {
    (0..count)
        .map(|_| {
            let x = (random() - 0.5) * spread;
            let y = (random() - 0.5) * spread;
            let z = (random() - 0.5) * spread;
            Vertex::from_f64(x, y, z)
        })
        .collect()
}
