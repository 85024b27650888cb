// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The decorative 3D backdrop: a slowly spinning wireframe torus inside a
//! particle cloud.
//!
//! This module holds everything that is not a GPU call: the scene
//! description ([`BackdropConfig`]), the per-frame spin and the
//! aspect-dependent projection ([`BackdropState`]), and mesh generation
//! ([`mesh`]). The web backend renders it with WebGL2.

mod matrix;
pub mod mesh;

pub use matrix::Mat4;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use mesh::TorusShape;

/// A packed `0xRRGGBB` colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Channels as floats in `[0, 1]`.
    #[must_use]
    pub fn to_f32s(self) -> [f32; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0]
    }
}

/// Camera intrinsics and placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Near clip plane.
    pub near: f64,
    /// Far clip plane.
    pub far: f64,
    /// Distance from the origin along +Z.
    pub distance: f64,
}

/// Rotation added every frame, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    /// Torus rotation about X.
    pub torus_x: f64,
    /// Torus rotation about Y.
    pub torus_y: f64,
    /// Particle cloud rotation about Y.
    pub particles_y: f64,
}

/// Scene description for the backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropConfig {
    /// Torus geometry.
    pub torus: TorusShape,
    /// Torus wireframe colour.
    pub torus_color: Rgb,
    /// Number of particles.
    pub particle_count: usize,
    /// Side length of the cube particles are scattered in.
    pub particle_spread: f64,
    /// Particle point size in world units.
    pub particle_size: f64,
    /// Particle colour.
    pub particle_color: Rgb,
    /// Camera.
    pub camera: CameraConfig,
    /// Per-frame rotation.
    pub spin: Spin,
}

impl BackdropConfig {
    /// The portfolio landing page backdrop.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            torus: TorusShape {
                radius: 10.0,
                tube: 3.0,
                radial_segments: 16,
                tubular_segments: 100,
            },
            torus_color: Rgb(0x6366f1),
            particle_count: 5000,
            particle_spread: 100.0,
            particle_size: 0.05,
            particle_color: Rgb(0x8b5cf6),
            camera: CameraConfig {
                fov_y_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
                distance: 5.0,
            },
            spin: Spin {
                torus_x: 0.001,
                torus_y: 0.002,
                particles_y: 0.0005,
            },
        }
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// Mutable per-frame state of the backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct BackdropState {
    config: BackdropConfig,
    torus_rotation: [f64; 2],
    particles_rotation: f64,
    width: f64,
    height: f64,
    projection: Mat4,
    frames: u64,
}

impl BackdropState {
    /// Creates the state for a viewport of `width × height` CSS pixels.
    #[must_use]
    pub fn new(config: BackdropConfig, width: f64, height: f64) -> Self {
        let mut state = Self {
            config,
            torus_rotation: [0.0; 2],
            particles_rotation: 0.0,
            width,
            height,
            projection: Mat4::IDENTITY,
            frames: 0,
        };
        state.resize(width, height);
        state
    }

    /// The scene description.
    #[must_use]
    pub const fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Advances the spin by one frame.
    pub fn advance(&mut self) {
        let spin = self.config.spin;
        self.torus_rotation[0] += spin.torus_x;
        self.torus_rotation[1] += spin.torus_y;
        self.particles_rotation += spin.particles_y;
        self.frames += 1;
    }

    /// Recomputes the aspect-dependent projection for a new viewport size.
    ///
    /// Degenerate sizes keep the previous projection.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        self.width = width;
        self.height = height;
        let cam = self.config.camera;
        self.projection = Mat4::perspective(cam.fov_y_degrees, width / height, cam.near, cam.far);
    }

    /// Viewport width over height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }

    /// Viewport size in CSS pixels.
    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Frames advanced so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Current torus rotation `[x, y]` in radians.
    #[must_use]
    pub const fn torus_rotation(&self) -> [f64; 2] {
        self.torus_rotation
    }

    /// Current particle rotation about Y in radians.
    #[must_use]
    pub const fn particles_rotation(&self) -> f64 {
        self.particles_rotation
    }

    fn view_projection(&self) -> Mat4 {
        self.projection * Mat4::from_translation(0.0, 0.0, -self.config.camera.distance)
    }

    /// Model-view-projection for the torus (rotation order X then Y).
    #[must_use]
    pub fn torus_mvp(&self) -> Mat4 {
        let [rx, ry] = self.torus_rotation;
        self.view_projection() * Mat4::from_rotation_x(rx) * Mat4::from_rotation_y(ry)
    }

    /// Model-view-projection for the particle cloud.
    #[must_use]
    pub fn particles_mvp(&self) -> Mat4 {
        self.view_projection() * Mat4::from_rotation_y(self.particles_rotation)
    }

    /// Particle point size in device pixels for a framebuffer of
    /// `framebuffer_height` pixels, at the distance of the origin.
    #[must_use]
    pub fn particle_point_size(&self, framebuffer_height: f64) -> f64 {
        let cam = self.config.camera;
        let half = cam.fov_y_degrees.to_radians() / 2.0;
        let world_height = 2.0 * cam.distance * (half.sin() / half.cos());
        (self.config.particle_size / world_height * framebuffer_height).max(1.0)
    }
}
