// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! WebGL2 renderer for the animated backdrop.
//!
//! Geometry and per-frame state come from
//! [`vitrine_core::backdrop`]; this module only uploads buffers, sets
//! uniforms and draws. The torus is drawn as indexed `LINES`, the particle
//! cloud as `POINTS` with distance attenuation.

use alloc::format;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use vitrine_core::backdrop::mesh::{particle_cloud, torus_wireframe};
use vitrine_core::backdrop::{BackdropConfig, BackdropState, Mat4};

use crate::raf::RafLoop;
use crate::{ResizeHub, dom};

const VERTEX_SHADER: &str = r"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_mvp;
uniform float u_point_size;
uniform float u_reference_depth;
void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    gl_PointSize = max(1.0, u_point_size * u_reference_depth / max(gl_Position.w, 0.0001));
}
";

const FRAGMENT_SHADER: &str = r"#version 300 es
precision mediump float;
uniform vec3 u_color;
out vec4 frag_color;
void main() {
    frag_color = vec4(u_color, 1.0);
}
";

/// Bytes per vertex: three `f32` coordinates.
const STRIDE: i32 = 12;

struct Geometry {
    vao: WebGlVertexArrayObject,
    count: i32,
}

struct Uniforms {
    mvp: WebGlUniformLocation,
    color: WebGlUniformLocation,
    point_size: WebGlUniformLocation,
    reference_depth: WebGlUniformLocation,
}

struct Renderer {
    gl: Gl,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    uniforms: Uniforms,
    torus: Geometry,
    particles: Geometry,
    state: BackdropState,
    framebuffer_height: f64,
}

impl Renderer {
    fn resize_to_window(&mut self) {
        let Ok(window) = dom::window() else {
            return;
        };
        let viewport = dom::viewport_rect(&window);
        let ratio = window.device_pixel_ratio().max(1.0);
        let (width, height) = (viewport.width(), viewport.height());
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "viewport sizes are small positive values"
        )]
        let (px_w, px_h) = ((width * ratio) as i32, (height * ratio) as i32);
        let (Ok(w), Ok(h)) = (u32::try_from(px_w), u32::try_from(px_h)) else {
            return;
        };
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.state.resize(width, height);
        self.framebuffer_height = f64::from(h);
        self.gl.viewport(0, 0, px_w, px_h);
    }

    fn draw(&mut self) {
        self.state.advance();
        let gl = &self.gl;
        let config = self.state.config();
        gl.clear(Gl::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        set_mvp(gl, &self.uniforms.mvp, &self.state.torus_mvp());
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.color), &config.torus_color.to_f32s());
        gl.bind_vertex_array(Some(&self.torus.vao));
        gl.draw_elements_with_i32(Gl::LINES, self.torus.count, Gl::UNSIGNED_INT, 0);

        set_mvp(gl, &self.uniforms.mvp, &self.state.particles_mvp());
        gl.uniform3fv_with_f32_array(
            Some(&self.uniforms.color),
            &config.particle_color.to_f32s(),
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "GPU uniforms are single precision"
        )]
        let (size, depth) = (
            self.state.particle_point_size(self.framebuffer_height) as f32,
            config.camera.distance as f32,
        );
        gl.uniform1f(Some(&self.uniforms.point_size), size);
        gl.uniform1f(Some(&self.uniforms.reference_depth), depth);
        gl.bind_vertex_array(Some(&self.particles.vao));
        gl.draw_arrays(Gl::POINTS, 0, self.particles.count);
        gl.bind_vertex_array(None);
    }
}

fn set_mvp(gl: &Gl, location: &WebGlUniformLocation, m: &Mat4) {
    gl.uniform_matrix4fv_with_f32_array(Some(location), false, &m.to_cols_f32());
}

/// Owns the render loop of an installed backdrop.
pub struct BackdropHandle {
    renderer: Rc<RefCell<Renderer>>,
    raf: RafLoop,
}

impl core::fmt::Debug for BackdropHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BackdropHandle")
            .field("raf", &self.raf)
            .finish_non_exhaustive()
    }
}

impl BackdropHandle {
    /// Pauses the animation.
    pub fn pause(&self) {
        self.raf.stop();
    }

    /// Resumes the animation.
    pub fn resume(&self) {
        self.raf.start();
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.renderer
            .try_borrow()
            .map_or(0, |r| r.state.frames())
    }
}

/// Installs the backdrop on the canvas with id `canvas_id`.
///
/// Fails when the canvas is missing or WebGL2 is unavailable. The canvas
/// follows the window size on every debounced resize from `resize`.
pub fn install_backdrop(
    canvas_id: &str,
    config: BackdropConfig,
    resize: &ResizeHub,
) -> Result<BackdropHandle, JsValue> {
    let document = dom::document()?;
    let canvas: HtmlCanvasElement = dom::require_id(&document, canvas_id)?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;

    let gl: Gl = canvas
        .get_context("webgl2")?
        .ok_or_else(|| JsValue::from_str("WebGL2 unavailable"))?
        .unchecked_into();

    let program = link_program(&gl)?;
    let uniforms = Uniforms {
        mvp: uniform(&gl, &program, "u_mvp")?,
        color: uniform(&gl, &program, "u_color")?,
        point_size: uniform(&gl, &program, "u_point_size")?,
        reference_depth: uniform(&gl, &program, "u_reference_depth")?,
    };

    let mesh = torus_wireframe(&config.torus);
    let torus = Geometry {
        vao: upload(&gl, mesh.vertex_bytes(), Some(mesh.indices.as_slice()))?,
        count: gl_count(mesh.indices.len())?,
    };
    let cloud = particle_cloud(
        config.particle_count,
        config.particle_spread,
        js_sys::Math::random,
    );
    let particles = Geometry {
        vao: upload(&gl, bytemuck::cast_slice(&cloud), None)?,
        count: gl_count(cloud.len())?,
    };

    gl.clear_color(0.0, 0.0, 0.0, 0.0);

    let mut renderer = Renderer {
        gl,
        canvas,
        program,
        uniforms,
        torus,
        particles,
        state: BackdropState::new(config, 1.0, 1.0),
        framebuffer_height: 1.0,
    };
    renderer.resize_to_window();
    let renderer = Rc::new(RefCell::new(renderer));

    let weak = Rc::downgrade(&renderer);
    resize.subscribe(move || {
        if let Some(r) = weak.upgrade()
            && let Ok(mut r) = r.try_borrow_mut()
        {
            r.resize_to_window();
        }
    });

    let weak = Rc::downgrade(&renderer);
    let raf = RafLoop::new(move |_| {
        if let Some(r) = weak.upgrade()
            && let Ok(mut r) = r.try_borrow_mut()
        {
            r.draw();
        }
    });
    raf.start();

    Ok(BackdropHandle { renderer, raf })
}

fn gl_count(len: usize) -> Result<i32, JsValue> {
    i32::try_from(len).map_err(|_| JsValue::from_str("geometry too large"))
}

fn upload(
    gl: &Gl,
    vertex_bytes: &[u8],
    indices: Option<&[u32]>,
) -> Result<WebGlVertexArrayObject, JsValue> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| JsValue::from_str("create vertex array failed"))?;
    gl.bind_vertex_array(Some(&vao));

    let vertices = gl
        .create_buffer()
        .ok_or_else(|| JsValue::from_str("create buffer failed"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertices));
    gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, vertex_bytes, Gl::STATIC_DRAW);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, Gl::FLOAT, false, STRIDE, 0);

    if let Some(indices) = indices {
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("create buffer failed"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_u8_array(
            Gl::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            Gl::STATIC_DRAW,
        );
    }

    gl.bind_vertex_array(None);
    Ok(vao)
}

fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("uniform {name} not found")))
}

fn link_program(gl: &Gl) -> Result<WebGlProgram, JsValue> {
    let vs = compile_shader(gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
    let fs = compile_shader(gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("create program failed"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    if !gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        return Err(JsValue::from_str(&format!("GL program link failed: {log}")));
    }
    Ok(program)
}

fn compile_shader(gl: &Gl, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| JsValue::from_str("create shader failed"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        return Err(JsValue::from_str(&format!("GL shader compile failed: {log}")));
    }
    Ok(shader)
}
