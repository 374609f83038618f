//! Host renderer contract
//!
//! The loader never draws anything itself. Traversal drives a
//! [`SceneRenderer`] with matrix stack and binding calls, and the host maps
//! those onto its own backend. [`RecordingRenderer`] is a complete in-memory
//! implementation used for dry runs and tests.

use super::primitive::Primitive;
use crate::gfx::camera::ViewCamera;
use crate::gfx::lighting::Light;
use crate::gfx::resources::{Material, Texture};
use cgmath::{Matrix4, SquareMatrix};
use std::collections::HashMap;

/// Operations the scene needs from a host rendering framework
pub trait SceneRenderer {
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn load_identity(&mut self);
    /// Right-multiplies the current matrix
    fn multiply_matrix(&mut self, matrix: &Matrix4<f32>);

    fn apply_material(&mut self, material: &Material);
    /// `None` unbinds any texture
    fn bind_texture(&mut self, texture: Option<&Texture>);
    /// Replaces a primitive's texture coordinate buffer, leaving geometry alone
    fn update_tex_coords(&mut self, primitive: &Primitive, tex_coords: &[[f32; 2]]);
    fn display(&mut self, primitive: &Primitive);

    fn set_camera(&mut self, camera: &ViewCamera);
    fn set_light(&mut self, slot: usize, light: &Light, enabled: bool);
    fn set_global_ambient(&mut self, rgba: [f32; 4]);
    fn set_background(&mut self, rgba: [f32; 4]);
}

/// One recorded `display` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub primitive: String,
    pub transform: Matrix4<f32>,
    pub material: String,
    pub texture: Option<String>,
    /// Contents of the primitive's coordinate buffer when a texture is
    /// bound; `None` while it still holds the generated coordinates
    pub tex_coords: Option<Vec<[f32; 2]>>,
}

/// State of one light slot after `set_light`
#[derive(Debug, Clone, PartialEq)]
pub struct LightSlot {
    pub light: String,
    pub enabled: bool,
}

/// Renderer that keeps a real matrix stack and records every call
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    stack: Vec<Matrix4<f32>>,
    current: Matrix4<f32>,
    material: Option<String>,
    texture: Option<String>,
    /// Per-primitive coordinate buffers; like a host buffer they keep the
    /// last upload until replaced
    tex_coord_buffers: HashMap<String, Vec<[f32; 2]>>,
    pub draws: Vec<DrawCall>,
    pub lights: Vec<Option<LightSlot>>,
    pub camera: Option<String>,
    pub ambient: Option<[f32; 4]>,
    pub background: Option<[f32; 4]>,
    /// Pops issued on an empty stack
    pub stack_underflows: usize,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            current: Matrix4::identity(),
            material: None,
            texture: None,
            tex_coord_buffers: HashMap::new(),
            draws: Vec::new(),
            lights: Vec::new(),
            camera: None,
            ambient: None,
            background: None,
            stack_underflows: 0,
        }
    }

    pub fn current_matrix(&self) -> Matrix4<f32> {
        self.current
    }

    /// Matrices currently pushed
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Last coordinates uploaded for a primitive
    pub fn tex_coord_buffer(&self, primitive: &str) -> Option<&[[f32; 2]]> {
        self.tex_coord_buffers.get(primitive).map(Vec::as_slice)
    }

    /// Forgets per-frame records, keeping lights, camera and buffers
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl SceneRenderer for RecordingRenderer {
    fn push_matrix(&mut self) {
        self.stack.push(self.current);
    }

    fn pop_matrix(&mut self) {
        match self.stack.pop() {
            Some(matrix) => self.current = matrix,
            None => self.stack_underflows += 1,
        }
    }

    fn load_identity(&mut self) {
        self.current = Matrix4::identity();
    }

    fn multiply_matrix(&mut self, matrix: &Matrix4<f32>) {
        self.current = self.current * matrix;
    }

    fn apply_material(&mut self, material: &Material) {
        self.material = Some(material.name.clone());
    }

    fn bind_texture(&mut self, texture: Option<&Texture>) {
        self.texture = texture.map(|t| t.id.clone());
    }

    fn update_tex_coords(&mut self, primitive: &Primitive, tex_coords: &[[f32; 2]]) {
        self.tex_coord_buffers
            .insert(primitive.id.clone(), tex_coords.to_vec());
    }

    fn display(&mut self, primitive: &Primitive) {
        let tex_coords = match self.texture {
            Some(_) => self.tex_coord_buffers.get(&primitive.id).cloned(),
            None => None,
        };

        self.draws.push(DrawCall {
            primitive: primitive.id.clone(),
            transform: self.current,
            material: self.material.clone().unwrap_or_default(),
            texture: self.texture.clone(),
            tex_coords,
        });
    }

    fn set_camera(&mut self, camera: &ViewCamera) {
        self.camera = Some(camera.id.clone());
    }

    fn set_light(&mut self, slot: usize, light: &Light, enabled: bool) {
        if self.lights.len() <= slot {
            self.lights.resize(slot + 1, None);
        }
        self.lights[slot] = Some(LightSlot {
            light: light.id.clone(),
            enabled,
        });
    }

    fn set_global_ambient(&mut self, rgba: [f32; 4]) {
        self.ambient = Some(rgba);
    }

    fn set_background(&mut self, rgba: [f32; 4]) {
        self.background = Some(rgba);
    }
}
