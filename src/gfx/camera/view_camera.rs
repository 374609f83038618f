//! Cameras declared in the `<views>` block
//!
//! A [`View`] is the validated declaration; a [`ViewCamera`] is the camera
//! the host builds from it once the viewport aspect ratio is known.

use super::camera_utils::{matrix_columns, Camera, CameraUniform};
use cgmath::*;

/// Projection-specific part of a view declaration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewKind {
    Perspective {
        /// Vertical field of view
        angle: Deg<f32>,
    },
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        up: Vector3<f32>,
    },
}

/// A validated `<perspective>` or `<ortho>` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub id: String,
    pub near: f32,
    pub far: f32,
    pub from: Point3<f32>,
    pub to: Point3<f32>,
    pub kind: ViewKind,
}

impl View {
    /// Up vector used when an orthographic view leaves it out
    pub fn default_up() -> Vector3<f32> {
        Vector3::unit_y()
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self.kind, ViewKind::Perspective { .. })
    }
}

/// Camera built from a [`View`]
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    pub id: String,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub aspect: f32,
    pub projection: ViewKind,
}

impl Camera for ViewCamera {
    fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    fn build_projection_matrix(&self) -> Matrix4<f32> {
        match self.projection {
            ViewKind::Perspective { angle } => perspective(angle, self.aspect, self.znear, self.zfar),
            ViewKind::Orthographic {
                left,
                right,
                top,
                bottom,
                ..
            } => ortho(left, right, bottom, top, self.znear, self.zfar),
        }
    }
}

impl ViewCamera {
    /// Perspective cameras look "up" along +Y, orthographic ones use the
    /// declared up vector.
    pub fn from_view(view: &View, aspect: f32) -> Self {
        let up = match view.kind {
            ViewKind::Perspective { .. } => View::default_up(),
            ViewKind::Orthographic { up, .. } => up,
        };

        Self {
            id: view.id.clone(),
            eye: view.from,
            target: view.to,
            up,
            znear: view.near,
            zfar: view.far,
            aspect,
            projection: view.kind,
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
            view_proj: matrix_columns(self.build_view_projection_matrix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perspective_view() -> View {
        View {
            id: "main".to_string(),
            near: 0.1,
            far: 500.0,
            from: Point3::new(15.0, 15.0, 15.0),
            to: Point3::new(0.0, 0.0, 0.0),
            kind: ViewKind::Perspective { angle: Deg(45.0) },
        }
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = ViewCamera::from_view(&perspective_view(), 1.5);
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_uses_declared_up() {
        let view = View {
            kind: ViewKind::Orthographic {
                left: -5.0,
                right: 5.0,
                top: 5.0,
                bottom: -5.0,
                up: Vector3::unit_z(),
            },
            from: Point3::new(10.0, 0.0, 0.0),
            ..perspective_view()
        };
        let camera = ViewCamera::from_view(&view, 1.0);
        assert_eq!(camera.up, Vector3::unit_z());
        assert!(!view.is_perspective());
        assert_eq!(camera.uniform().view_position, [10.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = ViewCamera::from_view(&perspective_view(), 1.0);
        camera.resize_projection(800, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.resize_projection(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}
