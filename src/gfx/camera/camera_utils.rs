use cgmath::{Matrix4, SquareMatrix};

/// Anything that can produce a combined view-projection matrix
pub trait Camera {
    fn build_view_matrix(&self) -> Matrix4<f32>;
    fn build_projection_matrix(&self) -> Matrix4<f32>;

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.build_projection_matrix() * self.build_view_matrix()
    }
}

/// Flat camera state for hosts that upload it as one block
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraUniform {
    /// Eye position, w = 1
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0, 0.0, 0.0, 1.0],
            view_proj: matrix_columns(Matrix4::identity()),
        }
    }
}

/// Column-major array form of a matrix
pub fn matrix_columns(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix.into()
}
