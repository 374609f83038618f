pub mod camera_utils;
pub mod view_camera;

// Re-export main types
pub use camera_utils::{matrix_columns, Camera, CameraUniform};
pub use view_camera::{View, ViewCamera, ViewKind};
