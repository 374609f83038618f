//! Ordered transformation composition
//!
//! A `<transformation>` block (or a component's inline transformation) is a
//! list of translate / scale / rotate operations. The list is folded into one
//! matrix strictly in document order, each operation post-multiplied onto the
//! accumulator, so the last operation listed is the first applied to a vertex.

use cgmath::{Deg, Matrix4, Rad, SquareMatrix, Vector3};

/// Rotation axis of a `rotate` operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Parses the `axis` attribute value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }
}

/// A single step of a transformation block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Vector3<f32>),
    Scale(Vector3<f32>),
    Rotate { axis: Axis, angle: Rad<f32> },
}

impl TransformOp {
    /// Rotation from an angle given in degrees, as written in documents
    pub fn rotate_degrees(axis: Axis, degrees: f32) -> Self {
        TransformOp::Rotate {
            axis,
            angle: Deg(degrees).into(),
        }
    }

    /// Matrix for this operation alone
    pub fn to_matrix(&self) -> Matrix4<f32> {
        match *self {
            TransformOp::Translate(offset) => Matrix4::from_translation(offset),
            TransformOp::Scale(factors) => Matrix4::from_nonuniform_scale(factors.x, factors.y, factors.z),
            TransformOp::Rotate { axis, angle } => match axis {
                Axis::X => Matrix4::from_angle_x(angle),
                Axis::Y => Matrix4::from_angle_y(angle),
                Axis::Z => Matrix4::from_angle_z(angle),
            },
        }
    }
}

/// A named `<transformation>` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    pub id: String,
    pub ops: Vec<TransformOp>,
    /// `ops` composed in order
    pub matrix: Matrix4<f32>,
}

impl Transformation {
    pub fn new(id: &str, ops: Vec<TransformOp>) -> Self {
        let matrix = compose(&ops);
        Self {
            id: id.to_string(),
            ops,
            matrix,
        }
    }
}

/// Folds operations in order: `I * op[0] * op[1] * ... * op[n-1]`.
pub fn compose(ops: &[TransformOp]) -> Matrix4<f32> {
    ops.iter()
        .fold(Matrix4::identity(), |acc, op| acc * op.to_matrix())
}
