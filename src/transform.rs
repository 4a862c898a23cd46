//! Homogeneous 4x4 transforms and their application to meshes.
//!
//! Matrices are described row-major, as written on paper: translation lives in
//! the last column and a point is the column vector on the right, so in `A * B`
//! the transform `B` is applied first. Storage is a `glam::Mat4`, which is
//! column-major internally; the row-major view is only a matter of the
//! constructors and accessors below.

use std::ops::Mul;

use glam::{Mat3, Mat4, Vec3, Vec4};
use log::debug;
use serde::Deserialize;

use crate::{
    mesh::Mesh,
    vector::{Point, Vector},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix(Mat4);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub fn identity() -> Self {
        Self(Mat4::IDENTITY)
    }

    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self(Mat4::from_cols_array_2d(&rows).transpose())
    }

    pub fn rows(&self) -> [[f32; 4]; 4] {
        self.0.transpose().to_cols_array_2d()
    }

    pub fn row(&self, index: usize) -> [f32; 4] {
        self.0.row(index).to_array()
    }

    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        Self(Mat4::from_translation(Vec3::new(dx, dy, dz)))
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self(Mat4::from_scale(Vec3::new(sx, sy, sz)))
    }

    /// Right-handed rotation by `angle` radians about a coordinate axis.
    pub fn rotation(axis: Axis, angle: f32) -> Self {
        Self(match axis {
            Axis::X => Mat4::from_rotation_x(angle),
            Axis::Y => Mat4::from_rotation_y(angle),
            Axis::Z => Mat4::from_rotation_z(angle),
        })
    }

    /// Mirrors the flagged axes. Flipping X reflects across the YZ plane.
    pub fn reflection(x: bool, y: bool, z: bool) -> Self {
        let flip = |f: bool| if f { -1.0 } else { 1.0 };
        Self::scale(flip(x), flip(y), flip(z))
    }

    /// `xy` is how much X moves per unit of Y, and so on.
    #[rustfmt::skip]
    pub fn shear(xy: f32, xz: f32, yx: f32, yz: f32, zx: f32, zy: f32) -> Self {
        Self::from_rows([
            [1.0, xy,  xz,  0.0],
            [yx,  1.0, yz,  0.0],
            [zx,  zy,  1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `self` followed by `next`.
    pub fn then(self, next: Matrix) -> Self {
        next * self
    }

    /// Upper-left 3x3 block, the translation-free linear part.
    pub fn linear(&self) -> Mat3 {
        Mat3::from_mat4(self.0)
    }

    pub fn determinant(&self) -> f32 {
        self.linear().determinant()
    }

    pub fn apply_point(&self, p: Point) -> Point {
        let h = self.0 * Vec4::new(p.x(), p.y(), p.z(), 1.0);
        if h.w != 0.0 {
            Point(h.truncate() / h.w)
        } else {
            Point(h.truncate())
        }
    }

    pub fn apply_vector(&self, v: Vector) -> Vector {
        Vector(self.0.transform_vector3(v.0))
    }

    /// Transforms a surface normal with the inverse transpose of the linear
    /// part, which keeps it perpendicular under non-uniform scale and shear.
    /// Singular matrices fall back to the linear part. The result is not
    /// renormalized.
    pub fn apply_normal(&self, n: Vector) -> Vector {
        let linear = self.linear();
        // relative to the column lengths, so uniformly tiny scales still invert
        let volume =
            linear.x_axis.length() * linear.y_axis.length() * linear.z_axis.length();
        if linear.determinant().abs() <= f32::EPSILON * volume {
            return Vector(linear * n.0);
        }
        Vector(linear.inverse().transpose() * n.0)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix(self.0 * rhs.0)
    }
}

/// Returns a transformed deep copy of `mesh`; the source is left untouched so
/// it can serve as a template for further variants.
pub fn transform_mesh(mesh: &Mesh, matrix: &Matrix) -> Mesh {
    let mut out = mesh.clone();

    for vertex in out.vertices.iter_mut() {
        *vertex = matrix.apply_point(*vertex);
    }
    for normal in out.vertex_normals.iter_mut() {
        *normal = matrix.apply_normal(*normal).normalize_or_zero();
    }

    // mirroring flips the winding; swap it back so face normals still agree
    // with the vertex normals
    if matrix.determinant() < 0.0 {
        for face in out.faces.iter_mut() {
            face.swap(1, 2);
        }
    }
    out.compute_face_normals();

    debug!(
        "Transformed mesh with {} vertices (det = {})",
        out.vertices.len(),
        matrix.determinant()
    );
    out
}
