//! Direction and position types.
//!
//! Both wrap a `glam::Vec3` but only expose the arithmetic that makes sense
//! for them: a `Point` can be moved by a `Vector`, and two points differ by a
//! `Vector`, but points cannot be added or scaled.

use std::{
    fmt,
    ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign},
};

use glam::Vec3;

/// Linear RGB color, one `f32` per channel.
pub type Color = Vec3;

/// A direction or displacement in 3D space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector(pub Vec3);

/// A position in 3D space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point(pub Vec3);

impl Vector {
    pub const ZERO: Self = Self(Vec3::ZERO);
    pub const X: Self = Self(Vec3::X);
    pub const Y: Self = Self(Vec3::Y);
    pub const Z: Self = Self(Vec3::Z);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn dot(self, other: Vector) -> f32 {
        self.0.dot(other.0)
    }

    pub fn cross(self, other: Vector) -> Vector {
        Vector(self.0.cross(other.0))
    }

    pub fn length(self) -> f32 {
        self.0.length()
    }

    pub fn length_squared(self) -> f32 {
        self.0.length_squared()
    }

    /// Unit vector in the same direction.
    ///
    /// The magnitude must be nonzero; a zero vector trips `glam`'s assertion.
    /// Geometry code that can meet degenerate input uses
    /// [`Vector::try_normalize`] or [`Vector::normalize_or_zero`] instead.
    pub fn normalize(self) -> Vector {
        Vector(self.0.normalize())
    }

    pub fn try_normalize(self) -> Option<Vector> {
        self.0.try_normalize().map(Vector)
    }

    pub fn normalize_or_zero(self) -> Vector {
        Vector(self.0.normalize_or_zero())
    }

    pub fn is_zero(self) -> bool {
        self.0 == Vec3::ZERO
    }

    pub fn abs_diff_eq(self, other: Vector, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Point {
    pub const ORIGIN: Self = Self(Vec3::ZERO);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// Displacement from the origin to this point.
    pub fn to_vector(self) -> Vector {
        Vector(self.0)
    }

    pub fn distance(self, other: Point) -> f32 {
        self.0.distance(other.0)
    }

    pub fn abs_diff_eq(self, other: Point, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl From<[f32; 3]> for Vector {
    fn from(value: [f32; 3]) -> Self {
        Self(Vec3::from_array(value))
    }
}

impl From<[f32; 3]> for Point {
    fn from(value: [f32; 3]) -> Self {
        Self(Vec3::from_array(value))
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Index<usize> for Point {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f32) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Mul<Vector> for f32 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl Div<f32> for Vector {
    type Output = Vector;
    fn div(self, rhs: f32) -> Vector {
        Vector(self.0 / rhs)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl SubAssign<Vector> for Point {
    fn sub_assign(&mut self, rhs: Vector) {
        self.0 -= rhs.0;
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vector({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Point({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
