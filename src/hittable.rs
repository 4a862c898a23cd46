use crate::{
    ray::Ray,
    vector::{Color, Point, Vector},
};

/// Anything a ray can be tested against.
pub trait Hittable {
    fn hit(&self, ray: &Ray) -> Option<Trace>;
    fn hit_by(&self, ray: &Ray) -> bool {
        self.hit(ray).is_some()
    }
}

/// Result of a single successful intersection query.
///
/// A miss is `None`; a `Trace` always describes an accepted hit and is the
/// only place a hit's color is carried.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Trace {
    pub t: f32,
    pub origin: Point,
    pub position: Point,
    pub normal: Vector,
    pub color: Color,
}

impl Trace {
    pub fn new(ray: &Ray, t: f32, normal: Vector, color: Color) -> Self {
        Self {
            t,
            origin: ray.origin(),
            position: ray.at(t),
            normal,
            color,
        }
    }
}
