use glam::Vec3;
use log::debug;

use crate::{
    hittable::{Hittable, Trace},
    mesh::Mesh,
    primitive::{Plane, Sphere, Triangle},
    ray::Ray,
    vector::Color,
};

/// Every kind of object a scene can hold.
#[derive(Clone, Debug)]
pub enum Object {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl Hittable for Object {
    fn hit(&self, ray: &Ray) -> Option<Trace> {
        match self {
            Object::Sphere(sphere) => sphere.hit(ray),
            Object::Plane(plane) => plane.hit(ray),
            Object::Triangle(triangle) => triangle.hit(ray),
            Object::Mesh(mesh) => mesh.hit(ray),
        }
    }
}

impl From<Sphere> for Object {
    fn from(value: Sphere) -> Self {
        Self::Sphere(value)
    }
}

impl From<Plane> for Object {
    fn from(value: Plane) -> Self {
        Self::Plane(value)
    }
}

impl From<Triangle> for Object {
    fn from(value: Triangle) -> Self {
        Self::Triangle(value)
    }
}

impl From<Mesh> for Object {
    fn from(value: Mesh) -> Self {
        Self::Mesh(value)
    }
}

/// Background gradient used when a ray hits nothing, blended on the
/// direction's vertical component: straight down gives `bottom`, straight up
/// gives `top`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sky {
    pub bottom: Color,
    pub top: Color,
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            bottom: Vec3::new(1.0, 1.0, 1.0),
            top: Vec3::new(0.5, 0.7, 1.0),
        }
    }
}

impl Sky {
    pub fn new(bottom: Color, top: Color) -> Self {
        Self { bottom, top }
    }

    pub fn color(&self, ray: &Ray) -> Color {
        let y = ray
            .direction()
            .try_normalize()
            .map_or(0.0, |d| d.y());
        let a = 0.5 * (y + 1.0);
        (1.0 - a) * self.bottom + a * self.top
    }
}

/// Ordered collection of objects, read-only while rendering.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<Object>,
}

impl Hittable for Scene {
    /// Nearest hit over all objects. On equal distances the object added
    /// first wins.
    fn hit(&self, ray: &Ray) -> Option<Trace> {
        let mut closest: Option<Trace> = None;
        for object in self.objects.iter() {
            if let Some(trace) = object.hit(ray) {
                if closest.map_or(true, |c| trace.t < c.t) {
                    closest = Some(trace);
                }
            }
        }
        closest
    }
}

impl Scene {
    pub fn new(objects: Vec<Object>) -> Self {
        debug!("Scene created with {} objects", objects.len());
        Self { objects }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Same as [`Hittable::hit`] on the whole scene.
    pub fn resolve(&self, ray: &Ray) -> Option<Trace> {
        self.hit(ray)
    }

    /// Color seen along `ray`: the nearest hit's flat color, or the sky.
    pub fn color(&self, ray: &Ray, sky: &Sky) -> Color {
        match self.resolve(ray) {
            Some(trace) => trace.color,
            None => sky.color(ray),
        }
    }
}
