use std::ops::Index;

use crate::{
    hittable::{Hittable, Trace},
    ray::Ray,
    vector::{Color, Point, Vector},
};

/// Below this, a ray counts as parallel to a surface.
pub const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Point,
    pub radius: f32,
    pub color: Color,
}

impl Sphere {
    pub fn new(center: Point, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<Trace> {
        let o = ray.origin() - self.center;
        let d = ray.direction();

        let a = d.dot(d);
        let b = 2.0 * o.dot(d);
        let c = o.dot(o) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = (-b - sqrt_d) / (2.0 * a);
        let far = (-b + sqrt_d) / (2.0 * a);

        // an origin inside the sphere only has the exit point ahead of it
        let t = if near > 0.0 {
            near
        } else if far > 0.0 {
            far
        } else {
            return None;
        };

        let normal = (ray.at(t) - self.center).normalize_or_zero();
        Some(Trace::new(ray, t, normal, self.color))
    }
}

/// Infinite plane through `point`. Hits behind the ray origin are rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub point: Point,
    pub normal: Vector,
    pub color: Color,
}

impl Plane {
    pub fn new(point: Point, normal: Vector, color: Color) -> Self {
        Self {
            point,
            normal,
            color,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray) -> Option<Trace> {
        let n = self.normal;
        let denominator = n.dot(ray.direction());

        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = n.dot(self.point - ray.origin()) / denominator;
        if t < 0.0 {
            return None;
        }

        Some(Trace::new(ray, t, n.normalize_or_zero(), self.color))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    points: [Point; 3],
    pub color: Color,
}

impl Index<usize> for Triangle {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl Triangle {
    pub fn new(v0: Point, v1: Point, v2: Point, color: Color) -> Self {
        Self {
            points: [v0, v1, v2],
            color,
        }
    }

    pub fn points(&self) -> [Point; 3] {
        self.points
    }

    /// Unit face normal following the `v0 -> v1 -> v2` winding, or `None` for a
    /// zero-area triangle.
    pub fn normal(&self) -> Option<Vector> {
        face_normal(self[0], self[1], self[2])
    }

    pub fn centroid(&self) -> Point {
        self[0] + ((self[1] - self[0]) + (self[2] - self[0])) / 3.0
    }

    /// Intersection returning the barycentric weights of `v1` and `v2` along
    /// with the trace, so meshes can interpolate per-vertex data.
    pub(crate) fn intersect(&self, ray: &Ray) -> Option<(Trace, f32, f32)> {
        let normal = self.normal()?;
        let denominator = normal.dot(ray.direction());

        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = normal.dot(self[0] - ray.origin()) / denominator;
        if t < 0.0 {
            return None;
        }

        let position = ray.at(t);
        let (s, t_bary) = barycentric(position, self[0], self[1], self[2])?;
        if s < 0.0 || t_bary < 0.0 || s + t_bary > 1.0 {
            return None;
        }

        Some((Trace::new(ray, t, normal, self.color), s, t_bary))
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<Trace> {
        self.intersect(ray).map(|(trace, _, _)| trace)
    }
}

pub(crate) fn face_normal(v0: Point, v1: Point, v2: Point) -> Option<Vector> {
    (v1 - v0).cross(v2 - v0).try_normalize()
}

/// Barycentric coordinates `(s, t)` of `p` such that
/// `p = v0 + s (v1 - v0) + t (v2 - v0)`, assuming `p` lies in the triangle's
/// plane. `None` when the triangle is degenerate (zero denominator).
pub fn barycentric(p: Point, v0: Point, v1: Point, v2: Point) -> Option<(f32, f32)> {
    let u = v1 - v0;
    let v = v2 - v0;
    let w = p - v0;

    let uu = u.dot(u);
    let uv = u.dot(v);
    let vv = v.dot(v);
    let wu = w.dot(u);
    let wv = w.dot(v);

    let denominator = uv * uv - uu * vv;
    // |uv^2 - uu vv| is |u x v|^2, so this is a relative zero-area test
    if denominator.abs() <= f32::EPSILON * uu * vv {
        return None;
    }

    let s = (uv * wv - vv * wu) / denominator;
    let t = (uv * wu - uu * wv) / denominator;
    Some((s, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec3;

    const RED: Color = Vec3::new(1.0, 0.0, 0.0);

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            RED,
        )
    }

    #[test]
    fn test_sphere_hit_through_center() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, -10.0), 2.0, RED);
        let ray = Ray::new(Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 0.0, -1.0));

        let trace = sphere.hit(&ray).unwrap();
        assert_abs_diff_eq!(trace.t, 8.0, epsilon = 1e-5);
        assert_eq!(trace.color, RED);
        assert_eq!(trace.origin, ray.origin());

        let outward = (trace.position - sphere.center).normalize();
        assert!(trace.normal.abs_diff_eq(outward, 1e-6));
        assert!(trace.normal.abs_diff_eq(Vector::new(0.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn test_sphere_hit_from_inside_returns_exit() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, 0.0), 3.0, RED);
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::new(1.0, 0.0, 0.0));

        let trace = sphere.hit(&ray).unwrap();
        assert!(trace.t > 0.0);
        assert_abs_diff_eq!(trace.t, 8.0f32.sqrt(), epsilon = 1e-5);
        assert_abs_diff_eq!(trace.position.distance(sphere.center), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, 5.0), 1.0, RED);
        let ray = Ray::new(Point::ORIGIN, Vector::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray).is_none());

        let off_axis = Ray::new(Point::new(0.0, 2.0, 0.0), Vector::new(0.0, 0.0, 1.0));
        assert!(!sphere.hit_by(&off_axis));
    }

    #[test]
    fn test_plane_parallel_never_hits() {
        let plane = Plane::new(Point::ORIGIN, Vector::new(0.0, 1.0, 0.0), RED);
        let direction = Vector::new(1.0, 0.0, 1.0).normalize();

        for origin in [
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
            Point::new(3.0, 0.0, -2.0),
        ] {
            assert!(plane.hit(&Ray::new(origin, direction)).is_none());
        }
    }

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Point::new(0.0, -1.0, 0.0), Vector::new(0.0, 2.0, 0.0), RED);
        let ray = Ray::new(Point::ORIGIN, Vector::new(0.0, -1.0, 0.0));

        let trace = plane.hit(&ray).unwrap();
        assert_abs_diff_eq!(trace.t, 1.0, epsilon = 1e-6);
        assert_eq!(trace.normal, Vector::new(0.0, 1.0, 0.0));

        let away = Ray::new(Point::ORIGIN, Vector::new(0.0, 1.0, 0.0));
        assert!(plane.hit(&away).is_none());
    }

    #[test]
    fn test_barycentric_centroid_inside() {
        let tri = unit_triangle();
        let (s, t) = barycentric(tri.centroid(), tri[0], tri[1], tri[2]).unwrap();

        assert!(s > 0.0 && t > 0.0 && s + t < 1.0);
        assert_abs_diff_eq!(s, 1.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(t, 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_barycentric_beyond_edge() {
        let tri = unit_triangle();
        // just past the hypotenuse x + y = 1
        let (s, t) = barycentric(Point::new(0.51, 0.5, 0.0), tri[0], tri[1], tri[2]).unwrap();

        assert!(s >= 0.0 && t >= 0.0);
        assert!(s + t > 1.0);
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let tri = unit_triangle();
        let down = Vector::new(0.0, 0.0, -1.0);

        let trace = tri.hit(&Ray::new(Point::new(0.25, 0.25, 1.0), down)).unwrap();
        assert_abs_diff_eq!(trace.t, 1.0, epsilon = 1e-6);
        assert!(trace.normal.abs_diff_eq(Vector::Z, 1e-6));
        assert_eq!(trace.color, RED);

        assert!(tri.hit(&Ray::new(Point::new(0.8, 0.8, 1.0), down)).is_none());
        assert!(tri.hit(&Ray::new(Point::new(0.25, 0.25, -1.0), down)).is_none());
        assert!(tri
            .hit(&Ray::new(Point::new(0.25, 0.25, 1.0), Vector::X))
            .is_none());
    }

    #[test]
    fn test_degenerate_triangle_is_a_miss() {
        let collinear = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
            RED,
        );
        assert_eq!(collinear.normal(), None);
        assert_eq!(
            barycentric(Point::ORIGIN, collinear[0], collinear[1], collinear[2]),
            None
        );

        let ray = Ray::new(Point::new(1.0, 0.0, 1.0), Vector::new(-1.0, 0.0, 0.0));
        assert!(collinear.hit(&ray).is_none());
    }
}
