use log::{debug, warn};

use crate::{
    error::MeshError,
    hittable::{Hittable, Trace},
    primitive::{face_normal, Triangle},
    ray::Ray,
    vector::{Color, Point, Vector},
};

/// One triangle of an indexed mesh with its flat color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub color: Color,
}

impl Face {
    pub fn new(indices: [usize; 3], color: Color) -> Self {
        Self { indices, color }
    }
}

/// Indexed triangle soup with flat per-face colors and smoothed vertex
/// normals.
///
/// A mesh owns all of its arrays. Transforming one (see
/// [`crate::transform::transform_mesh`]) produces an independent copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub(crate) vertices: Vec<Point>,
    pub(crate) faces: Vec<[usize; 3]>,
    pub(crate) face_normals: Vec<Vector>,
    pub(crate) vertex_normals: Vec<Vector>,
    pub(crate) colors: Vec<Color>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (face, f) in faces.iter().enumerate() {
            if let Some(&index) = f.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        let mut mesh = Self {
            vertices,
            faces: faces.iter().map(|f| f.indices).collect(),
            face_normals: Vec::new(),
            vertex_normals: Vec::new(),
            colors: faces.iter().map(|f| f.color).collect(),
        };
        mesh.compute_face_normals();
        mesh.smooth_vertex_normals();

        debug!(
            "Built mesh with {} vertices and {} triangles",
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Recomputes every triangle normal from the current vertex positions.
    /// Zero-area triangles get a zero normal.
    pub(crate) fn compute_face_normals(&mut self) {
        self.face_normals = self
            .faces
            .iter()
            .map(|&[a, b, c]| {
                face_normal(self.vertices[a], self.vertices[b], self.vertices[c])
                    .unwrap_or(Vector::ZERO)
            })
            .collect();

        let degenerate = self.face_normals.iter().filter(|n| n.is_zero()).count();
        if degenerate > 0 {
            warn!("Mesh has {degenerate} zero-area triangles, they will never be hit");
        }
    }

    /// Averages the normals of the triangles sharing each vertex. Vertices
    /// that belong to no triangle keep a zero normal.
    fn smooth_vertex_normals(&mut self) {
        let mut sums = vec![Vector::ZERO; self.vertices.len()];
        let mut counts = vec![0u32; self.vertices.len()];

        for (face, normal) in self.faces.iter().zip(self.face_normals.iter()) {
            for &index in face {
                sums[index] += *normal;
                counts[index] += 1;
            }
        }

        self.vertex_normals = sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| {
                if count == 0 {
                    Vector::ZERO
                } else {
                    (sum / count as f32).normalize_or_zero()
                }
            })
            .collect();
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn face_normals(&self) -> &[Vector] {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &[Vector] {
        &self.vertex_normals
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    pub fn triangle(&self, index: usize) -> Triangle {
        let [a, b, c] = self.faces[index];
        Triangle::new(
            self.vertices[a],
            self.vertices[b],
            self.vertices[c],
            self.colors[index],
        )
    }
}

impl Hittable for Mesh {
    /// Tests every triangle; there is no acceleration structure.
    fn hit(&self, ray: &Ray) -> Option<Trace> {
        let mut closest: Option<Trace> = None;

        for index in 0..self.faces.len() {
            let Some((mut trace, s, t)) = self.triangle(index).intersect(ray) else {
                continue;
            };
            if closest.map_or(true, |c| trace.t < c.t) {
                let [a, b, c] = self.faces[index];
                let smooth = (1.0 - s - t) * self.vertex_normals[a]
                    + s * self.vertex_normals[b]
                    + t * self.vertex_normals[c];
                trace.normal = smooth
                    .try_normalize()
                    .unwrap_or(self.face_normals[index]);
                closest = Some(trace);
            }
        }

        closest
    }
}
