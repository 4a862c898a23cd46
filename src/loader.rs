//! Reads triangle models from Wavefront OBJ and STL files.
//!
//! OBJ faces take the diffuse color (`Kd`) of their group's material. STL has
//! no material information, so every face gets the same color.

use std::{fs::OpenOptions, path::Path};

use glam::Vec3;
use log::{debug, info, warn};
use obj::{Obj, ObjMaterial};

use crate::{
    error::{LoadError, MeshError},
    mesh::{Face, Mesh},
    vector::{Color, Point},
};

/// Color of faces without a material.
pub const DEFAULT_COLOR: Color = Vec3::ONE;

/// Color of faces whose material is referenced but never defined.
pub const MISSING_MATERIAL_COLOR: Color = Vec3::ZERO;

/// Vertex positions and colored faces, as read from disk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub vertices: Vec<Point>,
    pub faces: Vec<Face>,
}

impl Model {
    pub fn into_mesh(self) -> Result<Mesh, MeshError> {
        Mesh::new(self.vertices, self.faces)
    }
}

impl TryFrom<Model> for Mesh {
    type Error = MeshError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        value.into_mesh()
    }
}

pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let model = match extension.as_deref() {
        Some("obj") => load_obj(path)?,
        Some("stl") => load_stl(path, DEFAULT_COLOR)?,
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(
        "Loaded {}: {} vertices, {} faces",
        path.display(),
        model.vertices.len(),
        model.faces.len()
    );
    Ok(model)
}

pub fn load_obj(path: &Path) -> Result<Model, LoadError> {
    let mut obj = Obj::load(path).map_err(|source| LoadError::Obj {
        path: path.to_path_buf(),
        source,
    })?;
    if let Err(e) = obj.load_mtls() {
        warn!("Failed to load materials for {}: {:?}", path.display(), e);
    }

    let vertices = obj.data.position.iter().map(|&p| Point::from(p)).collect();

    let mut faces = Vec::new();
    let mut polygon = 0;
    for object in obj.data.objects.iter() {
        for group in object.groups.iter() {
            let color = material_color(group.material.as_ref());
            for poly in group.polys.iter() {
                let corners: Vec<usize> = poly.0.iter().map(|tuple| tuple.0).collect();
                if corners.len() < 3 {
                    return Err(LoadError::DegeneratePolygon {
                        path: path.to_path_buf(),
                        polygon,
                        corners: corners.len(),
                    });
                }
                // fan around the first corner
                for i in 1..corners.len() - 1 {
                    faces.push(Face::new([corners[0], corners[i], corners[i + 1]], color));
                }
                polygon += 1;
            }
        }
    }

    debug!("{} polygons triangulated into {} faces", polygon, faces.len());
    Ok(Model { vertices, faces })
}

fn material_color(material: Option<&ObjMaterial>) -> Color {
    match material {
        None => DEFAULT_COLOR,
        Some(ObjMaterial::Mtl(mtl)) => mtl.kd.map_or(DEFAULT_COLOR, Vec3::from),
        Some(ObjMaterial::Ref(name)) => {
            warn!("Material '{}' is not defined, using black", name);
            MISSING_MATERIAL_COLOR
        }
    }
}

pub fn load_stl(path: &Path, color: Color) -> Result<Model, LoadError> {
    let stl_error = |source| LoadError::Stl {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(stl_error)?;
    let stl = stl_io::read_stl(&mut file).map_err(stl_error)?;

    let vertices = stl
        .vertices
        .iter()
        .map(|v| Point::new(v[0], v[1], v[2]))
        .collect();
    let faces = stl
        .faces
        .iter()
        .map(|f| Face::new(f.vertices, color))
        .collect();

    Ok(Model { vertices, faces })
}
