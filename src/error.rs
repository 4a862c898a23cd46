//! Error types for the renderer and its I/O collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a mesh from vertex and face lists.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    /// A face refers to a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Invalid camera parameters.
#[derive(Error, Debug, PartialEq)]
pub enum CameraError {
    #[error("image dimensions must be nonzero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("camera position and look-at target coincide")]
    EyeAtTarget,

    #[error("up vector is parallel to the viewing direction")]
    UpParallelToView,

    /// Vertical field of view must lie strictly between 0 and pi radians.
    #[error("vertical field of view {0} rad is out of range")]
    InvalidFov(f32),
}

/// Errors raised by the model loader.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to read OBJ file {}: {source}", .path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: obj::ObjError,
    },

    #[error("failed to read STL file {}: {source}", .path.display())]
    Stl {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A polygon with fewer than three corners.
    #[error("polygon {polygon} in {} has only {corners} vertices", .path.display())]
    DegeneratePolygon {
        path: PathBuf,
        polygon: usize,
        corners: usize,
    },

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Errors raised while reading the render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised by the image sink.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("unsupported image format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
