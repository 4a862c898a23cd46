//! Flat-shaded ray caster for triangle meshes and simple primitives.
//!
//! A [`camera::Camera`] casts one ray per pixel into a [`scene::Scene`]; the
//! nearest object hit gives the pixel its flat color, and rays that escape
//! pick up the [`scene::Sky`] gradient. Meshes come from OBJ or STL files
//! through [`loader`] and can be copied under arbitrary affine transforms
//! with [`transform::transform_mesh`].

pub mod camera;
pub mod config;
pub mod error;
pub mod hittable;
pub mod loader;
pub mod mesh;
pub mod output;
pub mod primitive;
pub mod ray;
pub mod render;
pub mod scene;
pub mod transform;
pub mod vector;

pub use glam;
