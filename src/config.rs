//! TOML description of a render batch.
//!
//! ```toml
//! model = "inputs/cube.obj"
//! output_dir = "outputs"
//!
//! [image]
//! width = 500
//! height = 500
//! format = "png"
//!
//! [camera]
//! eye = [3.0, 3.0, 5.0]
//! target = [0.0, 0.0, 0.0]
//! up = [0.0, 1.0, 0.0]
//! fov_degrees = 90.0
//!
//! [[spheres]]
//! center = [0.0, 0.0, -3.0]
//! radius = 1.0
//! color = [1.0, 0.0, 0.0]
//!
//! [[variants]]
//! name = "tilted"
//! transforms = [
//!     { scale = [1.0, 2.0, 1.0] },
//!     { rotate = { axis = "x", degrees = 30.0 } },
//! ]
//! ```
//!
//! Every section is optional. Transforms of a variant are applied in the order
//! they are listed.

use std::{fs, path::Path, path::PathBuf, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::{
    camera::Camera,
    error::{CameraError, ConfigError},
    output::OutputFormat,
    primitive::{Plane, Sphere, Triangle},
    scene::{Object, Sky},
    transform::{Axis, Matrix},
    vector::Color,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub image: ImageConfig,
    pub camera: CameraConfig,
    pub sky: SkyConfig,
    pub model: Option<PathBuf>,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub spheres: Vec<SphereConfig>,
    #[serde(default)]
    pub planes: Vec<PlaneConfig>,
    #[serde(default)]
    pub triangles: Vec<TriangleConfig>,
    /// Left empty when the file lists none; see [`Config::variants`].
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            format: OutputFormat::Png,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [3.0, 3.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 90.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkyConfig {
    pub bottom: [f32; 3],
    pub top: [f32; 3],
}

impl Default for SkyConfig {
    fn default() -> Self {
        let sky = Sky::default();
        Self {
            bottom: sky.bottom.to_array(),
            top: sky.top.to_array(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereConfig {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaneConfig {
    pub point: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriangleConfig {
    pub vertices: [[f32; 3]; 3],
    pub color: [f32; 3],
}

/// One step of a variant's transform chain.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum TransformOp {
    Translate([f32; 3]),
    Scale([f32; 3]),
    Rotate {
        axis: Axis,
        degrees: f32,
    },
    Reflect {
        #[serde(default)]
        x: bool,
        #[serde(default)]
        y: bool,
        #[serde(default)]
        z: bool,
    },
    Shear {
        #[serde(default)]
        xy: f32,
        #[serde(default)]
        xz: f32,
        #[serde(default)]
        yx: f32,
        #[serde(default)]
        yz: f32,
        #[serde(default)]
        zx: f32,
        #[serde(default)]
        zy: f32,
    },
}

impl TransformOp {
    pub fn to_matrix(&self) -> Matrix {
        match *self {
            TransformOp::Translate([dx, dy, dz]) => Matrix::translation(dx, dy, dz),
            TransformOp::Scale([sx, sy, sz]) => Matrix::scale(sx, sy, sz),
            TransformOp::Rotate { axis, degrees } => Matrix::rotation(axis, degrees.to_radians()),
            TransformOp::Reflect { x, y, z } => Matrix::reflection(x, y, z),
            TransformOp::Shear {
                xy,
                xz,
                yx,
                yz,
                zx,
                zy,
            } => Matrix::shear(xy, xz, yx, yz, zx, zy),
        }
    }

    fn shear_xy(xy: f32) -> Self {
        TransformOp::Shear {
            xy,
            xz: 0.0,
            yx: 0.0,
            yz: 0.0,
            zx: 0.0,
            zy: 0.0,
        }
    }
}

/// A named copy of the model, written to `<output_dir>/<name>.<format>`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub transforms: Vec<TransformOp>,
}

impl Variant {
    pub fn new(name: impl Into<String>, transforms: Vec<TransformOp>) -> Self {
        Self {
            name: name.into(),
            transforms,
        }
    }

    pub fn original() -> Self {
        Self::new("original", Vec::new())
    }

    /// The whole chain as one matrix, first listed transform applied first.
    pub fn matrix(&self) -> Matrix {
        self.transforms
            .iter()
            .fold(Matrix::identity(), |acc, op| acc.then(op.to_matrix()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            camera: CameraConfig::default(),
            sky: SkyConfig::default(),
            model: None,
            output_dir: PathBuf::from("outputs"),
            spheres: Vec::new(),
            planes: Vec::new(),
            triangles: Vec::new(),
            variants: demo_variants(),
        }
    }
}

fn demo_variants() -> Vec<Variant> {
    use TransformOp::*;

    vec![
        Variant::original(),
        Variant::new("translated", vec![Translate([0.0, 0.0, 2.0])]),
        Variant::new(
            "rotated",
            vec![Rotate {
                axis: Axis::Y,
                degrees: 45.0,
            }],
        ),
        Variant::new("scaled", vec![Scale([1.0, 2.0, 0.5])]),
        Variant::new("sheared", vec![TransformOp::shear_xy(0.5)]),
        Variant::new(
            "reflected",
            vec![Reflect {
                x: false,
                y: false,
                z: true,
            }],
        ),
        Variant::new(
            "combined",
            vec![
                Scale([1.2, 0.8, 1.0]),
                TransformOp::shear_xy(0.3),
                Rotate {
                    axis: Axis::X,
                    degrees: 30.0,
                },
                Rotate {
                    axis: Axis::Y,
                    degrees: 30.0,
                },
                Translate([0.0, -1.0, -1.0]),
            ],
        ),
    ]
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = text.parse()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for sphere in self.spheres.iter() {
            if !(sphere.radius > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "sphere radius must be positive, got {}",
                    sphere.radius
                )));
            }
        }
        for (i, variant) in self.variants.iter().enumerate() {
            if variant.name.is_empty() || variant.name.contains(['/', '\\']) {
                return Err(ConfigError::Invalid(format!(
                    "variant name '{}' is not a valid file name",
                    variant.name
                )));
            }
            if self.variants[..i].iter().any(|v| v.name == variant.name) {
                return Err(ConfigError::Invalid(format!(
                    "variant '{}' is listed twice",
                    variant.name
                )));
            }
        }
        Ok(())
    }

    pub fn camera(&self) -> Result<Camera, CameraError> {
        let c = &self.camera;
        Camera::new(
            c.eye.into(),
            c.target.into(),
            c.up.into(),
            c.fov_degrees.to_radians(),
            self.image.width,
            self.image.height,
        )
    }

    pub fn sky(&self) -> Sky {
        Sky::new(Color::from(self.sky.bottom), Color::from(self.sky.top))
    }

    /// Where the image of `variant` is written.
    pub fn output_path(&self, variant: &Variant) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", variant.name, self.image.format.extension()))
    }

    /// Variants to render; a lone untransformed one when none are listed.
    pub fn variants(&self) -> Vec<Variant> {
        if self.variants.is_empty() {
            vec![Variant::original()]
        } else {
            self.variants.clone()
        }
    }

    /// The extra primitives, in file order: spheres, then planes, then
    /// triangles.
    pub fn objects(&self) -> Vec<Object> {
        let spheres = self
            .spheres
            .iter()
            .map(|s| Object::from(Sphere::new(s.center.into(), s.radius, Color::from(s.color))));
        let planes = self.planes.iter().map(|p| {
            Object::from(Plane::new(p.point.into(), p.normal.into(), Color::from(p.color)))
        });
        let triangles = self.triangles.iter().map(|t| {
            let [a, b, c] = t.vertices;
            Object::from(Triangle::new(a.into(), b.into(), c.into(), Color::from(t.color)))
        });
        spheres.chain(planes).chain(triangles).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Point, Vector};
    use approx::assert_abs_diff_eq;

    const DOCUMENT: &str = r#"
        model = "inputs/teapot.obj"
        output_dir = "renders"

        [image]
        width = 320
        height = 240
        format = "ppm"

        [camera]
        eye = [0.0, 0.0, 5.0]
        fov_degrees = 60.0

        [sky]
        bottom = [0.0, 0.0, 0.0]
        top = [1.0, 1.0, 1.0]

        [[spheres]]
        center = [0.0, 0.0, -3.0]
        radius = 1.0
        color = [1.0, 0.0, 0.0]

        [[planes]]
        point = [0.0, -1.0, 0.0]
        normal = [0.0, 1.0, 0.0]
        color = [0.5, 0.5, 0.5]

        [[triangles]]
        vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        color = [0.0, 1.0, 0.0]

        [[variants]]
        name = "moved"
        transforms = [
            { translate = [1.0, 2.0, 3.0] },
            { rotate = { axis = "z", degrees = 90.0 } },
            { reflect = { x = true } },
            { shear = { xy = 0.5 } },
        ]

        [[variants]]
        name = "plain"
    "#;

    #[test]
    fn test_parse_full_document() {
        let config: Config = DOCUMENT.parse().unwrap();

        assert_eq!(config.model, Some(PathBuf::from("inputs/teapot.obj")));
        assert_eq!(config.output_dir, PathBuf::from("renders"));
        assert_eq!(
            config.image,
            ImageConfig {
                width: 320,
                height: 240,
                format: OutputFormat::Ppm
            }
        );
        // missing camera keys keep their defaults
        assert_eq!(config.camera.target, [0.0, 0.0, 0.0]);
        assert_eq!(config.camera.up, [0.0, 1.0, 0.0]);
        assert_eq!(config.camera.fov_degrees, 60.0);

        assert_eq!(config.objects().len(), 3);
        assert!(matches!(config.objects()[0], Object::Sphere(_)));
        assert!(matches!(config.objects()[2], Object::Triangle(_)));

        let variants = config.variants();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].transforms.len(), 4);
        assert_eq!(
            variants[0].transforms[1],
            TransformOp::Rotate {
                axis: Axis::Z,
                degrees: 90.0
            }
        );
        assert_eq!(
            variants[0].transforms[2],
            TransformOp::Reflect {
                x: true,
                y: false,
                z: false
            }
        );
        assert!(variants[1].transforms.is_empty());
        assert_eq!(variants[1].matrix(), Matrix::identity());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = "".parse().unwrap();

        assert_eq!(config.image, ImageConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.sky(), Sky::default());
        assert!(config.model.is_none());
        assert!(config.objects().is_empty());
        assert_eq!(config.variants(), vec![Variant::original()]);
    }

    #[test]
    fn test_default_is_the_demo_batch() {
        let config = Config::default();
        let names: Vec<_> = config.variants().into_iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            [
                "original",
                "translated",
                "rotated",
                "scaled",
                "sheared",
                "reflected",
                "combined"
            ]
        );
        config.validate().unwrap();

        let camera = config.camera().unwrap();
        assert_eq!(camera.eye(), Point::new(3.0, 3.0, 5.0));
        assert_eq!(camera.pixel_width(), 500);
        assert_abs_diff_eq!(camera.vertical_fov(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_output_path_follows_format() {
        let mut config = Config::default();
        let variant = Variant::new("scaled", Vec::new());
        assert_eq!(config.output_path(&variant), PathBuf::from("outputs/scaled.png"));

        config.image.format = OutputFormat::Ppm;
        config.output_dir = PathBuf::from("renders");
        assert_eq!(config.output_path(&variant), PathBuf::from("renders/scaled.ppm"));
    }

    #[test]
    fn test_variant_applies_transforms_in_order() {
        let variant = Variant::new(
            "v",
            vec![
                TransformOp::Translate([1.0, 0.0, 0.0]),
                TransformOp::Scale([2.0, 2.0, 2.0]),
            ],
        );
        // translate first, then scale
        let p = variant.matrix().apply_point(Point::ORIGIN);
        assert!(p.abs_diff_eq(Point::new(2.0, 0.0, 0.0), 1e-6));

        let rotate = TransformOp::Rotate {
            axis: Axis::Z,
            degrees: 90.0,
        };
        let v = rotate.to_matrix().apply_vector(Vector::X);
        assert!(v.abs_diff_eq(Vector::Y, 1e-6));
    }

    #[test]
    fn test_combined_demo_matrix() {
        let combined = Config::default().variants().pop().unwrap();
        let expected = Matrix::scale(1.2, 0.8, 1.0)
            .then(Matrix::shear(0.3, 0.0, 0.0, 0.0, 0.0, 0.0))
            .then(Matrix::rotation(Axis::X, 30f32.to_radians()))
            .then(Matrix::rotation(Axis::Y, 30f32.to_radians()))
            .then(Matrix::translation(0.0, -1.0, -1.0));
        assert_eq!(combined.matrix(), expected);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            "[image]\nwidth = -3\n".parse::<Config>(),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            "[image]\nformat = \"gif\"\n".parse::<Config>(),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            "colour = 3\n".parse::<Config>(),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            "[[variants]]\nname = \"a\"\ntransforms = [{ twist = 1.0 }]\n".parse::<Config>(),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            "[[spheres]]\ncenter = [0.0, 0.0, 0.0]\nradius = 0.0\ncolor = [1.0, 1.0, 1.0]\n"
                .parse::<Config>(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            "[[variants]]\nname = \"a\"\n[[variants]]\nname = \"a\"\n".parse::<Config>(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            "[[variants]]\nname = \"../a\"\n".parse::<Config>(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/facet.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_camera_errors_surface() {
        let config: Config = "[image]\nwidth = 0\n".parse().unwrap();
        assert!(config.camera().is_err());
    }
}
