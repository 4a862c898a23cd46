use std::f32::consts::PI;

use crate::{
    error::CameraError,
    ray::Ray,
    vector::{Point, Vector},
};

/// Pinhole camera with a sensor one unit in front of the eye.
///
/// Pixel coordinates map onto the sensor boundary-inclusively: pixel 0 lands
/// on one edge of the sensor and pixel `dimension - 1` on the other, rather
/// than sampling pixel centers. `py = 0` is the bottom scanline.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    eye: Point,
    target: Point,
    up: Vector,
    vertical_fov: f32,
    pixel_width: u32,
    pixel_height: u32,

    u: Vector,
    v: Vector,
    w: Vector,
    sensor_width: f32,
    sensor_height: f32,
    lower_left_pixel: Point,
}

impl Camera {
    pub fn new(
        eye: Point,
        target: Point,
        up: Vector,
        vertical_fov: f32,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self, CameraError> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(CameraError::ZeroDimension {
                width: pixel_width,
                height: pixel_height,
            });
        }
        if !(vertical_fov > 0.0 && vertical_fov < PI) {
            return Err(CameraError::InvalidFov(vertical_fov));
        }

        let aspect_ratio = pixel_width as f32 / pixel_height as f32;
        let sensor_height = 2.0 * (vertical_fov / 2.0).tan();
        let sensor_width = aspect_ratio * sensor_height;

        // w points backwards, away from the target
        let w = -(target - eye).try_normalize().ok_or(CameraError::EyeAtTarget)?;
        let v = (up - (w.dot(up) / w.dot(w)) * w)
            .try_normalize()
            .ok_or(CameraError::UpParallelToView)?;
        let u = v.cross(w);

        let lower_left_pixel = eye - (sensor_width / 2.0) * u - (sensor_height / 2.0) * v - w;

        Ok(Self {
            eye,
            target,
            up,
            vertical_fov,
            pixel_width,
            pixel_height,
            u,
            v,
            w,
            sensor_width,
            sensor_height,
            lower_left_pixel,
        })
    }

    pub fn cast_ray(&self, px: u32, py: u32) -> Ray {
        let sx = sensor_offset(px, self.pixel_width, self.sensor_width);
        let sy = sensor_offset(py, self.pixel_height, self.sensor_height);

        let pixel = self.lower_left_pixel + sx * self.u + sy * self.v;
        Ray::new(self.eye, (pixel - self.eye).normalize())
    }

    pub fn eye(&self) -> Point {
        self.eye
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn vertical_fov(&self) -> f32 {
        self.vertical_fov
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Right, up and backward axes of the view.
    pub fn basis(&self) -> (Vector, Vector, Vector) {
        (self.u, self.v, self.w)
    }

    pub fn sensor_size(&self) -> (f32, f32) {
        (self.sensor_width, self.sensor_height)
    }
}

/// Maps `[0, pixels - 1]` onto `[0, sensor]`; a single pixel looks through
/// the sensor center.
fn sensor_offset(pixel: u32, pixels: u32, sensor: f32) -> f32 {
    if pixels <= 1 {
        return sensor / 2.0;
    }
    pixel as f32 * sensor / (pixels - 1) as f32
}
