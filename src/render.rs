use std::time::Instant;

use glam::Vec3;
use image::{Rgb, RgbImage};
use log::info;

use crate::{
    camera::Camera,
    scene::{Scene, Sky},
    vector::Color,
};

/// Rendered pixels, row 0 being the top scanline. Channels are in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at column `x` of row `y`, counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, y);
            Rgb([to_u8(c.x), to_u8(c.y), to_u8(c.z)])
        })
    }
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * u8::MAX as f32).round() as u8
}

pub fn clamp_color(color: Color) -> Color {
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

pub struct Renderer {
    sky: Sky,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            sky: Sky::default(),
        }
    }

    pub fn sky(mut self, sky: Sky) -> Self {
        self.sky = sky;
        self
    }

    /// One ray per pixel, scanning from the top row down.
    pub fn render(&self, scene: &Scene, camera: &Camera) -> Frame {
        let width = camera.pixel_width();
        let height = camera.pixel_height();
        info!(
            "Rendering {}x{} image of {} objects",
            width,
            height,
            scene.len()
        );
        let start = Instant::now();

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for py in (0..height).rev() {
            for px in 0..width {
                let ray = camera.cast_ray(px, py);
                pixels.push(clamp_color(scene.color(&ray, &self.sky)));
            }
        }

        info!("Image rendered in {:.2?}", start.elapsed());
        Frame {
            width,
            height,
            pixels,
        }
    }
}
