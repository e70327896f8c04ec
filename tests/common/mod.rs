#![allow(dead_code)]

extern crate image as image_rs;

use image_rs::{imageops, Rgb, RgbImage};
use rand::prelude::*;
use rand::rngs::SmallRng;

pub const SCENE_SEED: u64 = 0x5CE4E;

/// Seeded random rectangles over a smooth background, rich in corners but without repeated texture.
pub fn synthetic_scene(width: u32, height: u32, rectangles: usize, seed: u64) -> RgbImage {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut image = RgbImage::from_fn(width, height, |x, y| {
        let r = 60 + (x * 40 / width) as u8;
        let g = 70 + (y * 40 / height) as u8;
        Rgb([r, g, 90])
    });

    for _ in 0..rectangles {
        let w = rng.gen_range(6..40);
        let h = rng.gen_range(6..40);
        let x0 = rng.gen_range(0..width);
        let y0 = rng.gen_range(0..height);
        let color = Rgb([rng.gen_range(0..=255u8), rng.gen_range(0..=255u8), rng.gen_range(0..=255u8)]);
        for y in y0..(y0 + h).min(height) {
            for x in x0..(x0 + w).min(width) {
                image.put_pixel(x, y, color);
            }
        }
    }

    image
}

/// `count` crops of `crop_width` columns, each starting `step` columns right of the previous one.
pub fn horizontal_pans(scene: &RgbImage, crop_width: u32, step: u32, count: u32) -> Vec<RgbImage> {
    (0..count).map(|i| imageops::crop_imm(scene, i * step, 0, crop_width, scene.height()).to_image()).collect()
}

pub fn default_pans() -> Vec<RgbImage> {
    let scene = synthetic_scene(600, 200, 160, SCENE_SEED);
    horizontal_pans(&scene, 300, 150, 3)
}
