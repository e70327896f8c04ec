extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{Rgb, RgbImage};
use na::DMatrix;

use crate::image::Image;
use crate::Float;

/// Luminance weights for R, G, B.
pub const GRAY_WEIGHTS: [Float; 3] = [0.299, 0.587, 0.114];

/// Three channel (R,G,B) float image, every plane indexed (row,col) = (y,x).
#[derive(Debug,Clone,PartialEq)]
pub struct ColorImage {
    pub channels: [DMatrix<Float>; 3]
}

impl ColorImage {

    pub fn zeros(width: usize, height: usize) -> ColorImage {
        ColorImage { channels: [DMatrix::zeros(height,width), DMatrix::zeros(height,width), DMatrix::zeros(height,width)] }
    }

    pub fn from_rgb_image(image: &RgbImage) -> ColorImage {
        let (width, height) = image.dimensions();
        let plane = |k: usize| DMatrix::<Float>::from_fn(height as usize, width as usize, |r,c| image.get_pixel(c as u32, r as u32)[k] as Float);
        ColorImage { channels: [plane(0), plane(1), plane(2)] }
    }

    /// Rounds and saturates every sample to 8 bit.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x,y| {
            let idx = (y as usize, x as usize);
            Rgb([quantize(self.channels[0][idx]), quantize(self.channels[1][idx]), quantize(self.channels[2][idx])])
        })
    }

    pub fn to_gray(&self) -> Image {
        let buffer = GRAY_WEIGHTS[0]*&self.channels[0] + GRAY_WEIGHTS[1]*&self.channels[1] + GRAY_WEIGHTS[2]*&self.channels[2];
        Image::from_matrix(buffer)
    }

    pub fn width(&self) -> usize {
        self.channels[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.channels[0].nrows()
    }

    pub fn flip_horizontal(&self) -> ColorImage {
        let width = self.width();
        let flip = |plane: &DMatrix<Float>| DMatrix::<Float>::from_fn(plane.nrows(), width, |r,c| plane[(r, width - 1 - c)]);
        ColorImage { channels: [flip(&self.channels[0]), flip(&self.channels[1]), flip(&self.channels[2])] }
    }

    /// Copies `image` into this image with its top left corner at (`row`,`col`).
    pub fn paste(&mut self, image: &ColorImage, row: usize, col: usize) {
        for (target, source) in self.channels.iter_mut().zip(image.channels.iter()) {
            target.view_mut((row,col),(source.nrows(),source.ncols())).copy_from(source);
        }
    }

    pub fn crop(&self, row: usize, col: usize, height: usize, width: usize) -> ColorImage {
        let cut = |plane: &DMatrix<Float>| plane.view((row,col),(height,width)).into_owned();
        ColorImage { channels: [cut(&self.channels[0]), cut(&self.channels[1]), cut(&self.channels[2])] }
    }

    /// Per pixel weighting with a single channel mask applied to all three channels.
    pub fn weighted(&self, mask: &DMatrix<Float>) -> ColorImage {
        let weigh = |plane: &DMatrix<Float>| plane.component_mul(mask);
        ColorImage { channels: [weigh(&self.channels[0]), weigh(&self.channels[1]), weigh(&self.channels[2])] }
    }

    /// Bilinear sample of all three channels, see `Image::bilinear`.
    pub fn bilinear(&self, x: Float, y: Float) -> [Float; 3] {
        let x_max = self.width() - 1;
        let y_max = self.height() - 1;
        let x_0 = (x.trunc() as usize).min(x_max);
        let y_0 = (y.trunc() as usize).min(y_max);
        let x_1 = (x_0 + 1).min(x_max);
        let y_1 = (y_0 + 1).min(y_max);
        let dx = x - x_0 as Float;
        let dy = y - y_0 as Float;

        let sample = |plane: &DMatrix<Float>| {
            let top = (1.0 - dx)*plane[(y_0,x_0)] + dx*plane[(y_0,x_1)];
            let bottom = (1.0 - dx)*plane[(y_1,x_0)] + dx*plane[(y_1,x_1)];
            (1.0 - dy)*top + dy*bottom
        };
        [sample(&self.channels[0]), sample(&self.channels[1]), sample(&self.channels[2])]
    }

    pub fn add(&self, other: &ColorImage) -> ColorImage {
        ColorImage { channels: [&self.channels[0] + &other.channels[0], &self.channels[1] + &other.channels[1], &self.channels[2] + &other.channels[2]] }
    }
}

fn quantize(value: Float) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
