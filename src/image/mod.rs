extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;

pub mod color_image;
pub mod descriptors;
pub mod features;
pub mod filter;
pub mod homography;
pub mod matching;
pub mod pyramid;

/// Single channel intensity image with values in [0,255], indexed (row,col) = (y,x).
#[derive(Debug,Clone)]
pub struct Image {
    pub buffer: DMatrix<Float>
}

impl Image {

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn empty(width: usize, height: usize) -> Image {
        Image{ buffer: DMatrix::<Float>::zeros(height,width) }
    }

    pub fn from_matrix(matrix: DMatrix<Float>) -> Image {
        Image{ buffer: matrix }
    }

    /// Bilinear resample to `new_width` x `new_height`, pixel centers aligned like OpenCV's INTER_LINEAR.
    pub fn resize(&self, new_width: usize, new_height: usize) -> Image {
        let width = self.width();
        let height = self.height();
        let x_ratio = width as Float / new_width as Float;
        let y_ratio = height as Float / new_height as Float;

        let buffer = DMatrix::<Float>::from_fn(new_height, new_width, |r,c| {
            let x = ((c as Float + 0.5)*x_ratio - 0.5).max(0.0);
            let y = ((r as Float + 0.5)*y_ratio - 0.5).max(0.0);
            self.bilinear(x, y)
        });

        Image{ buffer }
    }

    /// Samples at a sub-pixel location, clamping the interpolation support to the image.
    pub fn bilinear(&self, x: Float, y: Float) -> Float {
        let x_max = self.width() - 1;
        let y_max = self.height() - 1;
        let x_0 = (x.trunc() as usize).min(x_max);
        let y_0 = (y.trunc() as usize).min(y_max);
        let x_1 = (x_0 + 1).min(x_max);
        let y_1 = (y_0 + 1).min(y_max);
        let dx = x - x_0 as Float;
        let dy = y - y_0 as Float;

        let top = (1.0 - dx)*self.buffer[(y_0,x_0)] + dx*self.buffer[(y_0,x_1)];
        let bottom = (1.0 - dx)*self.buffer[(y_1,x_0)] + dx*self.buffer[(y_1,x_1)];
        (1.0 - dy)*top + dy*bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_keeps_constant_images_constant() {
        let image = Image::from_matrix(DMatrix::<Float>::from_element(12, 20, 42.0));
        let resized = image.resize(16, 10);
        assert_eq!(resized.width(), 16);
        assert_eq!(resized.height(), 10);
        assert!(resized.buffer.iter().all(|&v| (v - 42.0).abs() < 1e-9));
    }

    #[test]
    fn bilinear_interpolates_between_neighbours() {
        let image = Image::from_matrix(DMatrix::<Float>::from_row_slice(1, 2, &[0.0, 100.0]));
        assert!((image.bilinear(0.25, 0.0) - 25.0).abs() < 1e-9);
        assert!((image.bilinear(1.0, 0.0) - 100.0).abs() < 1e-9);
    }
}
