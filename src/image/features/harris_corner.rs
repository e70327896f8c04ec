extern crate nalgebra as na;

use na::Matrix2;
use crate::image::Image;
use crate::Float;
use crate::image::features::Feature;


/// Structure tensor summed over a `window_size` block centered on the feature.
pub fn harris_matrix(x_gradient: &Image, y_gradient: &Image, feature: &dyn Feature, window_size: usize) -> Matrix2<Float> {
    let half_window = (window_size/2) as isize;
    let x_center = feature.get_x_image() as isize;
    let y_center = feature.get_y_image() as isize;
    let width = x_gradient.width() as isize;
    let height = x_gradient.height() as isize;

    let mut dxx = 0.0;
    let mut dyy = 0.0;
    let mut dxy = 0.0;
    for y in (y_center-half_window).max(0)..(y_center+half_window+1).min(height) {
        for x in (x_center-half_window).max(0)..(x_center+half_window+1).min(width) {
            let dx = x_gradient.buffer[(y as usize, x as usize)];
            let dy = y_gradient.buffer[(y as usize, x as usize)];
            dxx += dx*dx;
            dyy += dy*dy;
            dxy += dx*dy;
        }
    }

    Matrix2::new(dxx,dxy,
                dxy,dyy)

}

pub fn harris_response(harris_matrix: &Matrix2<Float>, k: Float) -> Float {
    let determinant = harris_matrix.determinant();
    let trace = harris_matrix.trace();
    determinant - k*trace.powi(2)
}

pub fn harris_response_for_feature(x_gradient: &Image, y_gradient: &Image, feature: &dyn Feature, k: Float, window_size: usize) -> Float {
    harris_response(&harris_matrix(x_gradient, y_gradient, feature, window_size), k)
}
