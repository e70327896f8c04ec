extern crate nalgebra as na;

use na::{Matrix2, Matrix3, Vector3};
use crate::image::features::geometry::point::Point;
use crate::Float;

pub fn rotation_matrix_2d_from_orientation(orientation: Float) -> Matrix2<Float> {

    Matrix2::new(orientation.cos(), -orientation.sin(),
                orientation.sin(), orientation.cos())

}

/// `n` evenly spaced samples from `start` to `end`, both included.
pub fn linspace(start: Float, end: Float, n: usize) -> Vec<Float> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start)/((n - 1) as Float);
            (0..n).map(|i| start + step*(i as Float)).collect()
        }
    }
}

/// Projective mapping of a point. None if it lands at or beyond infinity.
pub fn project(homography: &Matrix3<Float>, point: &Point<Float>) -> Option<Point<Float>> {
    let projected = homography*Vector3::new(point.x, point.y, 1.0);
    let w = projected[2];
    if !w.is_finite() || w.abs() <= Float::EPSILON {
        return None;
    }
    let result = Point::new(projected[0]/w, projected[1]/w);
    match result.is_finite() {
        true => Some(result),
        false => None
    }
}

/// Like `project`, but also rejects points mapped behind the image plane (w < 0), which a
/// perspective division would mirror through the origin.
pub fn project_in_front(homography: &Matrix3<Float>, point: &Point<Float>) -> Option<Point<Float>> {
    let w = (homography*Vector3::new(point.x, point.y, 1.0))[2];
    match w > Float::EPSILON {
        true => project(homography, point),
        false => None
    }
}

pub fn translation_matrix(t_x: Float, t_y: Float) -> Matrix3<Float> {
    Matrix3::new(1.0, 0.0, t_x,
                 0.0, 1.0, t_y,
                 0.0, 0.0, 1.0)
}
