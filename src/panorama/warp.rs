extern crate nalgebra as na;

use na::Matrix3;
use tracing::debug;

use crate::config::WarpParameters;
use crate::error::{StitchError, StitchResult};
use crate::image::color_image::ColorImage;
use crate::image::features::geometry::point::Point;
use crate::numerics::{project_in_front, translation_matrix};
use crate::Float;

/// Slack for inverse mapped coordinates that land a rounding error outside the source.
const SAMPLE_EPS: Float = 1e-6;

/// Where the warped source ends up relative to the destination.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Side {
    Left,
    Right
}

/// Corners are ordered top-left, bottom-left, bottom-right, top-right.
#[derive(Debug,Clone)]
pub struct CanvasGeometry {
    /// Source corners projected into the destination frame.
    pub source_corners: [Point<Float>; 4],
    pub destination_corners: [Point<Float>; 4],
    pub translation: (usize, usize),
    pub width: usize,
    pub height: usize,
    pub side: Side
}

/// Both images on a common canvas of `geometry.width` x `geometry.height`.
#[derive(Debug,Clone)]
pub struct WarpedPair {
    pub source: ColorImage,
    pub destination: ColorImage,
    pub geometry: CanvasGeometry
}

pub fn image_corners(width: usize, height: usize) -> [Point<Float>; 4] {
    let w = width as Float;
    let h = height as Float;
    [Point::new(0.0, 0.0), Point::new(0.0, h), Point::new(w, h), Point::new(w, 0.0)]
}

pub fn canvas_geometry(homography: &Matrix3<Float>, source_size: (usize, usize), destination_size: (usize, usize), runtime_parameters: &WarpParameters) -> StitchResult<CanvasGeometry> {
    let (source_width, source_height) = source_size;
    let (destination_width, destination_height) = destination_size;

    let mut source_corners = image_corners(source_width, source_height);
    for corner in source_corners.iter_mut() {
        *corner = project_in_front(homography, corner).ok_or_else(|| StitchError::warp(format!("source corner ({}, {}) projects at or behind infinity", corner.x, corner.y)))?;
    }
    let destination_corners = image_corners(destination_width, destination_height);

    let all_corners = source_corners.iter().chain(destination_corners.iter());
    let (x_min, y_min, y_max) = all_corners.fold((Float::INFINITY, Float::INFINITY, Float::NEG_INFINITY), |(x_min, y_min, y_max), p| (x_min.min(p.x), y_min.min(p.y), y_max.max(p.y)));
    let x_min = (x_min - 0.5).trunc();
    let y_min = (y_min - 0.5).trunc();
    let y_max = (y_max + 0.5).trunc();

    let max_dimension = runtime_parameters.max_canvas_dimension as Float;
    if -x_min > max_dimension || -y_min > max_dimension || y_max > max_dimension {
        return Err(StitchError::warp(format!("corner bounds x_min {}, y {}..{} exceed {}", x_min, y_min, y_max, max_dimension)));
    }
    // the destination origin is always among the corners, so both are non negative
    let t_x = (-x_min) as usize;
    let t_y = (-y_min) as usize;

    let (side, width) = match source_corners[0].x < 0.0 {
        true => (Side::Left, (destination_width + t_x) as Float),
        false => (Side::Right, source_corners[3].x.trunc())
    };
    let height = y_max - y_min;

    if width < 1.0 || height < 1.0 || width > max_dimension || height > max_dimension {
        return Err(StitchError::warp(format!("canvas {}x{} outside 1..={}", width, height, max_dimension)));
    }

    Ok(CanvasGeometry {
        source_corners,
        destination_corners,
        translation: (t_x, t_y),
        width: width as usize,
        height: height as usize,
        side
    })
}

/// Inverse mapping with bilinear interpolation, pixels mapping outside the source stay zero.
pub fn warp_perspective(source: &ColorImage, homography: &Matrix3<Float>, width: usize, height: usize) -> StitchResult<ColorImage> {
    let inverse = homography.try_inverse().ok_or_else(|| StitchError::warp("translated homography is not invertible"))?;
    let x_max = (source.width() - 1) as Float;
    let y_max = (source.height() - 1) as Float;
    let mut canvas = ColorImage::zeros(width, height);

    for c in 0..width {
        for r in 0..height {
            let sample = match project_in_front(&inverse, &Point::new(c as Float, r as Float)) {
                Some(p) => p,
                None => continue
            };
            if sample.x < -SAMPLE_EPS || sample.y < -SAMPLE_EPS || sample.x > x_max + SAMPLE_EPS || sample.y > y_max + SAMPLE_EPS {
                continue;
            }
            let values = source.bilinear(sample.x.clamp(0.0, x_max), sample.y.clamp(0.0, y_max));
            for (plane, value) in canvas.channels.iter_mut().zip(values.iter()) {
                plane[(r,c)] = *value;
            }
        }
    }

    Ok(canvas)
}

/// Places the warped source and the untouched destination on a shared canvas.
pub fn warp_pair(source: &ColorImage, destination: &ColorImage, homography: &Matrix3<Float>, runtime_parameters: &WarpParameters) -> StitchResult<WarpedPair> {
    let geometry = canvas_geometry(homography, (source.width(), source.height()), (destination.width(), destination.height()), runtime_parameters)?;
    let (t_x, t_y) = geometry.translation;

    let translated = translation_matrix(t_x as Float, t_y as Float)*homography;
    let warped_source = warp_perspective(source, &translated, geometry.width, geometry.height)?;

    let col = match geometry.side {
        Side::Left => t_x,
        Side::Right => 0
    };
    if t_y + destination.height() > geometry.height || col + destination.width() > geometry.width {
        return Err(StitchError::warp(format!("destination {}x{} at ({}, {}) does not fit canvas {}x{}", destination.width(), destination.height(), col, t_y, geometry.width, geometry.height)));
    }
    let mut placed_destination = ColorImage::zeros(geometry.width, geometry.height);
    placed_destination.paste(destination, t_y, col);

    debug!(width = geometry.width, height = geometry.height, side = ?geometry.side, "warped pair");
    Ok(WarpedPair { source: warped_source, destination: placed_destination, geometry })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_destination_frame() {
        let geometry = canvas_geometry(&Matrix3::identity(), (40, 30), (40, 30), &WarpParameters::default()).unwrap();
        assert_eq!(geometry.side, Side::Right);
        assert_eq!((geometry.width, geometry.height), (40, 30));
        assert_eq!(geometry.translation, (0, 0));
    }

    #[test]
    fn source_shifted_left_is_left_side() {
        let geometry = canvas_geometry(&translation_matrix(-20.0, 0.0), (40, 30), (40, 30), &WarpParameters::default()).unwrap();
        assert_eq!(geometry.side, Side::Left);
        assert_eq!(geometry.translation, (20, 0));
        assert_eq!(geometry.width, 60);
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let result = canvas_geometry(&translation_matrix(50_000.0, 0.0), (40, 30), (40, 30), &WarpParameters::default());
        assert!(matches!(result, Err(StitchError::WarpFailure(_))));
    }
}
