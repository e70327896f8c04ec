extern crate image as image_rs;

use image_rs::{Rgb, RgbImage};
use nalgebra::Vector2;

use crate::image::features::{Feature, Oriented, orb_feature::OrbFeature, matches::FeatureMatch};
use crate::Float;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline of a square centered on (`x`,`y`). Pixels outside the image are skipped.
pub fn draw_square(image: &mut RgbImage, x: isize, y: isize, side_length: isize, color: Rgb<u8>) -> () {
    for i in x-side_length..x+side_length+1 {
        put_pixel_checked(image, i, y + side_length, color);
        put_pixel_checked(image, i, y - side_length, color);
    }

    for j in y-side_length+1..y+side_length {
        put_pixel_checked(image, x + side_length, j, color);
        put_pixel_checked(image, x - side_length, j, color);
    }
}

pub fn draw_line(image: &mut RgbImage, start: (Float, Float), end: (Float, Float), color: Rgb<u8>) -> () {
    let steps = (end.0 - start.0).abs().max((end.1 - start.1).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as Float / steps as Float;
        let x = start.0 + t*(end.0 - start.0);
        let y = start.1 + t*(end.1 - start.1);
        put_pixel_checked(image, x.round() as isize, y.round() as isize, color);
    }
}

fn put_pixel_checked(image: &mut RgbImage, x: isize, y: isize, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

/// Squares around every keypoint, sized by octave, with a tick along the orientation.
pub fn draw_keypoints(image: &RgbImage, keypoints: &[OrbFeature]) -> RgbImage {
    let mut target_image = image.clone();
    for keypoint in keypoints {
        let side_length = 2 + keypoint.octave as isize;
        let center = keypoint.get_as_2d_point();
        let orientation = keypoint.get_orientation();
        let tip = center + 2.0*side_length as Float*Vector2::new(orientation.cos(), orientation.sin());
        draw_square(&mut target_image, center.x.round() as isize, center.y.round() as isize, side_length, RED);
        draw_line(&mut target_image, (center.x, center.y), (tip.x, tip.y), RED);
    }
    target_image
}

/// Both images side by side with green lines for the first `max_drawn` matches.
pub fn display_matches(image_a: &RgbImage, image_b: &RgbImage, features_a: &[OrbFeature], features_b: &[OrbFeature], matches: &[FeatureMatch], max_drawn: usize) -> RgbImage {
    let height = image_a.height().max(image_b.height());
    let width = image_a.width() + image_b.width();
    let offset = image_a.width();

    let mut target_image = RgbImage::new(width, height);
    for (x, y, pixel) in image_a.enumerate_pixels() {
        target_image.put_pixel(x, y, *pixel);
    }
    for (x, y, pixel) in image_b.enumerate_pixels() {
        target_image.put_pixel(x + offset, y, *pixel);
    }

    for feature_match in matches.iter().take(max_drawn) {
        let feature_a = &features_a[feature_match.source_idx];
        let feature_b = &features_b[feature_match.destination_idx];

        let start = (feature_a.get_x_image_float(), feature_a.get_y_image_float());
        let end = (offset as Float + feature_b.get_x_image_float(), feature_b.get_y_image_float());
        draw_line(&mut target_image, start, end, GREEN);
    }

    target_image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::features::geometry::point::Point;

    fn feature(x: usize, y: usize) -> OrbFeature {
        OrbFeature { location: Point::new(x as Float, y as Float), octave_location: Point::new(x, y), orientation: 0.0, octave: 0, response: 1.0 }
    }

    #[test]
    fn matches_are_drawn_across_both_images() {
        let a = RgbImage::new(10, 8);
        let b = RgbImage::new(12, 6);
        let canvas = display_matches(&a, &b, &[feature(2, 3)], &[feature(4, 3)], &[FeatureMatch::new(0, 0, 0.0)], 10);
        assert_eq!(canvas.dimensions(), (22, 8));
        assert_eq!(*canvas.get_pixel(2, 3), GREEN);
        assert_eq!(*canvas.get_pixel(14, 3), GREEN);
        assert_eq!(*canvas.get_pixel(8, 3), GREEN);
    }

    #[test]
    fn squares_near_the_border_are_clipped() {
        let image = draw_keypoints(&RgbImage::new(5, 5), &[feature(0, 0)]);
        assert_eq!(*image.get_pixel(2, 2), RED);
        assert_eq!(*image.get_pixel(3, 0), RED);
        assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
    }
}
