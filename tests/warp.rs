extern crate image as image_rs;
extern crate nalgebra as na;
extern crate panorama;

mod common;

use na::Matrix3;

use panorama::config::WarpParameters;
use panorama::image::color_image::ColorImage;
use panorama::numerics::translation_matrix;
use panorama::panorama::{blending::blend, crop::crop, warp::{canvas_geometry, warp_pair, Side}};
use panorama::StitchError;

#[test]
fn identity_warp_round_trips_through_blend_and_crop() {
    let scene = common::synthetic_scene(120, 80, 20, common::SCENE_SEED);
    let image = ColorImage::from_rgb_image(&scene);

    let warped = warp_pair(&image, &image, &Matrix3::identity(), &WarpParameters::default()).unwrap();
    assert_eq!((warped.geometry.width, warped.geometry.height), (120, 80));
    assert_eq!(warped.geometry.side, Side::Right);
    assert_eq!(warped.source.to_rgb_image(), scene);

    let blended = blend(&warped.source, &warped.destination, image.width(), warped.geometry.side);
    let cropped = crop(&blended, &warped.geometry, image.height()).unwrap();
    assert_eq!(cropped.to_rgb_image(), scene);
}

#[test]
fn translated_source_extends_the_canvas_to_the_left() {
    let scene = common::synthetic_scene(100, 60, 15, common::SCENE_SEED);
    let image = ColorImage::from_rgb_image(&scene);

    let warped = warp_pair(&image, &image, &translation_matrix(-40.0, 0.0), &WarpParameters::default()).unwrap();
    assert_eq!(warped.geometry.side, Side::Left);
    assert_eq!(warped.geometry.translation, (40, 0));
    assert_eq!(warped.geometry.width, 140);

    // the warped source starts at the canvas origin, the destination 40 columns in
    let source_rgb = warped.source.to_rgb_image();
    let destination_rgb = warped.destination.to_rgb_image();
    assert_eq!(source_rgb.get_pixel(0, 10), scene.get_pixel(0, 10));
    assert_eq!(destination_rgb.get_pixel(40, 10), scene.get_pixel(0, 10));
    assert_eq!(*destination_rgb.get_pixel(39, 10), image_rs::Rgb([0, 0, 0]));

    let blended = blend(&warped.source, &warped.destination, image.width(), warped.geometry.side);
    let cropped = crop(&blended, &warped.geometry, image.height()).unwrap();
    assert_eq!((cropped.width(), cropped.height()), (140, 60));
}

#[test]
fn projection_to_infinity_is_a_warp_failure() {
    let image = ColorImage::zeros(50, 40);
    let h = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, -1.0/40.0, 1.0);
    let result = warp_pair(&image, &image, &h, &WarpParameters::default());
    assert!(matches!(result, Err(StitchError::WarpFailure(_))));
}

#[test]
fn corners_beyond_the_horizon_are_a_warp_failure() {
    // the horizon line y = 30 crosses the 40 row source, so the bottom corners have w < 0
    let image = ColorImage::zeros(50, 40);
    let h = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, -1.0/30.0, 1.0);
    assert!(matches!(canvas_geometry(&h, (50, 40), (50, 40), &WarpParameters::default()), Err(StitchError::WarpFailure(_))));
    assert!(matches!(warp_pair(&image, &image, &h, &WarpParameters::default()), Err(StitchError::WarpFailure(_))));
}

#[test]
fn canvas_limit_is_enforced() {
    let image = ColorImage::zeros(50, 40);
    let result = warp_pair(&image, &image, &translation_matrix(0.0, 500.0), &WarpParameters { max_canvas_dimension: 300 });
    assert!(matches!(result, Err(StitchError::WarpFailure(_))));
}
