extern crate panorama;

mod common;

use panorama::image::color_image::ColorImage;
use panorama::image::features::Feature;
use panorama::image::matching::match_features;
use panorama::image::pyramid::orb::FeatureExtractor;
use panorama::config::MatchingParameters;
use panorama::StitchConfig;

#[test]
fn keypoints_lie_inside_the_image() {
    let config = StitchConfig::default();
    let extractor = FeatureExtractor::new(&config.orb);
    let scene = common::synthetic_scene(300, 200, 80, common::SCENE_SEED);
    let features = extractor.extract(&ColorImage::from_rgb_image(&scene));

    assert!(!features.is_empty());
    assert!(features.len() <= config.orb.max_features);
    assert_eq!(features.keypoints.len(), features.descriptors.len());
    for keypoint in &features.keypoints {
        assert!(keypoint.get_x_image_float() >= 0.0 && keypoint.get_x_image_float() < 300.0);
        assert!(keypoint.get_y_image_float() >= 0.0 && keypoint.get_y_image_float() < 200.0);
        assert!(keypoint.orientation >= 0.0 && keypoint.orientation < 2.0*std::f64::consts::PI);
    }
}

#[test]
fn extraction_is_deterministic() {
    let extractor = FeatureExtractor::new(&StitchConfig::default().orb);
    let image = ColorImage::from_rgb_image(&common::synthetic_scene(200, 160, 50, 3));
    let a = extractor.extract(&image);
    let b = extractor.extract(&image);
    assert_eq!(a.len(), b.len());
    assert_eq!(a.descriptors, b.descriptors);
}

#[test]
fn shifted_views_share_matches() {
    let pans = common::default_pans();
    let extractor = FeatureExtractor::new(&StitchConfig::default().orb);
    let left = extractor.extract(&ColorImage::from_rgb_image(&pans[0]));
    let right = extractor.extract(&ColorImage::from_rgb_image(&pans[1]));
    let matches = match_features(&left.descriptor_vectors(), &right.descriptor_vectors(), &MatchingParameters::default()).unwrap();

    // the pans are 150 columns apart, a good share of the matches must agree with that shift
    let consistent = matches.iter().filter(|m| {
        let a = &left.keypoints[m.source_idx].location;
        let b = &right.keypoints[m.destination_idx].location;
        ((a.x - b.x) - 150.0).abs() < 3.0 && (a.y - b.y).abs() < 3.0
    }).count();
    assert!(consistent >= 8, "{} of {} matches consistent", consistent, matches.len());
}
