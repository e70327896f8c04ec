extern crate image as image_rs;

use image_rs::RgbImage;
use tracing::{debug, info};

use crate::config::StitchConfig;
use crate::error::{StitchError, StitchResult};
use crate::image::color_image::ColorImage;
use crate::image::features::geometry::point::Point;
use crate::image::homography::{estimate_homography, Homography};
use crate::image::matching::match_features;
use crate::image::pyramid::orb::{FeatureExtractor, FeatureSet};
use crate::image::features::matches::FeatureMatch;
use crate::Float;
use self::blending::BlendParts;
use self::warp::WarpedPair;

pub mod blending;
pub mod crop;
pub mod warp;

/// Everything computed while aligning one pair, kept for inspection and visualisation.
#[derive(Debug,Clone)]
pub struct PairAlignment {
    pub source_features: FeatureSet,
    pub destination_features: FeatureSet,
    pub matches: Vec<FeatureMatch>,
    pub homography: Homography
}

impl PairAlignment {
    /// Matches that survived RANSAC.
    pub fn inlier_matches(&self) -> Vec<FeatureMatch> {
        self.matches.iter().zip(self.homography.inlier_mask.iter()).filter(|&(_, &inlier)| inlier).map(|(m, _)| *m).collect()
    }
}

/// Features, ratio test matches and the RANSAC homography mapping `source` onto `destination`.
pub fn align_pair(extractor: &FeatureExtractor, source: &ColorImage, destination: &ColorImage, config: &StitchConfig) -> StitchResult<PairAlignment> {
    let source_features = extractor.extract(source);
    let destination_features = extractor.extract(destination);
    let matches = match_features(&source_features.descriptor_vectors(), &destination_features.descriptor_vectors(), &config.matching)?;

    let source_points = matches.iter().map(|m| source_features.keypoints[m.source_idx].location).collect::<Vec<Point<Float>>>();
    let destination_points = matches.iter().map(|m| destination_features.keypoints[m.destination_idx].location).collect::<Vec<Point<Float>>>();
    let homography = estimate_homography(&source_points, &destination_points, &config.ransac)?;

    Ok(PairAlignment { source_features, destination_features, matches, homography })
}

/// Intermediate results of one pairwise stitch.
#[derive(Debug,Clone)]
pub struct PairStitchSteps {
    pub alignment: PairAlignment,
    pub warped: WarpedPair,
    pub blend: BlendParts,
    pub panorama: ColorImage
}

impl PairStitchSteps {
    /// Both canvases summed without seam masks.
    pub fn non_blended(&self) -> ColorImage {
        self.warped.source.add(&self.warped.destination)
    }
}

pub fn stitch_pair_steps(extractor: &FeatureExtractor, source: &ColorImage, destination: &ColorImage, config: &StitchConfig) -> StitchResult<PairStitchSteps> {
    let alignment = align_pair(extractor, source, destination, config)?;
    let warped = warp::warp_pair(source, destination, &alignment.homography.matrix, &config.warp)?;
    let blend = blending::blend_parts(&warped.source, &warped.destination, destination.width(), warped.geometry.side);
    let panorama = crop::crop(&blend.combined(), &warped.geometry, destination.height())?;

    info!(
        matches = alignment.matches.len(),
        inliers = alignment.homography.inlier_count(),
        side = ?warped.geometry.side,
        width = panorama.width(),
        height = panorama.height(),
        "stitched pair");
    Ok(PairStitchSteps { alignment, warped, blend, panorama })
}

// every intermediate panorama is quantised to 8 bit before it is matched again
fn stitch_quantized(extractor: &FeatureExtractor, source: &RgbImage, destination: &RgbImage, config: &StitchConfig) -> StitchResult<RgbImage> {
    let steps = stitch_pair_steps(extractor, &ColorImage::from_rgb_image(source), &ColorImage::from_rgb_image(destination), config)?;
    Ok(steps.panorama.to_rgb_image())
}

/// Warps `source` into the frame of `destination` and returns the blended, cropped result.
#[tracing::instrument(skip_all, fields(source = ?source.dimensions(), destination = ?destination.dimensions()))]
pub fn stitch_pair(source: &RgbImage, destination: &RgbImage, config: &StitchConfig) -> StitchResult<RgbImage> {
    config.validate()?;
    let extractor = FeatureExtractor::new(&config.orb);
    stitch_quantized(&extractor, source, destination, config)
}

/// Orders the two half panoramas as (source, destination): the wider one is the destination,
/// on equal widths the left panorama is the source.
pub fn merge_order<'a>(left_panorama: &'a RgbImage, right_panorama: &'a RgbImage) -> (&'a RgbImage, &'a RgbImage) {
    match right_panorama.width() >= left_panorama.width() {
        true => (left_panorama, right_panorama),
        false => (right_panorama, left_panorama)
    }
}

/// Right fold: the last image is the first destination, each earlier image is warped onto the running result.
fn reduce_half(extractor: &FeatureExtractor, images: &[&RgbImage], config: &StitchConfig) -> StitchResult<RgbImage> {
    let (last, rest) = images.split_last().ok_or(StitchError::EmptySequence)?;
    rest.iter().rev().try_fold((*last).clone(), |destination, source| stitch_quantized(extractor, source, &destination, config))
}

/// Stitches an ordered left to right sequence outward from its middle image.
#[tracing::instrument(skip_all, fields(images = images.len()))]
pub fn build_panorama(images: &[RgbImage], config: &StitchConfig) -> StitchResult<RgbImage> {
    config.validate()?;
    match images.len() {
        0 => return Err(StitchError::EmptySequence),
        1 => return Ok(images[0].clone()),
        _ => ()
    };

    let size = (images.len() + 1) / 2;
    let left = images[..size].iter().collect::<Vec<&RgbImage>>();
    let right = images[size-1..].iter().rev().collect::<Vec<&RgbImage>>();
    debug!(left = left.len(), right = right.len(), "split sequence");

    let extractor = FeatureExtractor::new(&config.orb);
    if left.len() == 1 {
        return reduce_half(&extractor, &right, config);
    }

    let (left_panorama, right_panorama) = match config.parallel_halves {
        true => rayon::join(|| reduce_half(&extractor, &left, config), || reduce_half(&extractor, &right, config)),
        false => (reduce_half(&extractor, &left, config), reduce_half(&extractor, &right, config))
    };
    let left_panorama = left_panorama?;
    let right_panorama = right_panorama?;

    let (source, destination) = merge_order(&left_panorama, &right_panorama);
    let panorama = stitch_quantized(&extractor, source, destination, config)?;
    info!(width = panorama.width(), height = panorama.height(), "panorama complete");
    Ok(panorama)
}
