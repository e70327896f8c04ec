use tracing::debug;

use crate::config::{MatchingParameters, MIN_MATCHES};
use crate::error::{StitchError, StitchResult};
use crate::image::descriptors::brief_descriptor::DescriptorVector;
use crate::image::features::matches::FeatureMatch;
use crate::Float;

/// The two nearest neighbours of `descriptor` in `others` as (index, distance), closest first.
pub fn two_nearest_neighbours(descriptor: &DescriptorVector, others: &[DescriptorVector]) -> (Option<(usize,Float)>, Option<(usize,Float)>) {
    let mut best: Option<(usize,Float)> = None;
    let mut second: Option<(usize,Float)> = None;

    for (idx, other) in others.iter().enumerate() {
        let distance = (descriptor - other).norm_squared();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {
                if second.map_or(true, |(_, second_distance)| distance < second_distance) {
                    second = Some((idx, distance));
                }
            },
            _ => {
                second = best;
                best = Some((idx, distance));
            }
        }
    }

    (best.map(|(i,d)| (i, d.sqrt())), second.map(|(i,d)| (i, d.sqrt())))
}

/// Brute force k=2 matching followed by Lowe's ratio test.
pub fn ratio_test_matches(source_descriptors: &[DescriptorVector], destination_descriptors: &[DescriptorVector], ratio: Float) -> Vec<FeatureMatch> {
    source_descriptors.iter().enumerate().filter_map(|(source_idx, descriptor)| {
        match two_nearest_neighbours(descriptor, destination_descriptors) {
            (Some((destination_idx, best)), Some((_, second))) if best < ratio*second => Some(FeatureMatch::new(source_idx, destination_idx, best)),
            _ => None
        }
    }).collect()
}

/// Ratio test matches, failing when fewer than `MIN_MATCHES` survive.
pub fn match_features(source_descriptors: &[DescriptorVector], destination_descriptors: &[DescriptorVector], parameters: &MatchingParameters) -> StitchResult<Vec<FeatureMatch>> {
    let best_matches = ratio_test_matches(source_descriptors, destination_descriptors, parameters.ratio);
    debug!(source = source_descriptors.len(), destination = destination_descriptors.len(), matches = best_matches.len(), "ratio test");

    match best_matches.len() {
        found if found < MIN_MATCHES => Err(StitchError::MatchInsufficient { found, required: MIN_MATCHES }),
        _ => Ok(best_matches)
    }
}
