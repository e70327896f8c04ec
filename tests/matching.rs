extern crate panorama;

use rand::prelude::*;
use rand::rngs::SmallRng;

use panorama::config::{MatchingParameters, MIN_MATCHES};
use panorama::image::descriptors::brief_descriptor::DescriptorVector;
use panorama::image::matching::{match_features, ratio_test_matches};
use panorama::{Float, StitchError};

fn random_descriptors(n: usize, seed: u64) -> Vec<DescriptorVector> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| DescriptorVector::from_fn(|_, _| rng.gen_range(0..=255u8) as Float)).collect()
}

#[test]
fn exact_duplicates_are_kept() {
    let descriptors = random_descriptors(20, 1);
    let matches = match_features(&descriptors, &descriptors, &MatchingParameters::default()).unwrap();
    assert_eq!(matches.len(), 20);
    for m in &matches {
        assert_eq!(m.source_idx, m.destination_idx);
        assert_eq!(m.distance, 0.0);
    }
}

#[test]
fn near_ties_are_dropped() {
    let source = random_descriptors(10, 2);
    // every source descriptor has two equally close candidates
    let destination = source.iter().flat_map(|d| {
        let mut a = *d;
        let mut b = *d;
        a[0] += 1.0;
        b[1] += 1.0;
        vec![a, b]
    }).collect::<Vec<DescriptorVector>>();
    assert!(ratio_test_matches(&source, &destination, 0.75).is_empty());
}

#[test]
fn too_few_survivors_are_insufficient() {
    let source = random_descriptors(3, 3);
    let mut destination = source.clone();
    destination.extend(random_descriptors(10, 4));
    match match_features(&source, &destination, &MatchingParameters::default()) {
        Err(StitchError::MatchInsufficient { found, required }) => {
            assert_eq!(found, 3);
            assert_eq!(required, MIN_MATCHES);
        },
        other => panic!("expected MatchInsufficient, got {:?}", other)
    }
}

#[test]
fn empty_destination_is_insufficient() {
    let source = random_descriptors(8, 5);
    assert!(matches!(match_features(&source, &[], &MatchingParameters::default()), Err(StitchError::MatchInsufficient { found: 0, .. })));
}
