extern crate nalgebra as na;
extern crate panorama;

use na::Matrix3;

use panorama::config::RansacParameters;
use panorama::image::features::geometry::point::Point;
use panorama::image::homography::estimate_homography;
use panorama::numerics::project;
use panorama::{Float, StitchError};

fn affine() -> Matrix3<Float> {
    Matrix3::new(
        1.2, 0.1, 5.0,
        -0.05, 0.9, 3.0,
        0.0, 0.0, 1.0)
}

fn grid(n: usize, spacing: Float) -> Vec<Point<Float>> {
    (0..n*n).map(|i| Point::new((i % n) as Float * spacing + 3.0, (i / n) as Float * spacing + 7.0)).collect()
}

fn assert_close(a: &Matrix3<Float>, b: &Matrix3<Float>, eps: Float) {
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < eps, "{} vs {}\n{}\n{}", x, y, a, b);
    }
}

#[test]
fn four_exact_correspondences_recover_the_transform() {
    let h = affine();
    let source = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 80.0), Point::new(0.0, 80.0)];
    let destination = source.iter().map(|p| project(&h, p).unwrap()).collect::<Vec<_>>();

    let estimate = estimate_homography(&source, &destination, &RansacParameters::default()).unwrap();
    assert_eq!(estimate.inlier_count(), 4);
    assert_eq!(estimate.matrix[(2,2)], 1.0);
    assert_close(&estimate.matrix, &h, 1e-6);
}

#[test]
fn gross_outliers_are_flagged() {
    let h = affine();
    let source = grid(6, 20.0);
    let mut destination = source.iter().map(|p| project(&h, p).unwrap()).collect::<Vec<_>>();
    let outliers = [3usize, 11, 17, 28];
    for &i in &outliers {
        destination[i].x += 60.0;
        destination[i].y -= 45.0;
    }

    let estimate = estimate_homography(&source, &destination, &RansacParameters::default()).unwrap();
    for (i, inlier) in estimate.inlier_mask.iter().enumerate() {
        assert_eq!(*inlier, !outliers.contains(&i), "correspondence {}", i);
    }
    assert_close(&estimate.matrix, &h, 1e-6);
}

#[test]
fn collinear_points_fail() {
    let source = (0..10).map(|i| Point::new(i as Float * 10.0, i as Float * 5.0)).collect::<Vec<_>>();
    let destination = source.iter().map(|p| Point::new(p.x + 4.0, p.y)).collect::<Vec<_>>();
    let result = estimate_homography(&source, &destination, &RansacParameters::default());
    assert!(matches!(result, Err(StitchError::EstimationFailure(_))));
}

#[test]
fn three_points_fail() {
    let source = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
    let result = estimate_homography(&source, &source, &RansacParameters::default());
    assert!(matches!(result, Err(StitchError::EstimationFailure(_))));
}

#[test]
fn estimation_is_reproducible() {
    let h = affine();
    let source = grid(5, 15.0);
    let mut destination = source.iter().map(|p| project(&h, p).unwrap()).collect::<Vec<_>>();
    destination[4].x += 30.0;
    let params = RansacParameters::default();
    let a = estimate_homography(&source, &destination, &params).unwrap();
    let b = estimate_homography(&source, &destination, &params).unwrap();
    assert_eq!(a.matrix, b.matrix);
    assert_eq!(a.inlier_mask, b.inlier_mask);
}
