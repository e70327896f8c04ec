extern crate nalgebra as na;

use na::{DMatrix, Matrix3};
use rand::prelude::*;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::config::RansacParameters;
use crate::error::{StitchError, StitchResult};
use crate::image::features::geometry::point::Point;
use crate::numerics::project;
use crate::{Float, float};

/// Correspondences needed for a minimal model.
pub const SAMPLE_SIZE: usize = 4;
const COLLINEARITY_EPS: Float = 1e-6;

/// Plane to plane mapping from source to destination pixel coordinates, normalized so that `matrix[(2,2)] == 1`.
#[derive(Debug,Clone)]
pub struct Homography {
    pub matrix: Matrix3<Float>,
    /// One flag per correspondence handed to the estimator.
    pub inlier_mask: Vec<bool>
}

impl Homography {
    pub fn inlier_count(&self) -> usize {
        self.inlier_mask.iter().filter(|&&b| b).count()
    }
}

/**
 * Similarity moving the centroid to the origin with a mean distance of sqrt(2).
 * Multiple View Geometry p.107
 */
pub fn hartley_normalization(points: &[Point<Float>]) -> Matrix3<Float> {
    let n = points.len().max(1) as Float;
    let cx = points.iter().map(|p| p.x).sum::<Float>() / n;
    let cy = points.iter().map(|p| p.y).sum::<Float>() / n;
    let mean_distance = points.iter().map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()).sum::<Float>() / n;
    let s = match mean_distance > float::EPSILON {
        true => (2.0 as Float).sqrt() / mean_distance,
        false => 1.0
    };

    Matrix3::<Float>::new(
        s, 0.0, -s*cx,
        0.0, s, -s*cy,
        0.0, 0.0, 1.0)
}

fn apply(transform: &Matrix3<Float>, point: &Point<Float>) -> Point<Float> {
    Point::new(
        transform[(0,0)]*point.x + transform[(0,1)]*point.y + transform[(0,2)],
        transform[(1,0)]*point.x + transform[(1,1)]*point.y + transform[(1,2)])
}

/// Normalized direct linear transform on at least four correspondences.
#[allow(non_snake_case)]
pub fn direct_linear_transform(source_points: &[Point<Float>], destination_points: &[Point<Float>]) -> Option<Matrix3<Float>> {
    let n = source_points.len().min(destination_points.len());
    if n < SAMPLE_SIZE {
        return None;
    }

    let T_src = hartley_normalization(&source_points[..n]);
    let T_dst = hartley_normalization(&destination_points[..n]);

    // padded with zero rows so the right singular vectors span the full space
    let mut A = DMatrix::<Float>::zeros((2*n).max(9), 9);
    for i in 0..n {
        let s = apply(&T_src, &source_points[i]);
        let d = apply(&T_dst, &destination_points[i]);
        let r = 2*i;
        A[(r,0)] = -s.x; A[(r,1)] = -s.y; A[(r,2)] = -1.0;
        A[(r,6)] = d.x*s.x; A[(r,7)] = d.x*s.y; A[(r,8)] = d.x;
        A[(r+1,3)] = -s.x; A[(r+1,4)] = -s.y; A[(r+1,5)] = -1.0;
        A[(r+1,6)] = d.y*s.x; A[(r+1,7)] = d.y*s.y; A[(r+1,8)] = d.y;
    }

    let svd = A.svd(false, true);
    let v_t = svd.v_t?;
    let h = v_t.row(svd.singular_values.imin());
    let H_normalized = Matrix3::<Float>::new(
        h[0], h[1], h[2],
        h[3], h[4], h[5],
        h[6], h[7], h[8]);

    let H = T_dst.try_inverse()? * H_normalized * T_src;
    normalize(&H)
}

fn normalize(matrix: &Matrix3<Float>) -> Option<Matrix3<Float>> {
    let w = matrix[(2,2)];
    if w.abs() <= float::EPSILON || !w.is_finite() {
        return None;
    }
    let normalized = matrix / w;
    match normalized.iter().all(|v| v.is_finite()) && normalized.determinant().abs() > float::EPSILON {
        true => Some(normalized),
        false => None
    }
}

fn cross(a: &Point<Float>, b: &Point<Float>, c: &Point<Float>) -> Float {
    (b.x - a.x)*(c.y - a.y) - (b.y - a.y)*(c.x - a.x)
}

/// Rejects minimal samples with a collinear triple or a triangle that flips orientation between the views.
pub fn is_valid_sample(source_points: &[Point<Float>], destination_points: &[Point<Float>]) -> bool {
    const TRIPLES: [(usize,usize,usize); 4] = [(0,1,2),(0,1,3),(0,2,3),(1,2,3)];
    TRIPLES.iter().all(|&(i,j,k)| {
        let cross_src = cross(&source_points[i], &source_points[j], &source_points[k]);
        let cross_dst = cross(&destination_points[i], &destination_points[j], &destination_points[k]);
        cross_src.abs() >= COLLINEARITY_EPS && cross_dst.abs() >= COLLINEARITY_EPS && cross_src.signum() == cross_dst.signum()
    })
}

pub fn reprojection_error(matrix: &Matrix3<Float>, source: &Point<Float>, destination: &Point<Float>) -> Float {
    match project(matrix, source) {
        Some(p) => p.distance(destination),
        None => float::INFINITY
    }
}

fn inliers(matrix: &Matrix3<Float>, source_points: &[Point<Float>], destination_points: &[Point<Float>], threshold: Float) -> Vec<bool> {
    source_points.iter().zip(destination_points.iter()).map(|(s,d)| reprojection_error(matrix, s, d) <= threshold).collect()
}

/// Iterations needed to draw an all inlier sample with `confidence`, capped at `max_iterations`.
pub fn required_iterations(confidence: Float, inlier_ratio: Float, max_iterations: usize) -> usize {
    let num = (1.0 - confidence).max(Float::MIN_POSITIVE);
    let denom = 1.0 - inlier_ratio.powi(SAMPLE_SIZE as i32);
    if denom < Float::MIN_POSITIVE {
        return 0;
    }

    let num = num.ln();
    let denom = denom.ln();
    match denom >= 0.0 || -num >= max_iterations as Float * -denom {
        true => max_iterations,
        false => (num/denom).round() as usize
    }
}

/// RANSAC over minimal four point samples, refitted on the final consensus set.
pub fn estimate_homography(source_points: &[Point<Float>], destination_points: &[Point<Float>], runtime_parameters: &RansacParameters) -> StitchResult<Homography> {
    let n = source_points.len();
    if n != destination_points.len() {
        return Err(StitchError::estimation(format!("point count mismatch {} vs {}", n, destination_points.len())));
    }
    if n < SAMPLE_SIZE {
        return Err(StitchError::estimation(format!("{} correspondences, at least {} needed", n, SAMPLE_SIZE)));
    }

    let mut rng = SmallRng::seed_from_u64(runtime_parameters.seed);
    let indices = (0..n).collect::<Vec<usize>>();
    let threshold = runtime_parameters.inlier_threshold;

    let mut best: Option<(Matrix3<Float>, Vec<bool>, usize)> = None;
    let mut max_it = runtime_parameters.max_iterations;
    let mut it = 0;
    while it < max_it {
        it += 1;
        let sample = indices.choose_multiple(&mut rng, SAMPLE_SIZE).copied().collect::<Vec<usize>>();
        let sample_src = sample.iter().map(|&i| source_points[i]).collect::<Vec<Point<Float>>>();
        let sample_dst = sample.iter().map(|&i| destination_points[i]).collect::<Vec<Point<Float>>>();
        if !is_valid_sample(&sample_src, &sample_dst) {
            continue;
        }

        let h = match direct_linear_transform(&sample_src, &sample_dst) {
            Some(h) => h,
            None => continue
        };
        let mask = inliers(&h, source_points, destination_points, threshold);
        let count = mask.iter().filter(|&&b| b).count();
        if best.as_ref().map_or(true, |(_, _, best_count)| count > *best_count) {
            max_it = required_iterations(runtime_parameters.confidence, count as Float / n as Float, runtime_parameters.max_iterations).max(it);
            best = Some((h, mask, count));
        }
    }

    let (h, mask, count) = best.ok_or_else(|| StitchError::estimation("no valid minimal sample found"))?;
    if count < SAMPLE_SIZE {
        return Err(StitchError::estimation(format!("{} inliers, at least {} needed", count, SAMPLE_SIZE)));
    }

    let inlier_src = source_points.iter().zip(mask.iter()).filter(|&(_, &m)| m).map(|(p, _)| *p).collect::<Vec<Point<Float>>>();
    let inlier_dst = destination_points.iter().zip(mask.iter()).filter(|&(_, &m)| m).map(|(p, _)| *p).collect::<Vec<Point<Float>>>();
    let (matrix, inlier_mask) = match direct_linear_transform(&inlier_src, &inlier_dst) {
        Some(refined) => {
            let refined_mask = inliers(&refined, source_points, destination_points, threshold);
            match refined_mask.iter().filter(|&&b| b).count() >= count {
                true => (refined, refined_mask),
                false => (h, mask)
            }
        },
        None => (h, mask)
    };

    let homography = Homography { matrix, inlier_mask };
    debug!(iterations = it, correspondences = n, inliers = homography.inlier_count(), "ransac homography");
    Ok(homography)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_centers_points() {
        let points = vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(20.0, 20.0), Point::new(10.0, 20.0)];
        let t = hartley_normalization(&points);
        let transformed = points.iter().map(|p| apply(&t, p)).collect::<Vec<_>>();
        let cx = transformed.iter().map(|p| p.x).sum::<Float>();
        let cy = transformed.iter().map(|p| p.y).sum::<Float>();
        assert!(cx.abs() < 1e-9 && cy.abs() < 1e-9);
        let mean = transformed.iter().map(|p| (p.x*p.x + p.y*p.y).sqrt()).sum::<Float>() / 4.0;
        assert!((mean - (2.0 as Float).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn iterations_shrink_with_inlier_ratio() {
        assert_eq!(required_iterations(0.995, 0.0, 2000), 2000);
        assert_eq!(required_iterations(0.995, 1.0, 2000), 0);
        assert!(required_iterations(0.995, 0.9, 2000) < required_iterations(0.995, 0.5, 2000));
    }

    #[test]
    fn flipped_triangle_is_rejected() {
        let src = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0), Point::new(0.0, 10.0)];
        let mirrored = src.iter().map(|p| Point::new(-p.x, p.y)).collect::<Vec<_>>();
        assert!(is_valid_sample(&src, &src));
        assert!(!is_valid_sample(&src, &mirrored));
    }
}
