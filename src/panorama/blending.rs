extern crate nalgebra as na;

use na::{DMatrix, DVector};
use tracing::debug;

use crate::config::SMOOTHING_WINDOW_DIVISOR;
use crate::image::color_image::ColorImage;
use crate::numerics::linspace;
use crate::panorama::warp::Side;
use crate::Float;

/// How the transition was laid out on a canvas of a given width.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum RampPolicy {
    /// Linear ramp over the `len` columns starting at `start`, both biases share it.
    Full { start: usize, len: usize },
    /// One column shorter than the full ramp, used when the full ramp overruns the canvas.
    Shortened { start: usize, len: usize },
    /// Hard switch at column `barrier`.
    Step { barrier: usize }
}

/// Seam position for a destination of `destination_width` columns, as (barrier, offset).
pub fn seam_parameters(destination_width: usize) -> (usize, usize) {
    let smoothing_window = destination_width / SMOOTHING_WINDOW_DIVISOR;
    let offset = smoothing_window / 2;
    (destination_width - offset, offset)
}

pub fn ramp_policy(width: usize, barrier: usize, offset: usize) -> RampPolicy {
    let start = barrier.checked_sub(offset);
    match start {
        Some(start) if barrier < width && barrier + offset < width => RampPolicy::Full { start, len: 2*offset + 1 },
        Some(start) if barrier < width && offset > 0 && barrier + offset <= width => RampPolicy::Shortened { start, len: 2*offset },
        _ => RampPolicy::Step { barrier: barrier.min(width) }
    }
}

/// Column weights of one bias, the right bias is the exact complement of the left one.
pub fn blending_mask(width: usize, policy: RampPolicy, left_biased: bool) -> DVector<Float> {
    let left_mask = match policy {
        RampPolicy::Full { start, len } | RampPolicy::Shortened { start, len } => {
            let ramp = linspace(1.0, 0.0, len);
            DVector::<Float>::from_fn(width, |c, _| match c {
                c if c < start => 1.0,
                c if c < start + len => ramp[c - start],
                _ => 0.0
            })
        },
        RampPolicy::Step { barrier } => DVector::<Float>::from_fn(width, |c, _| if c < barrier { 1.0 } else { 0.0 })
    };

    match left_biased {
        true => left_mask,
        false => left_mask.map(|v| 1.0 - v)
    }
}

fn tile(mask: &DVector<Float>, height: usize) -> DMatrix<Float> {
    DMatrix::<Float>::from_fn(height, mask.len(), |_, c| mask[c])
}

/// The two masked canvases of a blend, still separate. Their sum is the blended canvas.
#[derive(Debug,Clone)]
pub struct BlendParts {
    pub destination_side: ColorImage,
    pub source_side: ColorImage,
    pub policy: RampPolicy
}

impl BlendParts {
    pub fn combined(&self) -> ColorImage {
        self.destination_side.add(&self.source_side)
    }
}

/// Weighs the placed destination and the warped source with complementary seam masks.
pub fn blend_parts(source: &ColorImage, destination: &ColorImage, destination_width: usize, side: Side) -> BlendParts {
    let width = destination.width();
    let height = destination.height();
    let (barrier, offset) = seam_parameters(destination_width);
    let policy = ramp_policy(width, barrier, offset);
    match policy {
        RampPolicy::Full { .. } => (),
        _ => debug!(?policy, width, barrier, offset, "seam ramp fallback")
    };

    let mask_left = tile(&blending_mask(width, policy, true), height);
    let mask_right = tile(&blending_mask(width, policy, false), height);

    let (destination_side, source_side) = match side {
        Side::Left => (
            destination.flip_horizontal().weighted(&mask_left).flip_horizontal(),
            source.flip_horizontal().weighted(&mask_right).flip_horizontal()
        ),
        Side::Right => (destination.weighted(&mask_left), source.weighted(&mask_right))
    };

    BlendParts { destination_side, source_side, policy }
}

/// Feathers the seam between the placed destination and the warped source.
pub fn blend(source: &ColorImage, destination: &ColorImage, destination_width: usize, side: Side) -> ColorImage {
    blend_parts(source, destination, destination_width, side).combined()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seam_sits_inside_the_destination() {
        assert_eq!(seam_parameters(400), (375, 25));
        assert_eq!(seam_parameters(7), (7, 0));
    }

    #[test]
    fn full_ramp_layout() {
        let policy = ramp_policy(100, 40, 5);
        assert_eq!(policy, RampPolicy::Full { start: 35, len: 11 });
        let mask = blending_mask(100, policy, true);
        assert_eq!(mask[34], 1.0);
        assert_eq!(mask[35], 1.0);
        assert!((mask[40] - 0.5).abs() < 1e-12);
        assert_eq!(mask[45], 0.0);
        assert_eq!(mask[99], 0.0);
    }

    #[test]
    fn fallbacks_when_the_ramp_overruns() {
        assert_eq!(ramp_policy(45, 40, 5), RampPolicy::Shortened { start: 35, len: 10 });
        assert_eq!(ramp_policy(40, 40, 5), RampPolicy::Step { barrier: 40 });
        assert_eq!(ramp_policy(20, 40, 5), RampPolicy::Step { barrier: 20 });
    }
}
