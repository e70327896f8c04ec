use nalgebra::DMatrix;

use crate::image::features::{Feature, geometry::{point::Point, offset::Offset, circle::circle_bresenham}};
use crate::image::Image;
use crate::Float;

/// Corner found by the FAST segment test on one octave image.
#[derive(Debug,Clone,Copy)]
pub struct FastFeature {
    pub location: Point<usize>,
    pub score: Float
}

impl Feature for FastFeature {
    fn get_x_image_float(&self) -> Float { self.location.x as Float }
    fn get_y_image_float(&self) -> Float { self.location.y as Float }
    fn get_x_image(&self) -> usize { self.location.x }
    fn get_y_image(&self) -> usize { self.location.y }
}

/// Segment test detector, the ring is computed once and reused for every pixel.
pub struct FastDetector {
    continuous_offsets: Vec<Offset>,
    threshold: Float,
    consecutive_pixels: usize
}

impl FastDetector {

    pub fn new(radius: usize, threshold: Float, consecutive_pixels: usize) -> FastDetector {
        let continuous_offsets = circle_bresenham(radius);
        let consecutive_pixels = consecutive_pixels.min(continuous_offsets.len());
        FastDetector { continuous_offsets, threshold, consecutive_pixels }
    }

    pub fn radius(&self) -> usize {
        self.continuous_offsets.iter().map(|o| o.x.unsigned_abs().max(o.y.unsigned_abs())).max().unwrap_or(0)
    }

    /// Corners with a border of `border` pixels, after 3x3 non maximum suppression on the score.
    pub fn compute_valid_features(&self, image: &Image, border: usize) -> Vec<FastFeature> {
        let width = image.width();
        let height = image.height();
        let border = border.max(self.radius() + 1);
        if width <= 2*border || height <= 2*border {
            return Vec::new();
        }

        let mut scores = DMatrix::<Float>::zeros(height, width);
        for y in border..height-border {
            for x in border..width-border {
                if let Some(score) = self.accept(image, x, y) {
                    scores[(y,x)] = score;
                }
            }
        }

        let mut features = Vec::<FastFeature>::new();
        for y in border..height-border {
            for x in border..width-border {
                let score = scores[(y,x)];
                if score > 0.0 && FastDetector::is_local_maximum(&scores, x, y) {
                    features.push(FastFeature { location: Point::new(x, y), score });
                }
            }
        }

        features
    }

    /// Score of the pixel if at least `consecutive_pixels` contiguous ring samples are all brighter or all darker.
    fn accept(&self, image: &Image, x: usize, y: usize) -> Option<Float> {
        let sample_intensity = image.buffer[(y,x)];
        let cutoff_max = sample_intensity + self.threshold;
        let cutoff_min = sample_intensity - self.threshold;

        let perimeter_samples: Vec<Float> = self.continuous_offsets.iter().map(|offset| FastDetector::sample(image, x, y, offset)).collect();
        let len = perimeter_samples.len();

        let mut bright_run = 0;
        let mut dark_run = 0;
        let mut accepted = false;
        // walk the ring twice so runs may wrap around the start
        for i in 0..2*len {
            let value = perimeter_samples[i % len];
            bright_run = if value >= cutoff_max { bright_run + 1 } else { 0 };
            dark_run = if value <= cutoff_min { dark_run + 1 } else { 0 };
            if bright_run >= self.consecutive_pixels || dark_run >= self.consecutive_pixels {
                accepted = true;
                break;
            }
        }

        match accepted {
            true => Some(perimeter_samples.iter().map(|&v| FastDetector::score(sample_intensity, v, self.threshold)).filter(|&s| s > 0.0).sum::<Float>().max(Float::EPSILON)),
            false => None
        }
    }

    fn is_local_maximum(scores: &DMatrix<Float>, x: usize, y: usize) -> bool {
        let score = scores[(y,x)];
        for dy in [-1isize, 0, 1] {
            for dx in [-1isize, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let neighbour = scores[((y as isize + dy) as usize, (x as isize + dx) as usize)];
                // ties are resolved towards the earlier pixel in scan order
                if neighbour > score || (neighbour == score && (dy < 0 || (dy == 0 && dx < 0))) {
                    return false;
                }
            }
        }
        true
    }

    fn sample(image: &Image, x_center: usize, y_center: usize, offset: &Offset) -> Float {
        image.buffer[((y_center as isize + offset.y) as usize, (x_center as isize + offset.x) as usize)]
    }

    fn score(sample :Float, perimeter_sample: Float, t: Float) -> Float {
        (sample-perimeter_sample).abs() - t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_image() -> Image {
        // bright square on a dark background
        Image::from_matrix(DMatrix::from_fn(40, 40, |r,c| if (15..25).contains(&r) && (15..25).contains(&c) { 200.0 } else { 20.0 }))
    }

    #[test]
    fn detects_square_corners() {
        let detector = FastDetector::new(3, 20.0, 9);
        let features = detector.compute_valid_features(&square_image(), 4);
        assert!(!features.is_empty());
        for corner in [(15usize,15usize), (24,15), (15,24), (24,24)] {
            assert!(features.iter().any(|f| (f.location.x as isize - corner.0 as isize).abs() <= 2 && (f.location.y as isize - corner.1 as isize).abs() <= 2));
        }
    }

    #[test]
    fn flat_image_has_no_corners() {
        let detector = FastDetector::new(3, 20.0, 9);
        let image = Image::from_matrix(DMatrix::from_element(30, 30, 128.0));
        assert!(detector.compute_valid_features(&image, 4).is_empty());
    }
}
