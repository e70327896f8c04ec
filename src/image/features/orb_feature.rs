use serde::{Serialize, Deserialize};

use crate::image::features::{
    Feature,Oriented,
    fast_feature::FastDetector,
    geometry::point::Point,
    harris_corner::harris_response_for_feature,
    intensity_centroid,
};
use crate::image::filter::gradient_images;
use crate::image::pyramid::orb::orb_runtime_parameters::OrbRuntimeParameters;
use crate::image::Image;
use crate::Float;

/// Oriented keypoint. `location` is in base image coordinates, `octave_location` in the octave it was found in.
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct OrbFeature {
    pub location: Point<Float>,
    pub octave_location: Point<usize>,
    pub orientation: Float,
    pub octave: usize,
    pub response: Float
}

impl Feature for OrbFeature {
    fn get_x_image_float(&self) -> Float { self.location.x }
    fn get_y_image_float(&self) -> Float { self.location.y }
    fn get_x_image(&self) -> usize { self.octave_location.x }
    fn get_y_image(&self) -> usize { self.octave_location.y }
}

impl Oriented for OrbFeature {
    fn get_orientation(&self) -> Float {
        self.orientation
    }
}

impl OrbFeature {

    /// FAST corners of one octave, ranked by Harris response, keeping at most `max_features`.
    pub fn new(image: &Image, octave_idx: usize, octave_scale: Float, max_features: usize, runtime_parameters: &OrbRuntimeParameters) -> Vec<OrbFeature> {
        let detector = FastDetector::new(runtime_parameters.fast_circle_radius, runtime_parameters.fast_threshold, runtime_parameters.fast_consecutive_pixels);
        let fast_features = detector.compute_valid_features(image, runtime_parameters.edge_threshold);
        if fast_features.is_empty() || max_features == 0 {
            return Vec::new();
        }

        let (x_gradient, y_gradient) = gradient_images(image);
        let mut indexed_harris_corner_responses = fast_features.iter()
            .map(|x| harris_response_for_feature(&x_gradient, &y_gradient, x, runtime_parameters.harris_k, runtime_parameters.harris_window_size))
            .enumerate()
            .collect::<Vec<(usize,Float)>>();
        indexed_harris_corner_responses.sort_by(|a,b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));

        let patch_radius = runtime_parameters.patch_radius();
        indexed_harris_corner_responses.iter().take(max_features).map(|&(idx, response)| {
            let fast_feature = &fast_features[idx];
            let octave_location = fast_feature.location;
            OrbFeature {
                location: Point::new(to_base_coordinate(octave_location.x, octave_scale), to_base_coordinate(octave_location.y, octave_scale)),
                octave_location,
                orientation: intensity_centroid::orientation(image, fast_feature, patch_radius),
                octave: octave_idx,
                response
            }
        }).collect()
    }
}

// octaves are resampled with aligned pixel centers
fn to_base_coordinate(octave_coordinate: usize, octave_scale: Float) -> Float {
    (octave_coordinate as Float + 0.5)*octave_scale - 0.5
}
