use tracing::debug;

use crate::image::Image;
use crate::image::color_image::ColorImage;
use crate::image::filter::gaussian_2_d_convolution;
use crate::image::pyramid::Pyramid;
use crate::image::features::orb_feature::OrbFeature;
use crate::image::descriptors::brief_descriptor::{BriefDescriptor, DescriptorVector, SampleLookupTables};
use crate::Float;
use self::orb_runtime_parameters::OrbRuntimeParameters;

pub mod orb_runtime_parameters;

#[derive(Debug,Clone)]
pub struct OrbOctave {
    pub image: Image,
    /// Gaussian smoothed copy the descriptors are sampled from.
    pub smoothed: Image,
    /// Factor from octave to base image coordinates.
    pub scale: Float,
    pub index: usize
}

impl OrbOctave {
    pub fn build_octave(image: Image, index: usize, scale: Float, runtime_parameters: &OrbRuntimeParameters) -> OrbOctave {
        let smoothed = gaussian_2_d_convolution(&image, runtime_parameters.sigma, runtime_parameters.blur_radius);
        OrbOctave { image, smoothed, scale, index }
    }
}

/// Keypoints and their descriptors, index aligned.
#[derive(Debug,Clone)]
pub struct FeatureSet {
    pub keypoints: Vec<OrbFeature>,
    pub descriptors: Vec<BriefDescriptor>
}

impl FeatureSet {
    pub fn empty() -> FeatureSet {
        FeatureSet { keypoints: Vec::new(), descriptors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn descriptor_vectors(&self) -> Vec<DescriptorVector> {
        self.descriptors.iter().map(|d| d.to_descriptor_vector()).collect()
    }
}

/// Octaves shrink by `pyramid_scale` until they no longer fit a keypoint inside the edge border.
pub fn build_orb_pyramid(base_image: &Image, runtime_parameters: &OrbRuntimeParameters) -> Pyramid<OrbOctave> {
    let min_dimension = 2*runtime_parameters.edge_threshold + 1;
    let mut pyramid = Pyramid::<OrbOctave>::empty(runtime_parameters.octave_count);

    for i in 0..runtime_parameters.octave_count {
        let scale = runtime_parameters.pyramid_scale.powi(i as i32);
        let width = (base_image.width() as Float / scale).round() as usize;
        let height = (base_image.height() as Float / scale).round() as usize;
        if width < min_dimension || height < min_dimension {
            break;
        }

        let octave_image = match pyramid.octaves.last() {
            None => base_image.clone(),
            Some(previous) => previous.image.resize(width, height)
        };
        pyramid.octaves.push(OrbOctave::build_octave(octave_image, i, scale, runtime_parameters));
    }

    pyramid
}

/// Geometric split of `max_features` over the octaves, the last octave takes the remainder.
pub fn features_per_octave(runtime_parameters: &OrbRuntimeParameters) -> Vec<usize> {
    let octave_count = runtime_parameters.octave_count;
    let factor = 1.0 / runtime_parameters.pyramid_scale;
    let max_features = runtime_parameters.max_features;
    let mut desired = max_features as Float * (1.0 - factor) / (1.0 - factor.powi(octave_count as i32));

    let mut budget = Vec::<usize>::with_capacity(octave_count);
    let mut sum = 0;
    for _ in 0..octave_count-1 {
        let n = (desired.round() as usize).min(max_features - sum);
        budget.push(n);
        sum += n;
        desired *= factor;
    }
    budget.push(max_features - sum);
    budget
}

/// ORB feature extraction. The sampling pattern is built once and reused for every image.
pub struct FeatureExtractor {
    runtime_parameters: OrbRuntimeParameters,
    sample_lookup_tables: SampleLookupTables
}

impl FeatureExtractor {

    pub fn new(runtime_parameters: &OrbRuntimeParameters) -> FeatureExtractor {
        FeatureExtractor {
            runtime_parameters: runtime_parameters.clone(),
            sample_lookup_tables: BriefDescriptor::generate_sample_lookup_tables(runtime_parameters)
        }
    }

    pub fn extract(&self, image: &ColorImage) -> FeatureSet {
        self.extract_from_gray(&image.to_gray())
    }

    /// Empty when the image has no detectable corners.
    pub fn extract_from_gray(&self, gray_image: &Image) -> FeatureSet {
        let pyramid = build_orb_pyramid(gray_image, &self.runtime_parameters);
        let budget = features_per_octave(&self.runtime_parameters);
        let mut feature_set = FeatureSet::empty();

        for octave in &pyramid.octaves {
            let orb_features = OrbFeature::new(&octave.image, octave.index, octave.scale, budget[octave.index], &self.runtime_parameters);
            let data_vector = orb_features.iter()
                .filter_map(|feature| BriefDescriptor::new(&octave.smoothed, feature, &self.runtime_parameters, &self.sample_lookup_tables).map(|descriptor| (*feature, descriptor)))
                .collect::<Vec<(OrbFeature,BriefDescriptor)>>();

            if data_vector.is_empty() {
                debug!(octave = octave.index, "0 features with descriptors");
            }

            for (feature, descriptor) in data_vector {
                feature_set.keypoints.push(feature);
                feature_set.descriptors.push(descriptor);
            }
        }

        debug!(keypoints = feature_set.len(), octaves = pyramid.octaves.len(), "extracted orb features");
        feature_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn budget_sums_to_cap() {
        let params = OrbRuntimeParameters::default();
        let budget = features_per_octave(&params);
        assert_eq!(budget.len(), params.octave_count);
        assert_eq!(budget.iter().sum::<usize>(), params.max_features);
        assert!(budget[0] > budget[1]);
    }

    #[test]
    fn pyramid_stops_at_edge_border() {
        let params = OrbRuntimeParameters::default();
        let image = Image::from_matrix(DMatrix::from_element(120, 160, 10.0));
        let pyramid = build_orb_pyramid(&image, &params);
        assert!(!pyramid.octaves.is_empty());
        for octave in &pyramid.octaves {
            assert!(octave.image.width() >= 2*params.edge_threshold + 1);
            assert!(octave.image.height() >= 2*params.edge_threshold + 1);
        }
        assert!(pyramid.octaves.len() < params.octave_count);
    }

    #[test]
    fn flat_image_yields_empty_feature_set() {
        let extractor = FeatureExtractor::new(&OrbRuntimeParameters::default());
        let image = Image::from_matrix(DMatrix::from_element(100, 100, 90.0));
        assert!(extractor.extract_from_gray(&image).is_empty());
    }
}
