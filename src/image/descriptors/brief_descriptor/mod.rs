extern crate nalgebra as na;
extern crate rand;
extern crate rand_distr;

use na::{Matrix2xX, SVector};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

use crate::image::Image;
use crate::image::features::{Oriented, geometry::point::Point, orb_feature::OrbFeature};
use crate::image::pyramid::orb::orb_runtime_parameters::OrbRuntimeParameters;
use crate::numerics::rotation_matrix_2d_from_orientation;
use crate::{Float,float};
use self::bit_vector::BitVector;


pub mod bit_vector;

pub const DESCRIPTOR_BYTES: usize = 32;

/// Descriptor bytes as floats, the representation the matcher measures distances in.
pub type DescriptorVector = SVector<Float, DESCRIPTOR_BYTES>;

/// Sample pairs for every discrete rotation, table `j` is the pattern rotated by `j*2pi/len`.
pub type SampleLookupTables = Vec<Vec<(Point<Float>,Point<Float>)>>;

#[derive(Debug,Clone,PartialEq)]
pub struct BriefDescriptor {
    bit_vector: BitVector
}

impl BriefDescriptor {

    pub fn generate_sample_lookup_tables(runtime_parameters: &OrbRuntimeParameters) -> SampleLookupTables {
        let patch_radius = runtime_parameters.patch_radius() as Float;
        let std_dev = runtime_parameters.brief_s as Float / 5.0;

        let mut sampling_thread = SmallRng::seed_from_u64(runtime_parameters.brief_sampling_pattern_seed);

        let n = runtime_parameters.brief_n;
        let mut samples_delta_a = Matrix2xX::<Float>::zeros(n);
        let mut samples_delta_b = Matrix2xX::<Float>::zeros(n);

        for i in 0..n {
            let (delta_a,delta_b) = BriefDescriptor::generate_sample_pair(&mut sampling_thread, std_dev, patch_radius);
            samples_delta_a[(0,i)] = delta_a.x;
            samples_delta_a[(1,i)] = delta_a.y;
            samples_delta_b[(0,i)] = delta_b.x;
            samples_delta_b[(1,i)] = delta_b.y;
        }

        let step = runtime_parameters.brief_lookup_table_step;
        let table_inc = 2.0*float::consts::PI/step as Float;

        (0..step).map(|j| {
            let rotation_matrix = rotation_matrix_2d_from_orientation(table_inc*j as Float);
            let rotated_delta_a = rotation_matrix*&samples_delta_a;
            let rotated_delta_b = rotation_matrix*&samples_delta_b;

            (0..n).map(|i| (Point::new(rotated_delta_a[(0,i)], rotated_delta_a[(1,i)]),Point::new(rotated_delta_b[(0,i)], rotated_delta_b[(1,i)]))).collect()
        }).collect()
    }

    /// Binary intensity tests on the smoothed octave image. None if the patch leaves the image.
    pub fn new(image: &Image, orb_feature: &OrbFeature, runtime_parameters: &OrbRuntimeParameters, sample_lookup_tables: &SampleLookupTables) -> Option<BriefDescriptor> {
        let patch_radius = runtime_parameters.patch_radius();
        let x = orb_feature.octave_location.x;
        let y = orb_feature.octave_location.y;

        if x < patch_radius || y < patch_radius || y + patch_radius >= image.height() || x + patch_radius >= image.width() {
            return None;
        }

        let bins = sample_lookup_tables.len();
        let bin_width = 2.0*float::consts::PI/bins as Float;
        let sample_pair_idx = ((orb_feature.get_orientation() / bin_width).round() as usize) % bins;
        let samples_pattern = &sample_lookup_tables[sample_pair_idx];

        let mut bit_vector = BitVector::new(samples_pattern.len());
        for (i, (sample_a,sample_b)) in samples_pattern.iter().enumerate() {
            let a = BriefDescriptor::clamp_to_image(image, x as Float + sample_a.x, y as Float + sample_a.y);
            let b = BriefDescriptor::clamp_to_image(image, x as Float + sample_b.x, y as Float + sample_b.y);
            bit_vector.set(i, image.buffer[(a.y,a.x)] < image.buffer[(b.y,b.x)]);
        }

        Some(BriefDescriptor{bit_vector})
    }

    pub fn hamming_distance(&self, other: &BriefDescriptor) -> u64 {
        self.bit_vector.hamming_distance(&other.bit_vector)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bit_vector.to_bytes()
    }

    /// Every descriptor byte becomes one float component.
    pub fn to_descriptor_vector(&self) -> DescriptorVector {
        let bytes = self.to_bytes();
        DescriptorVector::from_fn(|i, _| bytes.get(i).map_or(0.0, |&b| b as Float))
    }

    /// Offsets drawn from N(0, std_dev^2) as scaled standard normal samples, clamped to the patch.
    fn generate_sample_pair(sampling_thread: &mut SmallRng, std_dev: Float, patch_radius: Float) -> (Point<Float>,Point<Float>) {
        let mut sample = || (std_dev*sampling_thread.sample::<Float,_>(StandardNormal)).clamp(-patch_radius, patch_radius);
        let a = Point{x: sample(), y: sample()};
        let b = Point{x: sample(), y: sample()};
        (a,b)
    }

    fn clamp_to_image(image: &Image, x: Float, y: Float) -> Point<usize> {
        let x_clamped = x.round().clamp(0.0, (image.width() - 1) as Float) as usize;
        let y_clamped = y.round().clamp(0.0, (image.height() - 1) as Float) as usize;
        Point::new(x_clamped, y_clamped)
    }
}
