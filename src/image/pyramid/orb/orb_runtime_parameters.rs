use serde::{Serialize, Deserialize};

use crate::error::{StitchError, StitchResult};
use crate::Float;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbRuntimeParameters {
    /// Cap on keypoints over all octaves.
    pub max_features: usize,
    pub octave_count: usize,
    pub pyramid_scale: Float,
    /// Border in pixels inside which no keypoint is detected, per octave.
    pub edge_threshold: usize,
    pub sigma: Float,
    pub blur_radius: Float,
    pub harris_k: Float,
    pub harris_window_size: usize,
    pub fast_circle_radius: usize,
    pub fast_threshold: Float,
    pub fast_consecutive_pixels: usize,
    pub brief_n: usize,
    pub brief_s: usize,
    pub brief_lookup_table_step: usize,
    pub brief_sampling_pattern_seed: u64
}

impl Default for OrbRuntimeParameters {
    fn default() -> Self {
        OrbRuntimeParameters {
            max_features: 3000,
            octave_count: 8,
            pyramid_scale: 1.2,
            edge_threshold: 31,
            sigma: 2.0,
            blur_radius: 3.0,
            harris_k: 0.04,
            harris_window_size: 7,
            fast_circle_radius: 3,
            fast_threshold: 20.0,
            fast_consecutive_pixels: 9,
            brief_n: 256,
            brief_s: 31,
            brief_lookup_table_step: 30,
            brief_sampling_pattern_seed: 0x0DDB1A5ECBAD5EEDu64
        }
    }
}

impl OrbRuntimeParameters {

    pub fn patch_radius(&self) -> usize {
        (self.brief_s - 1) / 2
    }

    pub fn validate(&self) -> StitchResult<()> {
        if self.max_features == 0 || self.octave_count == 0 {
            return Err(StitchError::invalid_config("orb needs at least one feature and one octave"));
        }
        if !(self.pyramid_scale > 1.0) {
            return Err(StitchError::invalid_config(format!("orb pyramid scale must be greater than 1, got {}", self.pyramid_scale)));
        }
        if self.brief_n != 256 {
            return Err(StitchError::invalid_config(format!("brief descriptors have 256 tests, got {}", self.brief_n)));
        }
        if self.brief_s < 3 || self.brief_s % 2 == 0 {
            return Err(StitchError::invalid_config(format!("brief patch size must be odd and at least 3, got {}", self.brief_s)));
        }
        if self.edge_threshold < self.patch_radius() {
            return Err(StitchError::invalid_config("orb edge threshold must cover the brief patch radius"));
        }
        if self.fast_circle_radius == 0 || self.fast_consecutive_pixels == 0 {
            return Err(StitchError::invalid_config("fast circle radius and consecutive pixel count must be positive"));
        }
        if self.harris_window_size == 0 || self.brief_lookup_table_step == 0 {
            return Err(StitchError::invalid_config("harris window and brief lookup table step must be positive"));
        }
        if !(self.sigma > 0.0) || self.blur_radius < 1.0 {
            return Err(StitchError::invalid_config("gaussian sigma must be positive and the blur radius at least 1"));
        }
        Ok(())
    }
}
