use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::image::pyramid::orb::orb_runtime_parameters::OrbRuntimeParameters;
use crate::error::{StitchError, StitchResult};
use crate::Float;

/// Fewer ratio test survivors than this abort a stitch.
pub const MIN_MATCHES: usize = 5;
/// The seam transition spans `destination width / SMOOTHING_WINDOW_DIVISOR` columns.
pub const SMOOTHING_WINDOW_DIVISOR: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingParameters {
    pub ratio: Float
}

impl Default for MatchingParameters {
    fn default() -> Self {
        MatchingParameters { ratio: 0.75 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacParameters {
    /// Maximum reprojection distance in pixels for a correspondence to count as inlier.
    pub inlier_threshold: Float,
    pub max_iterations: usize,
    pub confidence: Float,
    pub seed: u64
}

impl Default for RansacParameters {
    fn default() -> Self {
        RansacParameters {
            inlier_threshold: 5.0,
            max_iterations: 2000,
            confidence: 0.995,
            seed: 0x5EED_CAFE_F00D_u64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpParameters {
    pub max_canvas_dimension: usize
}

impl Default for WarpParameters {
    fn default() -> Self {
        WarpParameters { max_canvas_dimension: 20000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    pub orb: OrbRuntimeParameters,
    pub matching: MatchingParameters,
    pub ransac: RansacParameters,
    pub warp: WarpParameters,
    /// Reduce the left and right halves of the sequence on the rayon pool.
    pub parallel_halves: bool
}

impl Default for StitchConfig {
    fn default() -> Self {
        StitchConfig {
            orb: OrbRuntimeParameters::default(),
            matching: MatchingParameters::default(),
            ransac: RansacParameters::default(),
            warp: WarpParameters::default(),
            parallel_halves: true
        }
    }
}

impl StitchConfig {

    pub fn from_yaml_str(yaml: &str) -> StitchResult<StitchConfig> {
        let config: StitchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> StitchResult<StitchConfig> {
        let contents = std::fs::read_to_string(path)?;
        StitchConfig::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> StitchResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> StitchResult<()> {
        self.orb.validate()?;

        let ratio = self.matching.ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(StitchError::invalid_config(format!("matching ratio must be in (0,1], got {}", ratio)));
        }

        let ransac = &self.ransac;
        if !(ransac.inlier_threshold > 0.0) {
            return Err(StitchError::invalid_config(format!("ransac inlier threshold must be positive, got {}", ransac.inlier_threshold)));
        }
        if ransac.max_iterations == 0 {
            return Err(StitchError::invalid_config("ransac max iterations must be at least 1"));
        }
        if !(ransac.confidence > 0.0 && ransac.confidence < 1.0) {
            return Err(StitchError::invalid_config(format!("ransac confidence must be in (0,1), got {}", ransac.confidence)));
        }

        if self.warp.max_canvas_dimension == 0 {
            return Err(StitchError::invalid_config("max canvas dimension must be positive"));
        }

        Ok(())
    }
}
