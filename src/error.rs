extern crate image as image_rs;

pub type StitchResult<T> = Result<T, StitchError>;

const RETRY_HINT: &str = "please try again with another image set";

#[derive(thiserror::Error, Debug)]
pub enum StitchError {
    #[error("not enough matches: {found} survived the ratio test, at least {required} are needed, {hint}", hint = RETRY_HINT)]
    MatchInsufficient { found: usize, required: usize },

    #[error("homography estimation failed: {0}, {hint}", hint = RETRY_HINT)]
    EstimationFailure(String),

    #[error("warp failed: {0}, {hint}", hint = RETRY_HINT)]
    WarpFailure(String),

    #[error("cannot build a panorama from an empty image sequence")]
    EmptySequence,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Image(#[from] image_rs::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StitchError {
    pub fn estimation(msg: impl Into<String>) -> Self {
        Self::EstimationFailure(msg.into())
    }

    pub fn warp(msg: impl Into<String>) -> Self {
        Self::WarpFailure(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Pipeline stage the error originated in.
    pub fn stage(&self) -> &'static str {
        match self {
            StitchError::MatchInsufficient { .. } => "FeatureMatcher",
            StitchError::EstimationFailure(_) => "HomographyEstimator",
            StitchError::WarpFailure(_) => "ImageWarper",
            StitchError::EmptySequence => "PanoramaComposer",
            StitchError::InvalidConfig(_) | StitchError::Config(_) => "Configuration",
            StitchError::Image(_) | StitchError::Io(_) => "FrameIO",
        }
    }

    /// True for the geometric failures a different image set may resolve.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StitchError::MatchInsufficient { .. } | StitchError::EstimationFailure(_) | StitchError::WarpFailure(_)
        )
    }
}

impl From<serde_yaml::Error> for StitchError {
    fn from(err: serde_yaml::Error) -> Self {
        StitchError::Config(err.to_string())
    }
}
