//! Panorama stitching from an ordered sequence of video frames.
//!
//! ORB features are matched between neighbouring frames, a homography is fitted with RANSAC,
//! and the frames are warped, seam blended and cropped pairwise until one panorama remains.

pub mod config;
pub mod error;
pub mod image;
pub mod io;
pub mod numerics;
pub mod panorama;
pub mod visualize;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

#[repr(u8)]
#[derive(Debug,Copy,Clone)]
pub enum GradientDirection {
    HORIZONTAL,
    VERTICAL
}

pub use crate::config::StitchConfig;
pub use crate::error::{StitchError, StitchResult};
pub use crate::panorama::{build_panorama, stitch_pair};
