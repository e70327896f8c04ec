use nalgebra::Vector2;

use crate::Float;

pub mod geometry;
pub mod fast_feature;
pub mod harris_corner;
pub mod intensity_centroid;
pub mod matches;
pub mod orb_feature;


pub trait Feature {
    fn get_x_image_float(&self) -> Float;
    fn get_y_image_float(&self) -> Float;
    fn get_x_image(&self) -> usize;
    fn get_y_image(&self) -> usize;
    fn get_as_2d_point(&self) -> Vector2<Float> {
        Vector2::<Float>::new(self.get_x_image_float(), self.get_y_image_float())
    }
}

pub trait Oriented {
    fn get_orientation(&self) -> Float;
}
