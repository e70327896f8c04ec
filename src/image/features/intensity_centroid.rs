use crate::{Float,float};
use crate::image::Image;
use crate::image::features::Feature;

/// Orientation of the intensity centroid inside a disc of `radius` around the feature, in [0, 2pi).
pub fn orientation(image: &Image, feature: &dyn Feature, radius: usize) -> Float {
    let x_center = feature.get_x_image() as isize;
    let y_center = feature.get_y_image() as isize;
    let radius_signed = radius as isize;
    let width = image.width() as isize;
    let height = image.height() as isize;

    let mut m_0_1 = 0.0;
    let mut m_1_0 = 0.0;
    for dy in -radius_signed..radius_signed+1 {
        for dx in -radius_signed..radius_signed+1 {
            if dx*dx + dy*dy > radius_signed*radius_signed {
                continue;
            }
            let x = x_center + dx;
            let y = y_center + dy;
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let intensity = image.buffer[(y as usize, x as usize)];
            m_1_0 += (dx as Float)*intensity;
            m_0_1 += (dy as Float)*intensity;
        }
    }

    match m_0_1.atan2(m_1_0) {
        angle if angle < 0.0 => angle + 2.0*float::consts::PI,
        angle => angle
    }
}
