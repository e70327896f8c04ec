use crate::error::{StitchError, StitchResult};
use crate::image::color_image::ColorImage;
use crate::panorama::warp::{CanvasGeometry, Side};

/// Column range kept from the blended canvas, before clamping.
pub fn crop_columns(geometry: &CanvasGeometry) -> (isize, isize) {
    let [top_left, bottom_left, bottom_right, top_right] = geometry.source_corners;
    match geometry.side {
        // perspective leaves a slanted strip of zeros on the far left
        Side::Left => ((top_left.x.trunc() as isize - bottom_left.x.trunc() as isize).abs(), geometry.width as isize),
        Side::Right => (0, (bottom_right.x.trunc() as isize).min(top_right.x.trunc() as isize))
    }
}

/// Cuts the rows of the destination and the columns covered by both images.
pub fn crop(panorama: &ColorImage, geometry: &CanvasGeometry, destination_height: usize) -> StitchResult<ColorImage> {
    let (_, t_y) = geometry.translation;
    let width = panorama.width() as isize;
    let (start, end) = crop_columns(geometry);
    let start = start.clamp(0, width) as usize;
    let end = end.clamp(0, width) as usize;

    if end <= start || t_y + destination_height > panorama.height() {
        return Err(StitchError::warp(format!("empty crop, columns {}..{} rows {}..{} of {}x{}", start, end, t_y, t_y + destination_height, panorama.width(), panorama.height())));
    }

    Ok(panorama.crop(t_y, start, destination_height, end - start))
}
