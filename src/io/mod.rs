extern crate image as image_rs;

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use image_rs::RgbImage;
use tracing::{debug, warn};

use crate::error::StitchResult;

pub fn load_image_as_rgb(file_path: &Path) -> StitchResult<RgbImage> {
    Ok(image_rs::open(file_path)?.to_rgb8())
}

/// Compares digit runs by value, so `frame2` sorts before `frame10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut digits_a = String::new();
                while let Some(c) = a_chars.next_if(|c| c.is_ascii_digit()) { digits_a.push(c); }
                let mut digits_b = String::new();
                while let Some(c) = b_chars.next_if(|c| c.is_ascii_digit()) { digits_b.push(c); }

                let trimmed_a = digits_a.trim_start_matches('0');
                let trimmed_b = digits_b.trim_start_matches('0');
                let ordering = trimmed_a.len().cmp(&trimmed_b.len())
                    .then_with(|| trimmed_a.cmp(trimmed_b))
                    .then_with(|| digits_a.len().cmp(&digits_b.len()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            },
            (Some(x), Some(y)) => {
                a_chars.next();
                b_chars.next();
                if x != y {
                    return x.cmp(&y);
                }
            }
        }
    }
}

/// Files of `dir_path` in natural name order.
pub fn sorted_frame_paths(dir_path: &Path) -> StitchResult<Vec<PathBuf>> {
    let mut paths = Vec::<PathBuf>::new();
    for entry_result in std::fs::read_dir(dir_path)? {
        let path = entry_result?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| natural_cmp(&a.file_name().unwrap_or_default().to_string_lossy(), &b.file_name().unwrap_or_default().to_string_lossy()));
    Ok(paths)
}

/// Every decodable image in `dir_path`, ordered left to right by file name. Other files are skipped.
pub fn load_frames(dir_path: &Path) -> StitchResult<Vec<RgbImage>> {
    let mut frames = Vec::<RgbImage>::new();
    for path in sorted_frame_paths(dir_path)? {
        match load_image_as_rgb(&path) {
            Ok(frame) => {
                debug!(path = %path.display(), width = frame.width(), height = frame.height(), "loaded frame");
                frames.push(frame);
            },
            Err(err) => warn!(path = %path.display(), %err, "skipping undecodable file")
        }
    }
    Ok(frames)
}

/// The format follows the file extension.
pub fn save_panorama(file_path: &Path, panorama: &RgbImage) -> StitchResult<()> {
    panorama.save(file_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_compare_by_value() {
        let mut names = vec!["frame10.jpg", "frame2.jpg", "frame1.jpg", "frame02.jpg"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["frame1.jpg", "frame2.jpg", "frame02.jpg", "frame10.jpg"]);
    }

    #[test]
    fn letters_compare_lexically() {
        assert_eq!(natural_cmp("a", "b"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "ab"), Ordering::Greater);
        assert_eq!(natural_cmp("x7", "x7"), Ordering::Equal);
    }
}
