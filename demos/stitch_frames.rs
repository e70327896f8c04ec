extern crate color_eyre;
extern crate panorama;

use std::path::Path;
use std::time::Instant;
use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

use panorama::StitchConfig;
use panorama::image::color_image::ColorImage;
use panorama::image::pyramid::orb::FeatureExtractor;
use panorama::io::{load_frames, save_panorama};
use panorama::panorama::stitch_pair_steps;
use panorama::visualize::display_matches;

/// stitch_frames <frames dir> [output] [config.yaml]
fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let frames_dir = args.first().map(String::as_str).unwrap_or("frames");
    let output_path = args.get(1).map(String::as_str).unwrap_or("output/panorama.jpg");
    let config = match args.get(2) {
        Some(config_path) => StitchConfig::from_yaml_file(Path::new(config_path))?,
        None => StitchConfig::default()
    };

    let frames = load_frames(Path::new(frames_dir))?;
    if frames.is_empty() {
        return Err(eyre!("no decodable frames in {}", frames_dir));
    }
    println!("Processing {} frames....", frames.len());

    if frames.len() > 1 {
        let extractor = FeatureExtractor::new(&config.orb);
        let source = ColorImage::from_rgb_image(&frames[0]);
        let destination = ColorImage::from_rgb_image(&frames[1]);
        let steps = stitch_pair_steps(&extractor, &source, &destination, &config)?;
        let alignment = &steps.alignment;
        let match_image = display_matches(&frames[0], &frames[1], &alignment.source_features.keypoints, &alignment.destination_features.keypoints, &alignment.inlier_matches(), 100);
        save_panorama(&Path::new(output_path).with_file_name("matches.jpg"), &match_image)?;
        save_panorama(&Path::new(output_path).with_file_name("non_blended.jpg"), &steps.non_blended().to_rgb_image())?;
    }

    let start = Instant::now();
    let result = panorama::build_panorama(&frames, &config)?;
    let elapsed = start.elapsed();

    save_panorama(Path::new(output_path), &result)?;
    println!("Complete! {}x{} written to {}", result.width(), result.height(), output_path);
    println!("Execution time: {:.3}s", elapsed.as_secs_f64());

    Ok(())
}
