//! Command-line wrapper for change-region segmentation
//!
//! Prints a human-readable summary line followed by a machine-readable
//! line prefixed with `JSON_OUTPUT:`, which a caller matches on over a
//! subprocess pipe. Any failure maps to `Error: <message>` on stderr and
//! exit status 1.

use clap::Parser;
use segmentation::{
    constants, detect_changes, BoundingBox, DetectionConfig, Result, SegmentReport,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "segmentation",
    version,
    about = "Find differences between two images and return bounding boxes"
)]
struct Args {
    /// Path to first image (previous)
    image_a: PathBuf,

    /// Path to second image (current)
    image_b: PathBuf,

    /// Ignore regions smaller than this area (px²)
    #[arg(long, default_value_t = constants::DEFAULT_MIN_AREA)]
    min_area: i32,

    /// Emit one box that encloses all differences
    #[arg(long)]
    single_box: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(error) = run(&args) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = DetectionConfig::new(args.min_area, args.single_box);
    let boxes = detect_changes(&args.image_a, &args.image_b, &config)?;

    println!(
        "Found {} change region(s): {}",
        boxes.len(),
        format_boxes(&boxes)
    );

    let report = SegmentReport::from_boxes(&boxes);
    println!("{}{}", constants::JSON_MARKER, serde_json::to_string(&report)?);

    Ok(())
}

/// Render boxes as a bracketed list of (x, y, w, h) tuples
fn format_boxes(boxes: &[BoundingBox]) -> String {
    let tuples: Vec<String> = boxes.iter().map(BoundingBox::to_string).collect();
    format!("[{}]", tuples.join(", "))
}
