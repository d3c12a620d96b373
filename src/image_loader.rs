//! Image loading and size alignment
//!
//! Decodes input files to 3-channel BGR `Mat`s and resizes the second image
//! of a pair to the first's dimensions so the per-pixel difference is
//! well-defined. A path that cannot be decoded is a fatal load error; there
//! is no fallback decoder.

use crate::error::{Result, SegmentationError};
use log::debug;
use opencv::core::Mat;
use opencv::imgcodecs::{self, IMREAD_COLOR};
use opencv::imgproc::{self, INTER_LINEAR};
use opencv::prelude::*;
use std::path::Path;

/// Load an image from disk as a 3-channel BGR Mat
///
/// # Errors
///
/// Returns `SegmentationError::ImageLoadError` if:
/// - The path is not valid UTF-8
/// - The file cannot be opened
/// - Decoding fails (OpenCV returns an empty Mat for unreadable files)
pub fn load_image(path: &Path) -> Result<Mat> {
    let path_str = path.to_str().ok_or_else(|| {
        SegmentationError::image_load_message(format!(
            "Path is not valid UTF-8: {}",
            path.display()
        ))
    })?;

    let image = imgcodecs::imread(path_str, IMREAD_COLOR).map_err(|e| {
        SegmentationError::image_load(format!("Failed to read {}", path.display()), e)
    })?;

    if image.empty() {
        return Err(SegmentationError::image_load_message(format!(
            "Could not decode image: {}",
            path.display()
        )));
    }

    Ok(image)
}

/// Load a previous/current image pair, aligning the current image to the
/// previous image's dimensions.
///
/// When the two images differ in (height, width), the second is resized to
/// match the first with linear interpolation; aspect ratio is not preserved.
/// All reported bounding boxes are therefore in the first image's frame.
pub fn load_image_pair(previous: &Path, current: &Path) -> Result<(Mat, Mat)> {
    let reference = load_image(previous)?;
    let current = load_image(current)?;
    let current = resize_to_match(&reference, current)?;
    Ok((reference, current))
}

/// Resize `current` to the dimensions of `reference` when they differ
fn resize_to_match(reference: &Mat, current: Mat) -> Result<Mat> {
    let target = reference
        .size()
        .map_err(|e| SegmentationError::opencv("Size query", e))?;
    let actual = current
        .size()
        .map_err(|e| SegmentationError::opencv("Size query", e))?;

    if target == actual {
        return Ok(current);
    }

    debug!(
        "Resizing current image {}x{} -> {}x{}",
        actual.width, actual.height, target.width, target.height
    );

    let mut resized = Mat::default();
    imgproc::resize(&current, &mut resized, target, 0.0, 0.0, INTER_LINEAR)
        .map_err(|e| SegmentationError::opencv("Resize", e))?;

    Ok(resized)
}
