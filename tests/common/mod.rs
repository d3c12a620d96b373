//! Shared helpers for generating synthetic test image pairs
//!
//! Tests draw filled rectangles on black frames and write them to a temp
//! directory, so no image assets need to be checked in.

use opencv::core::{Mat, MatExprTraitConst, Rect, Scalar, Vector, CV_8UC3};
use opencv::imgcodecs::imwrite;
use opencv::imgproc::{rectangle, LINE_8};
use std::path::{Path, PathBuf};

pub const FRAME_WIDTH: i32 = 320;
pub const FRAME_HEIGHT: i32 = 240;

/// A black BGR frame of the standard test dimensions
pub fn blank_frame() -> Mat {
    Mat::zeros(FRAME_HEIGHT, FRAME_WIDTH, CV_8UC3)
        .unwrap()
        .to_mat()
        .unwrap()
}

/// Paint a filled white rectangle onto the frame
pub fn fill_rect(frame: &mut Mat, rect: Rect) {
    rectangle(
        frame,
        rect,
        Scalar::new(255.0, 255.0, 255.0, 0.0),
        -1,
        LINE_8,
        0,
    )
    .unwrap();
}

/// Write a frame as a PNG under `dir` and return its path
pub fn write_frame(dir: &Path, name: &str, frame: &Mat) -> PathBuf {
    let path = dir.join(name);
    let ok = imwrite(path.to_str().unwrap(), frame, &Vector::new()).unwrap();
    assert!(ok, "Failed to write test image {}", path.display());
    path
}

/// Write a blank frame and a copy with the given rectangles painted on it
pub fn write_frame_pair(dir: &Path, changed: &[Rect]) -> (PathBuf, PathBuf) {
    let previous = blank_frame();
    let mut current = blank_frame();
    for rect in changed {
        fill_rect(&mut current, *rect);
    }

    (
        write_frame(dir, "previous.png", &previous),
        write_frame(dir, "current.png", &current),
    )
}
