//! # Segmentation
//!
//! A Rust crate for finding regions that differ between two images of
//! otherwise-matching scenes.
//!
//! This library computes bounding boxes for downstream annotation by:
//! - Loading both images and aligning their dimensions
//! - Computing the per-pixel absolute difference
//! - Thresholding (Otsu) and denoising the difference mask
//! - Extracting external contours and filtering them by area
//!
//! ## Example
//!
//! ```rust,no_run
//! use segmentation::{detect_changes, DetectionConfig};
//! use std::path::Path;
//!
//! let boxes = detect_changes(
//!     Path::new("before.jpg"),
//!     Path::new("after.jpg"),
//!     &DetectionConfig::default(),
//! )?;
//! println!("{} change region(s)", boxes.len());
//! # Ok::<(), segmentation::SegmentationError>(())
//! ```

use opencv::core::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod image_loader;

pub use config::DetectionConfig;
pub use constants::{DEFAULT_MIN_AREA, JSON_MARKER};
pub use detection::ChangeDetector;
pub use error::{Result, SegmentationError};

/// Axis-aligned bounding box in pixel coordinates of the first image's frame
///
/// Width and height are positive by construction; degenerate contours are
/// filtered out before boxes are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Create a bounding box from origin and size
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Tightest box enclosing every box in the slice, or `None` for an
    /// empty slice
    pub fn enclosing(boxes: &[BoundingBox]) -> Option<BoundingBox> {
        let first = boxes.first()?;

        let mut x_min = first.x;
        let mut y_min = first.y;
        let mut x_max = first.x + first.width;
        let mut y_max = first.y + first.height;

        for bbox in &boxes[1..] {
            x_min = x_min.min(bbox.x);
            y_min = y_min.min(bbox.y);
            x_max = x_max.max(bbox.x + bbox.width);
            y_max = y_max.max(bbox.y + bbox.height);
        }

        Some(BoundingBox::new(x_min, y_min, x_max - x_min, y_max - y_min))
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}

/// One detected change region with its 1-based discovery index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: usize,
    pub bbox: BoundingBox,
}

/// Machine-readable result payload printed after the `JSON_OUTPUT:` marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub segments: Vec<Segment>,
}

impl SegmentReport {
    /// Number segments 1..N in the order the boxes were discovered
    pub fn from_boxes(boxes: &[BoundingBox]) -> Self {
        Self {
            segments: boxes
                .iter()
                .enumerate()
                .map(|(index, bbox)| Segment {
                    id: index + 1,
                    bbox: *bbox,
                })
                .collect(),
        }
    }
}

/// Detect change regions between two image files
///
/// This is the main entry point. It loads both images (resizing the second
/// to the first's dimensions if needed), runs the difference pipeline, and
/// returns the surviving bounding boxes in contour discovery order.
///
/// # Arguments
///
/// * `previous` - Path to the first (reference) image
/// * `current` - Path to the second image
/// * `config` - Pipeline parameters (area threshold, merge mode)
///
/// # Errors
///
/// Returns `SegmentationError` if:
/// - Either image cannot be loaded or decoded
/// - The configuration is inconsistent
/// - Any pipeline operation fails
pub fn detect_changes(
    previous: &Path,
    current: &Path,
    config: &DetectionConfig,
) -> Result<Vec<BoundingBox>> {
    config.validate()?;

    let (reference, current) = image_loader::load_image_pair(previous, current)?;

    ChangeDetector::with_config(config.clone()).detect(&reference, &current)
}
