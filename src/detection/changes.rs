//! Difference-and-box extraction
//!
//! Implements the fixed change-detection pipeline:
//! - Per-pixel absolute difference of the two BGR grids
//! - Grayscale reduction and Gaussian smoothing
//! - Otsu binarization into changed/unchanged pixels
//! - Morphological opening and closing to drop noise and fill gaps
//! - External contour extraction with area filtering and bounding rectangles

use crate::config::DetectionConfig;
use crate::error::{Result, SegmentationError};
use crate::BoundingBox;
use log::debug;
use opencv::{
    core::{self, Mat, Point, Scalar, Size, Vector, BORDER_CONSTANT, BORDER_DEFAULT},
    imgproc::{
        bounding_rect, contour_area, cvt_color, find_contours, gaussian_blur,
        get_structuring_element, morphology_ex, threshold, CHAIN_APPROX_SIMPLE, COLOR_BGR2GRAY,
        MORPH_CLOSE, MORPH_OPEN, MORPH_RECT, RETR_EXTERNAL, THRESH_BINARY, THRESH_OTSU,
    },
    prelude::*,
};

// Type alias for OpenCV vector types
type VectorOfPoint = Vector<Point>;

/// Detector computing bounding boxes around regions that differ between
/// two same-sized images
pub struct ChangeDetector {
    config: DetectionConfig,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeDetector {
    /// Create a detector with the default pipeline parameters
    pub fn new() -> Self {
        Self {
            config: DetectionConfig::default(),
        }
    }

    /// Create a detector with custom parameters
    pub fn with_config(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Detect change regions between two aligned BGR images
    ///
    /// Both inputs must share the same dimensions; `load_image_pair` takes
    /// care of that for file inputs. Boxes are returned in the discovery
    /// order of the underlying contour finder, which is not spatially
    /// sorted.
    ///
    /// # Errors
    ///
    /// Returns `SegmentationError::OpenCvError` if any pipeline operation
    /// fails (e.g. mismatched dimensions or channel counts).
    pub fn detect(&self, previous: &Mat, current: &Mat) -> Result<Vec<BoundingBox>> {
        // Step 1: Difference signal
        let blurred = self.difference_signal(previous, current)?;

        // Step 2: Binarization
        let binary = self.binarize(&blurred)?;

        // Step 3: Morphological cleanup
        let cleaned = self.clean_mask(&binary)?;

        // Step 4: Contours to boxes
        let boxes = self.extract_boxes(&cleaned)?;

        // Step 5: Optional merge into a single enclosing box
        if self.config.merge_regions {
            if let Some(merged) = BoundingBox::enclosing(&boxes) {
                return Ok(vec![merged]);
            }
        }

        Ok(boxes)
    }

    /// Absolute difference, reduced to smoothed grayscale intensity
    fn difference_signal(&self, previous: &Mat, current: &Mat) -> Result<Mat> {
        let mut diff = Mat::default();
        core::absdiff(previous, current, &mut diff)
            .map_err(|e| SegmentationError::opencv("Absolute difference", e))?;

        let mut gray = Mat::default();
        cvt_color(
            &diff,
            &mut gray,
            COLOR_BGR2GRAY,
            0,
        )
        .map_err(|e| SegmentationError::opencv("Grayscale conversion", e))?;

        let kernel = self.config.blur_kernel_size;
        let mut blurred = Mat::default();
        gaussian_blur(
            &gray,
            &mut blurred,
            Size::new(kernel, kernel),
            0.0,
            0.0,
            BORDER_DEFAULT,
        )
        .map_err(|e| SegmentationError::opencv("Gaussian blur", e))?;

        Ok(blurred)
    }

    /// Binarize via Otsu's method; the threshold comes from the intensity
    /// histogram rather than a fixed value
    fn binarize(&self, blurred: &Mat) -> Result<Mat> {
        let mut binary = Mat::default();
        let selected = threshold(
            blurred,
            &mut binary,
            0.0,
            crate::constants::pipeline::THRESHOLD_MAX_VALUE,
            THRESH_BINARY | THRESH_OTSU,
        )
        .map_err(|e| SegmentationError::opencv("Otsu threshold", e))?;

        debug!("Otsu selected threshold {:.1}", selected);

        Ok(binary)
    }

    /// Opening removes isolated noise pixels; closing fills small gaps
    /// within true change regions
    fn clean_mask(&self, binary: &Mat) -> Result<Mat> {
        let size = self.config.morph_kernel_size;
        let kernel = get_structuring_element(MORPH_RECT, Size::new(size, size), Point::new(-1, -1))
            .map_err(|e| SegmentationError::opencv("Kernel creation", e))?;

        let mut opened = Mat::default();
        morphology_ex(
            binary,
            &mut opened,
            MORPH_OPEN,
            &kernel,
            Point::new(-1, -1),
            self.config.open_iterations,
            BORDER_CONSTANT,
            Scalar::default(),
        )
        .map_err(|e| SegmentationError::opencv("Morphological opening", e))?;

        let mut closed = Mat::default();
        morphology_ex(
            &opened,
            &mut closed,
            MORPH_CLOSE,
            &kernel,
            Point::new(-1, -1),
            self.config.close_iterations,
            BORDER_CONSTANT,
            Scalar::default(),
        )
        .map_err(|e| SegmentationError::opencv("Morphological closing", e))?;

        Ok(closed)
    }

    /// Extract external contours, drop those below the area threshold, and
    /// keep the bounding rectangle of the rest in discovery order
    fn extract_boxes(&self, mask: &Mat) -> Result<Vec<BoundingBox>> {
        let mut contours = Vector::<VectorOfPoint>::new();
        find_contours(
            mask,
            &mut contours,
            RETR_EXTERNAL,
            CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .map_err(|e| SegmentationError::opencv("Contour detection", e))?;

        debug!("Found {} raw contours", contours.len());

        let min_area = f64::from(self.config.min_area);
        let mut boxes = Vec::new();

        for contour in contours.iter() {
            let area = contour_area(&contour, false)
                .map_err(|e| SegmentationError::opencv("Area calculation", e))?;
            if area < min_area {
                continue;
            }

            let rect = bounding_rect(&contour)
                .map_err(|e| SegmentationError::opencv("Bounding rectangle", e))?;
            boxes.push(BoundingBox::from(rect));
        }

        debug!(
            "{} region(s) kept above min_area {}",
            boxes.len(),
            self.config.min_area
        );

        Ok(boxes)
    }
}
