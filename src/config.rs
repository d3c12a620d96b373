//! Configuration for the change-detection pipeline.
//!
//! All tunable parameters live here. The CLI only surfaces `min_area` and
//! `merge_regions`; the remaining knobs keep the pipeline's fixed recipe as
//! defaults and exist for programmatic callers.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use segmentation::DetectionConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = DetectionConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = DetectionConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::constants::pipeline;
use crate::error::{Result, SegmentationError};
use serde::{Deserialize, Serialize};

/// Parameters for difference-and-box extraction.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum contour area in px² for a change region to be kept
    pub min_area: i32,

    /// Collapse all surviving boxes into one enclosing box
    pub merge_regions: bool,

    /// Gaussian blur kernel size (must be odd and positive)
    #[serde(default = "default_blur_kernel_size")]
    pub blur_kernel_size: i32,

    /// Structuring element size for open/close (must be odd and positive)
    #[serde(default = "default_morph_kernel_size")]
    pub morph_kernel_size: i32,

    /// Morphological opening iterations
    #[serde(default = "default_open_iterations")]
    pub open_iterations: i32,

    /// Morphological closing iterations
    #[serde(default = "default_close_iterations")]
    pub close_iterations: i32,
}

fn default_blur_kernel_size() -> i32 {
    pipeline::BLUR_KERNEL_SIZE
}

fn default_morph_kernel_size() -> i32 {
    pipeline::MORPH_KERNEL_SIZE
}

fn default_open_iterations() -> i32 {
    pipeline::OPEN_ITERATIONS
}

fn default_close_iterations() -> i32 {
    pipeline::CLOSE_ITERATIONS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_area: pipeline::DEFAULT_MIN_AREA,
            merge_regions: false,
            blur_kernel_size: pipeline::BLUR_KERNEL_SIZE,
            morph_kernel_size: pipeline::MORPH_KERNEL_SIZE,
            open_iterations: pipeline::OPEN_ITERATIONS,
            close_iterations: pipeline::CLOSE_ITERATIONS,
        }
    }
}

impl DetectionConfig {
    /// Create a configuration with the given area threshold and merge mode,
    /// keeping the fixed pipeline recipe for everything else
    pub fn new(min_area: i32, merge_regions: bool) -> Self {
        Self {
            min_area,
            merge_regions,
            ..Self::default()
        }
    }

    /// Check parameter consistency.
    ///
    /// Kernel sizes must be odd and positive; iteration counts must be
    /// positive. `min_area` is unrestricted: zero (or below) keeps every
    /// contour, including single-pixel noise.
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_size <= 0 || self.blur_kernel_size % 2 == 0 {
            return Err(SegmentationError::InvalidParameter {
                parameter: "blur_kernel_size".to_string(),
                value: self.blur_kernel_size.to_string(),
            });
        }
        if self.morph_kernel_size <= 0 || self.morph_kernel_size % 2 == 0 {
            return Err(SegmentationError::InvalidParameter {
                parameter: "morph_kernel_size".to_string(),
                value: self.morph_kernel_size.to_string(),
            });
        }
        if self.open_iterations < 1 {
            return Err(SegmentationError::InvalidParameter {
                parameter: "open_iterations".to_string(),
                value: self.open_iterations.to_string(),
            });
        }
        if self.close_iterations < 1 {
            return Err(SegmentationError::InvalidParameter {
                parameter: "close_iterations".to_string(),
                value: self.close_iterations.to_string(),
            });
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
