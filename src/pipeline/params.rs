//! Parameters controlling normalization and geometry.
//!
//! Defaults match the segmentation workflow the pipeline is usually fed
//! from: a 0.4 confidence gate and the three-point minimum a triangle needs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.4;
/// Smallest contour that can yield a triangle.
pub const MIN_CONTOUR_POINTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Detections whose confidence is present and below this value are dropped.
    pub confidence_threshold: f64,
    /// Contours with fewer points are reported as failures without geometry.
    pub min_contour_points: usize,
    /// Substitute the bounding-box rectangle when a detection has no contour.
    pub bbox_fallback: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_contour_points: MIN_CONTOUR_POINTS,
            bbox_fallback: false,
        }
    }
}

impl AnalysisParams {
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::InvalidParameter {
                parameter: "confidence_threshold",
                value: self.confidence_threshold.to_string(),
                reason: "must lie in [0, 1]",
            });
        }
        if self.min_contour_points < MIN_CONTOUR_POINTS {
            return Err(Error::InvalidParameter {
                parameter: "min_contour_points",
                value: self.min_contour_points.to_string(),
                reason: "a triangle needs at least 3 points",
            });
        }
        Ok(())
    }
}
