use super::AnalysisParams;
use crate::classify::StrengthCategory;
use crate::geometry::{fit_axis, Axis, AxisFit, FailureReason};
use crate::types::{Detection, Point};
use log::debug;
use serde::Serialize;

/// One detection after classification and geometry.
///
/// Exactly one of `fit` and `failure` is set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectionOutcome {
    /// Position among the detections kept by the normalizer.
    pub index: usize,
    pub detection: Detection,
    pub category: StrengthCategory,
    pub fit: Option<AxisFit>,
    pub failure: Option<FailureReason>,
    /// Geometry ran on the bounding-box rectangle instead of a contour.
    pub used_bbox_fallback: bool,
}

impl DetectionOutcome {
    pub fn evaluate(index: usize, detection: Detection, params: &AnalysisParams) -> Self {
        let category = StrengthCategory::from_label(&detection.class_label);

        let fallback = if params.bbox_fallback && detection.contour.is_empty() {
            detection.bbox.and_then(|b| b.corners())
        } else {
            None
        };
        let points: &[Point] = match &fallback {
            Some(corners) => &corners[..],
            None => detection.contour.as_slice(),
        };

        let (fit, failure) = match fit_axis(points, params.min_contour_points) {
            Ok(fit) => (Some(fit), None),
            Err(reason) => {
                debug!(
                    "detection #{index} label={} has no axis: {reason:?}",
                    detection.class_label
                );
                (None, Some(reason))
            }
        };

        Self {
            index,
            used_bbox_fallback: fallback.is_some(),
            detection,
            category,
            fit,
            failure,
        }
    }

    pub fn axis(&self) -> Option<&Axis> {
        self.fit.as_ref().map(|f| &f.axis)
    }

    pub fn has_axis(&self) -> bool {
        self.fit.is_some()
    }
}
