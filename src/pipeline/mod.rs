//! Axis pipeline: normalize → classify + geometry → report.
//!
//! Overview
//! - [`AxisPipeline::process`] turns one upstream response into an
//!   [`ImageAnalysis`]: every surviving detection with its category and axis
//!   (or failure reason), plus the image-level [`AnalysisReport`].
//! - [`AxisPipeline::process_with_diagnostics`] additionally returns a
//!   [`PipelineTrace`] with normalization counts, failure reasons and stage
//!   timings.
//! - Per-detection geometry is independent; with the `parallel` feature it
//!   runs on the rayon pool. Outcomes keep input order and the report is
//!   aggregated sequentially so results do not depend on scheduling.

mod outcome;
pub mod params;

pub use outcome::DetectionOutcome;
pub use params::{AnalysisParams, DEFAULT_CONFIDENCE_THRESHOLD, MIN_CONTOUR_POINTS};

use crate::diagnostics::{FailureCounts, PipelineTrace, TimingBreakdown};
use crate::normalize::normalize_response;
use crate::report::AnalysisReport;
use crate::types::{Detection, ImageInfo};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything computed for one image.
#[derive(Clone, Debug, Serialize)]
pub struct ImageAnalysis {
    pub image_info: Option<ImageInfo>,
    pub outcomes: Vec<DetectionOutcome>,
    pub report: AnalysisReport,
}

impl ImageAnalysis {
    /// Outcomes that produced an axis.
    pub fn with_axis(&self) -> impl Iterator<Item = &DetectionOutcome> {
        self.outcomes.iter().filter(|o| o.has_axis())
    }
}

/// Analysis together with its pipeline trace.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisOutput {
    pub analysis: ImageAnalysis,
    pub trace: PipelineTrace,
}

#[derive(Clone, Debug, Default)]
pub struct AxisPipeline {
    params: AnalysisParams,
}

impl AxisPipeline {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Run the pipeline on an upstream response, returning the analysis only.
    pub fn process(&self, response: &Value) -> ImageAnalysis {
        self.process_with_diagnostics(response).analysis
    }

    /// Run the pipeline and return both the analysis and a trace.
    pub fn process_with_diagnostics(&self, response: &Value) -> AnalysisOutput {
        let total_start = Instant::now();

        let normalize_start = Instant::now();
        let normalized = normalize_response(response, self.params.confidence_threshold);
        let normalize_ms = elapsed_ms(normalize_start);

        let geometry_start = Instant::now();
        let detections = normalized.detections.len();
        let outcomes = self.evaluate_all(normalized.detections);
        let geometry_ms = elapsed_ms(geometry_start);

        let report_start = Instant::now();
        let report = AnalysisReport::build(&outcomes, normalized.image_info);
        let report_ms = elapsed_ms(report_start);

        let mut failures = FailureCounts::default();
        for reason in outcomes.iter().filter_map(|o| o.failure.as_ref()) {
            failures.record(reason);
        }
        let bbox_fallbacks = outcomes.iter().filter(|o| o.used_bbox_fallback).count();

        let mut timing = TimingBreakdown::with_total(elapsed_ms(total_start));
        timing.push("normalize", normalize_ms);
        timing.push("geometry", geometry_ms);
        timing.push("report", report_ms);

        debug!(
            "AxisPipeline::process shape={:?} detections={} axes={} failures={} total_ms={:.3}",
            normalized.shape,
            detections,
            report.triangle_analysis.successful_triangles,
            failures.total(),
            timing.total_ms
        );

        AnalysisOutput {
            analysis: ImageAnalysis {
                image_info: normalized.image_info,
                outcomes,
                report,
            },
            trace: PipelineTrace {
                shape: normalized.shape,
                entries_seen: normalized.entries_seen,
                rejected_low_confidence: normalized.rejected_low_confidence,
                detections,
                bbox_fallbacks,
                failures,
                timing,
            },
        }
    }

    /// Analyze already-normalized detections. No confidence filtering is
    /// applied here.
    pub fn analyze(&self, detections: Vec<Detection>, image_info: Option<ImageInfo>) -> ImageAnalysis {
        let outcomes = self.evaluate_all(detections);
        let report = AnalysisReport::build(&outcomes, image_info);
        ImageAnalysis {
            image_info,
            outcomes,
            report,
        }
    }

    fn evaluate_all(&self, detections: Vec<Detection>) -> Vec<DetectionOutcome> {
        let params = &self.params;
        #[cfg(feature = "parallel")]
        {
            detections
                .into_par_iter()
                .enumerate()
                .map(|(index, det)| DetectionOutcome::evaluate(index, det, params))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            detections
                .into_iter()
                .enumerate()
                .map(|(index, det)| DetectionOutcome::evaluate(index, det, params))
                .collect()
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StrengthCategory;
    use crate::normalize::ShapeKind;
    use crate::types::Point;
    use serde_json::json;

    fn flat_response() -> Value {
        json!({
            "image_info": { "width": 100, "height": 50 },
            "detections": [
                { "class": "strong", "confidence": 0.9, "points": [[0, 0], [4, 0], [2, 1]] },
                { "class": "weak", "confidence": 0.2, "points": [[0, 0], [4, 0], [2, 1]] },
                { "class": "medium", "confidence": 0.6, "points": [[0, 0], [1, 1]] },
                { "class": "other", "points": [[0, 0], [1, 1], [2, 2]] }
            ]
        })
    }

    #[test]
    fn trace_counts_filtering_and_failures() {
        let out = AxisPipeline::default().process_with_diagnostics(&flat_response());
        let trace = &out.trace;
        assert_eq!(trace.shape, ShapeKind::Flat);
        assert_eq!(trace.entries_seen, 4);
        assert_eq!(trace.rejected_low_confidence, 1);
        assert_eq!(trace.detections, 3);
        assert_eq!(trace.failures.too_few_points, 1);
        assert_eq!(trace.failures.degenerate_hull, 1);
        assert_eq!(trace.timing.stages.len(), 3);

        let report = &out.analysis.report;
        assert_eq!(report.total_count, 3);
        assert_eq!(report.triangle_analysis.successful_triangles, 1);
        assert_eq!(report.image_info.map(|i| i.total_pixels), Some(5000));
    }

    #[test]
    fn outcomes_keep_input_order() {
        let analysis = AxisPipeline::default().process(&flat_response());
        let categories: Vec<_> = analysis.outcomes.iter().map(|o| o.category).collect();
        assert_eq!(
            categories,
            vec![
                StrengthCategory::Strong,
                StrengthCategory::Medium,
                StrengthCategory::Default
            ]
        );
        assert!(analysis.outcomes.iter().enumerate().all(|(i, o)| o.index == i));
        assert_eq!(analysis.with_axis().count(), 1);
    }

    #[test]
    fn analyze_skips_threshold() {
        let pipeline = AxisPipeline::new(AnalysisParams::default().with_confidence_threshold(0.95));
        let contour = vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 3.0)];
        let detections = vec![Detection::new(contour, "weak").with_confidence(0.1)];
        let analysis = pipeline.analyze(detections, None);
        assert_eq!(analysis.report.total_count, 1);
        assert_eq!(analysis.report.class_counts.weak, 1);
    }
}
