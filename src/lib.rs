#![doc = include_str!("../README.md")]

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::classify::StrengthCategory;
pub use crate::error::{Error, Result};
pub use crate::pipeline::{
    AnalysisOutput, AnalysisParams, AxisPipeline, DetectionOutcome, ImageAnalysis,
};
pub use crate::report::AnalysisReport;
pub use crate::types::{BoundingBox, Contour, Detection, ImageInfo, Point};

pub use crate::diagnostics::PipelineTrace;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use follicle_axis::prelude::*;
///
/// let contour = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 1.0)];
/// let detections = vec![Detection::new(contour, "medium_hair").with_confidence(0.7)];
///
/// let analysis = AxisPipeline::default().analyze(detections, None);
/// assert_eq!(analysis.report.class_counts.medium, 1);
/// assert_eq!(analysis.report.dominant_category, Some(StrengthCategory::Medium));
/// ```
pub mod prelude {
    pub use crate::types::{Detection, ImageInfo, Point};
    pub use crate::{AnalysisParams, AnalysisReport, AxisPipeline, StrengthCategory};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::geometry::{
        convex_hull, extract_axis, fit_axis, hull_contains, smallest_triangle, Axis, AxisFit,
        FailureReason, Triangle, TriangleProperties,
    };
    pub use crate::normalize::{
        extract_contour, normalize_entry, normalize_response, NormalizedResponse, ResponseShape,
        ShapeKind,
    };
    pub use crate::report::{PerCategory, Ratio, ReportAccumulator};

    pub use crate::diagnostics::{FailureCounts, StageTiming, TimingBreakdown};
}
