//! Diagnostics returned alongside an [`ImageAnalysis`](crate::ImageAnalysis).
//!
//! Overview
//! - [`PipelineTrace`] records what the normalizer saw, how many detections
//!   failed geometry and why, and per-stage timings.
//! - [`TimingBreakdown`] holds wall-clock stage timings in milliseconds.

use crate::geometry::FailureReason;
use crate::normalize::ShapeKind;
use serde::{Deserialize, Serialize};

/// Timing entry describing a single pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Geometry failures by reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureCounts {
    pub too_few_points: usize,
    pub degenerate_hull: usize,
}

impl FailureCounts {
    pub fn record(&mut self, reason: &FailureReason) {
        match reason {
            FailureReason::TooFewPoints { .. } => self.too_few_points += 1,
            FailureReason::DegenerateHull => self.degenerate_hull += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.too_few_points + self.degenerate_hull
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub shape: ShapeKind,
    pub entries_seen: usize,
    pub rejected_low_confidence: usize,
    /// Detections that reached the geometry stage.
    pub detections: usize,
    pub bbox_fallbacks: usize,
    pub failures: FailureCounts,
    pub timing: TimingBreakdown,
}
