//! Whole-image statistics over classified detections.
//!
//! [`AnalysisReport`] is built once per image from every
//! [`DetectionOutcome`], including detections whose label falls into the
//! `default` category and detections without an axis. Empty input yields a
//! zero-filled report with `"N/A"` ratios.
//!
//! Counting goes through [`ReportAccumulator`], whose `merge` is
//! commutative for counts, so partial accumulators can be combined in any
//! order.

use crate::classify::StrengthCategory;
use crate::pipeline::DetectionOutcome;
use crate::types::ImageInfo;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel printed for a ratio whose divisor bucket is empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// One value per published bucket (strong, medium, weak).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PerCategory<T> {
    pub strong: T,
    pub medium: T,
    pub weak: T,
}

impl<T> PerCategory<T> {
    /// `None` for [`StrengthCategory::Default`], which has no bucket.
    pub fn get(&self, category: StrengthCategory) -> Option<&T> {
        match category {
            StrengthCategory::Strong => Some(&self.strong),
            StrengthCategory::Medium => Some(&self.medium),
            StrengthCategory::Weak => Some(&self.weak),
            StrengthCategory::Default => None,
        }
    }

    fn get_mut(&mut self, category: StrengthCategory) -> Option<&mut T> {
        match category {
            StrengthCategory::Strong => Some(&mut self.strong),
            StrengthCategory::Medium => Some(&mut self.medium),
            StrengthCategory::Weak => Some(&mut self.weak),
            StrengthCategory::Default => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrengthCategory, &T)> {
        StrengthCategory::BUCKETS
            .into_iter()
            .zip([&self.strong, &self.medium, &self.weak])
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerCategory<U> {
        PerCategory {
            strong: f(&self.strong),
            medium: f(&self.medium),
            weak: f(&self.weak),
        }
    }
}

/// Confidence summary of one bucket. All zero when the bucket is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ConfidenceStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Confidence summary across every detection, with population deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OverallConfidence {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TriangleAnalysis {
    pub successful_triangles: usize,
    /// Percentage in [0, 100]; 0 for an empty image.
    pub success_rate: f64,
}

/// Count ratio between two buckets, rendered as `"a:b"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ratio {
    Counts { numerator: usize, denominator: usize },
    /// The divisor bucket is empty.
    NotAvailable,
}

impl Ratio {
    pub fn between(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            Self::NotAvailable
        } else {
            Self::Counts {
                numerator,
                denominator,
            }
        }
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            Self::Counts {
                numerator,
                denominator,
            } => Some(numerator as f64 / denominator as f64),
            Self::NotAvailable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counts {
                numerator,
                denominator,
            } => write!(f, "{numerator}:{denominator}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ratios {
    /// strong : weak
    pub terminal_vellus: Ratio,
    /// strong : medium
    pub strong_medium: Ratio,
    pub strong_percentage: f64,
    pub medium_percentage: f64,
    pub weak_percentage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageStats {
    pub width: u32,
    pub height: u32,
    pub total_pixels: u64,
}

impl From<ImageInfo> for ImageStats {
    fn from(info: ImageInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
            total_pixels: info.total_pixels(),
        }
    }
}

/// Aggregate statistics for one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_count: usize,
    pub class_counts: PerCategory<usize>,
    pub class_percentages: PerCategory<f64>,
    pub confidence_stats: PerCategory<ConfidenceStats>,
    pub overall_confidence: OverallConfidence,
    pub triangle_analysis: TriangleAnalysis,
    pub ratios: Ratios,
    /// Bucket with the most detections; earlier buckets win ties.
    pub dominant_category: Option<StrengthCategory>,
    pub image_info: Option<ImageStats>,
}

impl AnalysisReport {
    pub fn build(outcomes: &[DetectionOutcome], image_info: Option<ImageInfo>) -> Self {
        outcomes
            .iter()
            .fold(ReportAccumulator::new(), |mut acc, outcome| {
                acc.record_outcome(outcome);
                acc
            })
            .finish(image_info)
    }

    pub fn empty() -> Self {
        ReportAccumulator::new().finish(None)
    }
}

#[derive(Clone, Copy, Debug)]
struct ConfidenceAccumulator {
    count: usize,
    sum: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
}

impl Default for ConfidenceAccumulator {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl ConfidenceAccumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    fn stats(&self) -> ConfidenceStats {
        if self.count == 0 {
            return ConfidenceStats::default();
        }
        ConfidenceStats {
            average: self.mean(),
            min: self.min,
            max: self.max,
            count: self.count,
        }
    }

    fn overall(&self) -> OverallConfidence {
        if self.count == 0 {
            return OverallConfidence::default();
        }
        let mean = self.mean();
        let variance = (self.sum_sq / self.count as f64 - mean * mean).max(0.0);
        OverallConfidence {
            average: mean,
            min: self.min,
            max: self.max,
            std: variance.sqrt(),
            count: self.count,
        }
    }
}

/// Running counts behind an [`AnalysisReport`].
#[derive(Clone, Debug, Default)]
pub struct ReportAccumulator {
    total: usize,
    successful: usize,
    counts: PerCategory<usize>,
    confidences: PerCategory<ConfidenceAccumulator>,
    overall: ConfidenceAccumulator,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one detection. Non-finite or missing confidences are counted
    /// in `total_count` but left out of the confidence statistics.
    pub fn record(&mut self, category: StrengthCategory, confidence: Option<f64>, axis_found: bool) {
        self.total += 1;
        if axis_found {
            self.successful += 1;
        }
        if let Some(count) = self.counts.get_mut(category) {
            *count += 1;
        }
        if let Some(c) = confidence.filter(|c| c.is_finite()) {
            self.overall.push(c);
            if let Some(acc) = self.confidences.get_mut(category) {
                acc.push(c);
            }
        }
    }

    pub fn record_outcome(&mut self, outcome: &DetectionOutcome) {
        self.record(
            outcome.category,
            outcome.detection.confidence,
            outcome.has_axis(),
        );
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.total += other.total;
        self.successful += other.successful;
        self.counts.strong += other.counts.strong;
        self.counts.medium += other.counts.medium;
        self.counts.weak += other.counts.weak;
        self.confidences.strong.merge(&other.confidences.strong);
        self.confidences.medium.merge(&other.confidences.medium);
        self.confidences.weak.merge(&other.confidences.weak);
        self.overall.merge(&other.overall);
        self
    }

    pub fn finish(self, image_info: Option<ImageInfo>) -> AnalysisReport {
        let total = self.total;
        let class_percentages = self.counts.map(|&count| percentage(count, total));

        let mut dominant_category = None;
        let mut dominant_count = 0usize;
        for (category, &count) in self.counts.iter() {
            if count > dominant_count {
                dominant_category = Some(category);
                dominant_count = count;
            }
        }

        AnalysisReport {
            total_count: total,
            class_counts: self.counts,
            class_percentages,
            confidence_stats: self.confidences.map(ConfidenceAccumulator::stats),
            overall_confidence: self.overall.overall(),
            triangle_analysis: TriangleAnalysis {
                successful_triangles: self.successful,
                success_rate: percentage(self.successful, total),
            },
            ratios: Ratios {
                terminal_vellus: Ratio::between(self.counts.strong, self.counts.weak),
                strong_medium: Ratio::between(self.counts.strong, self.counts.medium),
                strong_percentage: class_percentages.strong,
                medium_percentage: class_percentages.medium,
                weak_percentage: class_percentages.weak,
            },
            dominant_category,
            image_info: image_info.map(ImageStats::from),
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StrengthCategory::*;

    fn accumulate(rows: &[(StrengthCategory, Option<f64>, bool)]) -> ReportAccumulator {
        rows.iter().fold(ReportAccumulator::new(), |mut acc, &(c, conf, ok)| {
            acc.record(c, conf, ok);
            acc
        })
    }

    #[test]
    fn three_buckets_split_evenly() {
        let report = accumulate(&[
            (Strong, Some(0.9), true),
            (Medium, Some(0.5), true),
            (Weak, Some(0.2), true),
        ])
        .finish(None);
        assert_eq!(report.total_count, 3);
        assert_eq!(
            report.class_counts,
            PerCategory {
                strong: 1,
                medium: 1,
                weak: 1
            }
        );
        for (_, pct) in report.class_percentages.iter() {
            assert_eq!(format!("{pct:.1}"), "33.3");
        }
        assert_eq!(report.confidence_stats.strong.average, 0.9);
        assert_eq!(report.confidence_stats.weak.count, 1);
        assert_eq!(report.ratios.terminal_vellus.to_string(), "1:1");
        assert_eq!(report.dominant_category, Some(Strong));
    }

    #[test]
    fn empty_report_is_zero_filled() {
        let report = AnalysisReport::empty();
        assert_eq!(report.total_count, 0);
        assert!(report.class_percentages.iter().all(|(_, &p)| p == 0.0));
        assert_eq!(report.triangle_analysis.success_rate, 0.0);
        assert_eq!(report.ratios.terminal_vellus, Ratio::NotAvailable);
        assert_eq!(report.ratios.strong_medium.to_string(), NOT_AVAILABLE);
        assert_eq!(report.confidence_stats.medium, ConfidenceStats::default());
        assert_eq!(report.dominant_category, None);
    }

    #[test]
    fn default_category_counts_only_in_total() {
        let report = accumulate(&[
            (Strong, Some(0.8), true),
            (Default, Some(0.6), false),
            (Default, None, true),
            (Weak, Some(0.4), true),
        ])
        .finish(None);
        assert_eq!(report.total_count, 4);
        let bucket_sum = report.class_counts.strong + report.class_counts.medium + report.class_counts.weak;
        assert_eq!(bucket_sum, 2);
        assert_eq!(report.class_percentages.strong, 25.0);
        assert_eq!(report.triangle_analysis.successful_triangles, 3);
        assert_eq!(report.triangle_analysis.success_rate, 75.0);
        assert_eq!(report.overall_confidence.count, 3);
        assert_eq!(report.ratios.strong_medium, Ratio::NotAvailable);
    }

    #[test]
    fn confidence_bounds_and_deviation() {
        let report = accumulate(&[
            (Medium, Some(0.2), true),
            (Medium, Some(0.6), true),
            (Medium, None, true),
        ])
        .finish(None);
        let stats = report.confidence_stats.medium;
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.6);
        assert!((stats.average - 0.4).abs() < 1e-12);
        assert!((report.overall_confidence.std - 0.2).abs() < 1e-9);
    }

    #[test]
    fn merge_matches_sequential_counts() {
        let rows = [
            (Strong, Some(0.7), true),
            (Weak, Some(0.3), false),
            (Medium, Some(0.5), true),
            (Strong, Some(0.9), true),
            (Default, Some(0.1), false),
        ];
        let sequential = accumulate(&rows).finish(None);
        let merged = accumulate(&rows[3..])
            .merge(accumulate(&rows[..3]))
            .finish(None);
        assert_eq!(merged.total_count, sequential.total_count);
        assert_eq!(merged.class_counts, sequential.class_counts);
        assert_eq!(merged.triangle_analysis, sequential.triangle_analysis);
        assert_eq!(merged.ratios, sequential.ratios);
        assert_eq!(merged.confidence_stats.strong.max, 0.9);
        assert_eq!(merged.confidence_stats.strong.count, 2);
    }

    #[test]
    fn ratios_serialize_as_strings() {
        let report = accumulate(&[(Strong, None, true), (Strong, None, true), (Weak, None, true)])
            .finish(Some(ImageInfo {
                width: 20,
                height: 10,
            }));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ratios"]["terminal_vellus"], "2:1");
        assert_eq!(json["ratios"]["strong_medium"], "N/A");
        assert_eq!(json["class_counts"]["strong"], 2);
        assert_eq!(json["image_info"]["total_pixels"], 200);
        assert_eq!(report.ratios.terminal_vellus.value(), Some(2.0));
    }
}
