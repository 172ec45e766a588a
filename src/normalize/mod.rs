//! Detection normalization for heterogeneous segmentation responses.
//!
//! Overview
//! - [`ResponseShape::classify`] inspects key presence to tell the workflow
//!   layout (`outputs[0].predictions.predictions[]`) from the flat layout
//!   (`detections[]` + `image_info`). Anything else is unrecognized and
//!   normalizes to zero detections.
//! - Each entry becomes a [`Detection`]. Entries whose confidence is present
//!   and below the threshold are dropped; a missing confidence passes.
//! - Contours are extracted by [`points::extract_contour`]. A missing or
//!   malformed polygon keeps the detection with an empty contour, which the
//!   geometry stage later records as a failed axis.
//!
//! The normalizer never fails.

pub mod points;
pub mod shape;

pub use points::{coerce_f64, extract_contour};
pub use shape::{ResponseShape, ShapeKind};

use crate::types::{BoundingBox, Detection, ImageInfo};
use log::debug;
use serde::Serialize;
use serde_json::Value;

/// Class label used when an entry carries none.
pub const UNKNOWN_CLASS: &str = "unknown";

/// Output of [`normalize_response`].
#[derive(Clone, Debug, Serialize)]
pub struct NormalizedResponse {
    pub shape: ShapeKind,
    pub image_info: Option<ImageInfo>,
    pub detections: Vec<Detection>,
    /// Entries found in the response before confidence filtering.
    pub entries_seen: usize,
    /// Entries dropped because their confidence was below the threshold.
    pub rejected_low_confidence: usize,
}

/// Convert an upstream response into detections at or above
/// `confidence_threshold`.
pub fn normalize_response(response: &Value, confidence_threshold: f64) -> NormalizedResponse {
    let shape = ResponseShape::classify(response);
    let entries = shape.entries();
    let image_info = shape.image_descriptor().and_then(parse_image_info);

    let mut detections = Vec::with_capacity(entries.len());
    let mut rejected_low_confidence = 0usize;
    for entry in entries.iter().filter(|e| e.is_object()) {
        let detection = normalize_entry(entry);
        match detection.confidence {
            Some(c) if c < confidence_threshold => rejected_low_confidence += 1,
            _ => detections.push(detection),
        }
    }

    debug!(
        "normalize: shape={:?} entries={} kept={} below_threshold={} threshold={:.3}",
        shape.kind(),
        entries.len(),
        detections.len(),
        rejected_low_confidence,
        confidence_threshold
    );

    NormalizedResponse {
        shape: shape.kind(),
        image_info,
        detections,
        entries_seen: entries.len(),
        rejected_low_confidence,
    }
}

/// Build a [`Detection`] from one prediction entry without filtering.
pub fn normalize_entry(entry: &Value) -> Detection {
    let class_label = entry
        .get("class")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_CLASS)
        .to_string();
    let id = ["detection_id", "id"]
        .iter()
        .filter_map(|k| entry.get(*k))
        .find_map(id_string);

    Detection {
        id,
        class_label,
        confidence: entry.get("confidence").and_then(coerce_f64),
        contour: extract_contour(entry),
        bbox: parse_bbox(entry),
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_bbox(entry: &Value) -> Option<BoundingBox> {
    let width = entry.get("width").and_then(coerce_f64)?;
    let height = entry.get("height").and_then(coerce_f64)?;
    Some(BoundingBox {
        x: entry.get("x").and_then(coerce_f64).unwrap_or(0.0),
        y: entry.get("y").and_then(coerce_f64).unwrap_or(0.0),
        width,
        height,
    })
}

fn parse_image_info(descriptor: &Value) -> Option<ImageInfo> {
    let dim = |key: &str| {
        descriptor
            .get(key)
            .and_then(coerce_f64)
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v.round() as u32)
    };
    Some(ImageInfo {
        width: dim("width")?,
        height: dim("height")?,
    })
}
