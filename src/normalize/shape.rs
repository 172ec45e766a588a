//! Structural classification of upstream responses.

use serde::Serialize;
use serde_json::Value;

/// Upstream layouts recognised by the normalizer, classified by key presence.
#[derive(Clone, Copy, Debug)]
pub enum ResponseShape<'a> {
    /// Workflow output: `outputs[0].predictions.predictions[]`, or the bare
    /// `[0].predictions.predictions[]` list returned by the workflow client.
    Workflow {
        predictions: &'a [Value],
        /// `predictions.image`, when present.
        image: Option<&'a Value>,
    },
    /// Flat `detections[]` with an accompanying `image_info`.
    Flat {
        detections: &'a [Value],
        image_info: Option<&'a Value>,
    },
    Unrecognized,
}

/// Serializable tag of a [`ResponseShape`] for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Workflow,
    Flat,
    Unrecognized,
}

impl<'a> ResponseShape<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let first_output = match value {
            Value::Array(items) => items.first(),
            Value::Object(map) => map
                .get("outputs")
                .and_then(Value::as_array)
                .and_then(|outputs| outputs.first()),
            _ => None,
        };
        if let Some(shape) = first_output.and_then(workflow_predictions) {
            return shape;
        }

        if let Some(detections) = value.get("detections").and_then(Value::as_array) {
            return Self::Flat {
                detections,
                image_info: value.get("image_info").filter(|v| v.is_object()),
            };
        }

        Self::Unrecognized
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Workflow { .. } => ShapeKind::Workflow,
            Self::Flat { .. } => ShapeKind::Flat,
            Self::Unrecognized => ShapeKind::Unrecognized,
        }
    }

    /// Raw prediction entries, empty for unrecognized input.
    pub fn entries(&self) -> &'a [Value] {
        match self {
            Self::Workflow { predictions, .. } => predictions,
            Self::Flat { detections, .. } => detections,
            Self::Unrecognized => &[],
        }
    }

    /// The object expected to carry `width` / `height`.
    pub fn image_descriptor(&self) -> Option<&'a Value> {
        match self {
            Self::Workflow { image, .. } => *image,
            Self::Flat { image_info, .. } => *image_info,
            Self::Unrecognized => None,
        }
    }
}

fn workflow_predictions(output: &Value) -> Option<ResponseShape<'_>> {
    let block = output.get("predictions")?;
    let predictions = block.get("predictions")?.as_array()?;
    Some(ResponseShape::Workflow {
        predictions,
        image: block.get("image").filter(|v| v.is_object()),
    })
}
