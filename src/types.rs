use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Image-space coordinate in pixels.
pub type Point = Point2<f64>;

/// Boundary of a segmented region. Order only defines the point set.
pub type Contour = Vec<Point>;

/// Centre-based bounding box as reported by the segmentation service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Rectangle corners in traversal order, or `None` for an empty box.
    pub fn corners(&self) -> Option<[Point; 4]> {
        let valid = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !valid || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        Some([
            Point::new(self.x - hw, self.y - hh),
            Point::new(self.x + hw, self.y - hh),
            Point::new(self.x + hw, self.y + hh),
            Point::new(self.x - hw, self.y + hh),
        ])
    }
}

/// One segmented object after normalization.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detection {
    pub id: Option<String>,
    pub class_label: String,
    pub confidence: Option<f64>,
    pub contour: Contour,
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn new(contour: Contour, class_label: impl Into<String>) -> Self {
        Self {
            id: None,
            class_label: class_label.into(),
            confidence: None,
            contour,
            bbox: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

/// Pixel dimensions of the source image, when the upstream response carries them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn total_pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
