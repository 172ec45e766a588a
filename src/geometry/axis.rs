use super::triangle::Triangle;
use crate::types::Point;
use nalgebra::{center, distance, Vector2};
use serde::Serialize;

/// Directed summary of one contour: from the midpoint of the shortest
/// triangle edge towards the opposite vertex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub base_midpoint: Point,
    pub apex: Point,
}

impl Axis {
    pub fn direction(&self) -> Vector2<f64> {
        self.apex - self.base_midpoint
    }

    pub fn length(&self) -> f64 {
        distance(&self.base_midpoint, &self.apex)
    }

    /// Angle of the direction in degrees, image axes (y grows downwards).
    /// `None` for a zero-length axis.
    pub fn angle_deg(&self) -> Option<f64> {
        let d = self.direction();
        if d.x == 0.0 && d.y == 0.0 {
            return None;
        }
        Some(d.y.atan2(d.x).to_degrees())
    }
}

/// Axis of `triangle`: the shortest of the edges (v0,v1), (v1,v2), (v2,v0)
/// becomes the base; on equal lengths the earlier edge in that order wins.
pub fn extract_axis(triangle: &Triangle) -> Axis {
    let edges = triangle.edges();
    let (mut start, mut end, mut apex) = edges[0];
    let mut best_len = distance(&start, &end);
    for &(a, b, opposite) in &edges[1..] {
        let len = distance(&a, &b);
        if len < best_len {
            best_len = len;
            start = a;
            end = b;
            apex = opposite;
        }
    }
    Axis {
        base_midpoint: center(&start, &end),
        apex,
    }
}
