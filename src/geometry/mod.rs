//! Directional-inference geometry: convex hull, minimal triangle and axis.
//!
//! The kernel reduces a contour to a single directed segment in three steps:
//!
//! - [`hull`] – monotone-chain convex hull, counter-clockwise, collinear
//!   points dropped.
//! - [`triangle`] – smallest-area triangle among all triples of hull
//!   vertices. This is a hull-restricted approximation of the minimal
//!   enclosing triangle and is kept that way so outputs stay reproducible.
//! - [`axis`] – base midpoint (shortest edge) → apex (opposite vertex).
//!
//! Every step is deterministic: enumeration orders used for tie-breaks are
//! fixed and documented on the respective functions.
//!
//! [`fit_axis`] chains the three steps and reports why a contour could not
//! produce an axis instead of failing.

pub mod axis;
pub mod hull;
pub mod triangle;

pub use axis::{extract_axis, Axis};
pub use hull::{convex_hull, hull_contains};
pub use triangle::{smallest_triangle, Triangle, TriangleProperties};

use crate::types::Point;
use serde::Serialize;

/// Z-component of `(a - o) × (b - o)`. Positive for a counter-clockwise turn.
#[inline]
pub(crate) fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a - o).perp(&(b - o))
}

/// Why a contour produced no axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    /// Fewer contour points than the configured minimum.
    TooFewPoints { found: usize, required: usize },
    /// Points are collinear or coincide; no hull with three vertices exists.
    DegenerateHull,
}

/// Successful geometry fit for one contour.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisFit {
    pub hull_size: usize,
    pub triangle: Triangle,
    pub properties: TriangleProperties,
    pub axis: Axis,
}

/// Run hull → triangle → axis on `points`.
///
/// `min_points` is checked against the raw point count before any geometry
/// is attempted.
pub fn fit_axis(points: &[Point], min_points: usize) -> Result<AxisFit, FailureReason> {
    if points.len() < min_points {
        return Err(FailureReason::TooFewPoints {
            found: points.len(),
            required: min_points,
        });
    }
    let hull = convex_hull(points).ok_or(FailureReason::DegenerateHull)?;
    let triangle = smallest_triangle(&hull).ok_or(FailureReason::DegenerateHull)?;
    Ok(AxisFit {
        hull_size: hull.len(),
        properties: triangle.properties(),
        axis: extract_axis(&triangle),
        triangle,
    })
}
