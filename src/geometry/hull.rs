//! Monotone-chain convex hull.

use super::cross;
use crate::types::Point;
use std::cmp::Ordering;

/// Lexicographic order on (x, y); ties on x sort by ascending y.
fn lexicographic(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Counter-clockwise convex hull of `points`.
///
/// Points are sorted by (x, y), then a lower and an upper chain are built;
/// the last chain point is popped while the turn to the new point is not
/// strictly counter-clockwise (`cross <= 0`), which also removes collinear
/// and duplicate points. The chains are joined without their repeated
/// endpoints, so the hull starts at the lexicographically smallest point.
///
/// Returns `None` when fewer than three hull vertices remain. Non-finite
/// coordinates are ignored.
pub fn convex_hull(points: &[Point]) -> Option<Vec<Point>> {
    let mut sorted: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    if sorted.len() < 3 {
        return None;
    }
    sorted.sort_by(lexicographic);
    sorted.dedup();

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);

    (lower.len() >= 3).then_some(lower)
}

/// True when `p` lies inside or on the boundary of a counter-clockwise hull.
///
/// `tol` is the allowed negative cross product, in squared pixels, so points
/// on an edge survive floating-point noise.
pub fn hull_contains(hull: &[Point], p: Point, tol: f64) -> bool {
    if hull.len() < 3 {
        return false;
    }
    hull.iter()
        .zip(hull.iter().cycle().skip(1))
        .all(|(&a, &b)| cross(a, b, p) >= -tol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn square_hull_is_ccw_from_lowest_x() {
        let hull = convex_hull(&pts(&[(0.0, 3.0), (4.0, 3.0), (0.0, 0.0), (4.0, 0.0)])).unwrap();
        assert_eq!(hull, pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]));
    }

    #[test]
    fn interior_and_collinear_points_are_dropped() {
        let input = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (1.0, 1.0),
            (2.0, 3.0),
            (0.0, 2.0),
        ]);
        let hull = convex_hull(&input).unwrap();
        assert_eq!(hull, pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
    }

    #[test]
    fn duplicates_do_not_leak_into_hull() {
        let input = pts(&[(0.0, 0.0), (0.0, 0.0), (3.0, 0.0), (3.0, 0.0), (0.0, 3.0)]);
        let hull = convex_hull(&input).unwrap();
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn degenerate_inputs_have_no_hull() {
        assert!(convex_hull(&[]).is_none());
        assert!(convex_hull(&pts(&[(0.0, 0.0), (1.0, 1.0)])).is_none());
        assert!(convex_hull(&pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)])).is_none());
        assert!(convex_hull(&pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)])).is_none());
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let input = pts(&[(0.0, 0.0), (f64::NAN, 1.0), (2.0, 0.0), (0.0, 2.0)]);
        let hull = convex_hull(&input).unwrap();
        assert_eq!(hull, pts(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]));
    }

    #[test]
    fn containment_accepts_boundary_and_rejects_outside() {
        let hull = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert!(hull_contains(&hull, Point::new(2.0, 2.0), 0.0));
        assert!(hull_contains(&hull, Point::new(4.0, 2.0), 0.0));
        assert!(!hull_contains(&hull, Point::new(4.5, 2.0), 1e-9));
    }
}
