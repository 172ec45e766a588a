//! Smallest-area triangle over hull vertices.

use super::cross;
use crate::types::Point;
use nalgebra::{distance, Point2};
use serde::Serialize;

/// Three vertices in a fixed order; edge `i` joins vertex `i` and `(i + 1) % 3`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

/// Derived measurements of a [`Triangle`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TriangleProperties {
    pub area: f64,
    pub perimeter: f64,
    /// Lengths of edges (v0,v1), (v1,v2), (v2,v0).
    pub sides: [f64; 3],
    pub shortest_side: f64,
    pub longest_side: f64,
    pub centroid: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Half the absolute cross product of `(v1 - v0)` and `(v2 - v0)`.
    #[inline]
    pub fn area(&self) -> f64 {
        let [p0, p1, p2] = self.vertices;
        cross(p0, p1, p2).abs() * 0.5
    }

    /// Edges as `(start, end, opposite)` in enumeration order.
    pub fn edges(&self) -> [(Point, Point, Point); 3] {
        let [v0, v1, v2] = self.vertices;
        [(v0, v1, v2), (v1, v2, v0), (v2, v0, v1)]
    }

    pub fn side_lengths(&self) -> [f64; 3] {
        self.edges().map(|(a, b, _)| distance(&a, &b))
    }

    pub fn properties(&self) -> TriangleProperties {
        let sides = self.side_lengths();
        let [v0, v1, v2] = self.vertices;
        let centroid = Point2::from((v0.coords + v1.coords + v2.coords) / 3.0);
        TriangleProperties {
            area: self.area(),
            perimeter: sides.iter().sum(),
            sides,
            shortest_side: sides.iter().copied().fold(f64::INFINITY, f64::min),
            longest_side: sides.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            centroid,
        }
    }
}

/// Minimal-area triangle among all `C(h, 3)` triples of `hull` vertices.
///
/// Triples are visited with `i < j < k` in increasing lexicographic order and
/// only a strictly smaller area replaces the current best, so the first
/// minimal triple wins. Cost is `O(h³)`; hulls of segmented contours are
/// small. Returns `None` for fewer than three vertices.
pub fn smallest_triangle(hull: &[Point]) -> Option<Triangle> {
    let n = hull.len();
    if n < 3 {
        return None;
    }
    let mut best: Option<(f64, Triangle)> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let candidate = Triangle::new(hull[i], hull[j], hull[k]);
                let area = candidate.area();
                match best {
                    Some((best_area, _)) if area >= best_area => {}
                    _ => best = Some((area, candidate)),
                }
            }
        }
    }
    best.map(|(_, tri)| tri)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn area_is_orientation_independent() {
        let ccw = Triangle::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0));
        let cw = Triangle::new(Point::new(0.0, 0.0), Point::new(0.0, 3.0), Point::new(4.0, 0.0));
        assert_eq!(ccw.area(), 6.0);
        assert_eq!(cw.area(), 6.0);
    }

    #[test]
    fn three_vertex_hull_returns_itself() {
        let hull = pts(&[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)]);
        let tri = smallest_triangle(&hull).unwrap();
        assert_eq!(tri.vertices.to_vec(), hull);
    }

    #[test]
    fn ties_keep_first_enumerated_triple() {
        let hull = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]);
        let tri = smallest_triangle(&hull).unwrap();
        assert_eq!(tri.vertices.to_vec(), pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]));
    }

    #[test]
    fn picks_thin_corner_of_pentagon() {
        // (5, 0.4) sits just below the chord (4, 0)-(6, 1).
        let hull = pts(&[(0.0, 0.0), (4.0, 0.0), (5.0, 0.4), (6.0, 1.0), (0.0, 6.0)]);
        let tri = smallest_triangle(&hull).unwrap();
        assert_eq!(tri.vertices.to_vec(), pts(&[(4.0, 0.0), (5.0, 0.4), (6.0, 1.0)]));
    }

    #[test]
    fn too_small_hull_has_no_triangle() {
        assert!(smallest_triangle(&pts(&[(0.0, 0.0), (1.0, 0.0)])).is_none());
    }

    #[test]
    fn properties_of_right_triangle() {
        let tri = Triangle::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 3.0));
        let props = tri.properties();
        assert_eq!(props.sides, [4.0, 3.0, 5.0]);
        assert_eq!(props.perimeter, 12.0);
        assert_eq!(props.shortest_side, 3.0);
        assert_eq!(props.longest_side, 5.0);
        assert!((props.centroid.x - 8.0 / 3.0).abs() < 1e-12);
        assert!((props.centroid.y - 1.0).abs() < 1e-12);
    }
}
