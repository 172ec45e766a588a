//! Contour extraction from a single prediction entry.
//!
//! Polygon encodings are tried in order: `points`, then a flat
//! `polygon`/`poly` coordinate list, then a `segmentation`/`mask` object, then
//! a `segments`/`polygons` list (longest wins). Points may be `{x, y}`
//! objects or `[x, y]` pairs. Entries missing a coordinate are skipped; a
//! coordinate that is present but not numeric makes the whole contour empty.

use crate::types::{Contour, Point};
use serde_json::Value;

/// Numeric coercion for JSON numbers and numeric strings.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Contour of `entry`; empty when no usable polygon is found.
pub fn extract_contour(entry: &Value) -> Contour {
    match try_extract(entry) {
        Ok(contour) => contour,
        Err(Malformed) => Vec::new(),
    }
}

#[derive(Debug)]
struct Malformed;

fn try_extract(entry: &Value) -> Result<Contour, Malformed> {
    if let Some(list) = entry.get("points").and_then(Value::as_array) {
        let contour = parse_point_list(list)?;
        if !contour.is_empty() {
            return Ok(contour);
        }
    }

    if let Some(flat) = first_present(entry, &["polygon", "poly"]).and_then(Value::as_array) {
        if flat.len() >= 6 {
            return parse_flat_list(flat);
        }
    }

    if let Some(seg) = first_present(entry, &["segmentation", "mask", "points_polygon"]) {
        if seg.is_object() {
            if let Some(list) = first_present(seg, &["points", "polygon"]).and_then(Value::as_array) {
                let contour = parse_point_list(list)?;
                if !contour.is_empty() {
                    return Ok(contour);
                }
            }
        }
    }

    if let Some(polygons) = first_present(entry, &["segments", "polygons"]).and_then(Value::as_array) {
        let mut best: Contour = Vec::new();
        for polygon in polygons.iter().filter_map(Value::as_array) {
            let candidate = parse_point_list(polygon)?;
            if candidate.len() > best.len() {
                best = candidate;
            }
        }
        if !best.is_empty() {
            return Ok(best);
        }
    }

    Ok(Vec::new())
}

/// First of `keys` holding a value that is neither null nor empty.
fn first_present<'a>(entry: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| entry.get(*k)).find(|v| match v {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn parse_point_list(list: &[Value]) -> Result<Contour, Malformed> {
    let mut contour = Vec::with_capacity(list.len());
    for item in list {
        if let Some(p) = parse_point(item)? {
            contour.push(p);
        }
    }
    Ok(contour)
}

fn parse_point(item: &Value) -> Result<Option<Point>, Malformed> {
    let (x, y) = match item {
        Value::Object(map) => match (map.get("x"), map.get("y")) {
            (Some(x), Some(y)) => (x, y),
            _ => return Ok(None),
        },
        Value::Array(pair) if pair.len() >= 2 => (&pair[0], &pair[1]),
        _ => return Ok(None),
    };
    match (coerce_f64(x), coerce_f64(y)) {
        (Some(x), Some(y)) => Ok(Some(Point::new(x, y))),
        _ => Err(Malformed),
    }
}

fn parse_flat_list(flat: &[Value]) -> Result<Contour, Malformed> {
    flat.chunks_exact(2)
        .map(|pair| match (coerce_f64(&pair[0]), coerce_f64(&pair[1])) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(Malformed),
        })
        .collect()
}
