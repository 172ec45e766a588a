use follicle_axis::Point;
use serde_json::{json, Value};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Workflow-layout response wrapping `predictions`.
pub fn workflow_response(width: u32, height: u32, predictions: Value) -> Value {
    json!({
        "outputs": [{
            "predictions": {
                "image": { "width": width, "height": height },
                "predictions": predictions
            }
        }]
    })
}

/// Prediction entry with `{x, y}` points.
pub fn prediction(class: &str, confidence: f64, points: &[(f64, f64)]) -> Value {
    let points: Vec<Value> = points.iter().map(|&(x, y)| json!({ "x": x, "y": y })).collect();
    json!({ "class": class, "confidence": confidence, "points": points })
}

/// Thin elongated blob pointing along +x; shortest edge near the right end.
pub fn follicle_points(x0: f64, y0: f64) -> Vec<(f64, f64)> {
    vec![
        (x0, y0),
        (x0 + 10.0, y0 - 1.0),
        (x0 + 20.0, y0 - 2.0),
        (x0 + 20.0, y0 + 2.0),
        (x0 + 10.0, y0 + 1.0),
    ]
}

/// Deterministic linear congruential generator for property tests.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u64() as f64 / (1u64 << 53) as f64
    }

    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// `n` points in a `size × size` square, snapped to a quarter-pixel grid so
/// duplicates and collinear runs occur.
pub fn point_cloud(rng: &mut Lcg, n: usize, size: f64) -> Vec<Point> {
    (0..n)
        .map(|_| {
            let x = (rng.next_f64() * size * 4.0).floor() / 4.0;
            let y = (rng.next_f64() * size * 4.0).floor() / 4.0;
            Point::new(x, y)
        })
        .collect()
}

pub fn shuffled(rng: &mut Lcg, points: &[Point]) -> Vec<Point> {
    let mut out = points.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.below(i + 1);
        out.swap(i, j);
    }
    out
}
