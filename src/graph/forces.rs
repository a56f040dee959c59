//! Position-based forces applied on top of the library step.
//!
//! The `force_graph` step handles many-body repulsion; link rest length and
//! centering are applied here, directly on positions, after each step.

use super::model::Link;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
	}
}

/// Pulls (or pushes) each linked pair toward `distance`.
///
/// Strength is `1 / min(degree)` of the two ends, and the correction is
/// split by degree so the better-connected end moves less. `degrees` is
/// indexed like `points`.
pub fn link(points: &mut [Point], links: &[Link], degrees: &[usize], distance: f64, alpha: f64) {
	for link in links {
		let (s, t) = (link.source, link.target);
		if s == t {
			continue;
		}
		let (dx, dy) = (points[t].x - points[s].x, points[t].y - points[s].y);
		let len = (dx * dx + dy * dy).sqrt();
		if len < 1e-9 {
			continue;
		}

		let (deg_s, deg_t) = (degrees[s].max(1) as f64, degrees[t].max(1) as f64);
		let strength = 1.0 / deg_s.min(deg_t);
		let bias = deg_s / (deg_s + deg_t);

		let l = (len - distance) / len * alpha * strength;
		let (fx, fy) = (dx * l, dy * l);
		points[t].x -= fx * bias;
		points[t].y -= fy * bias;
		points[s].x += fx * (1.0 - bias);
		points[s].y += fy * (1.0 - bias);
	}
}

/// Translates every point so the centroid lands on `center`.
pub fn center(points: &mut [Point], center: Point) {
	if points.is_empty() {
		return;
	}
	let n = points.len() as f64;
	let (sx, sy) = points
		.iter()
		.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
	let (shift_x, shift_y) = (center.x - sx / n, center.y - sy / n);
	for p in points.iter_mut() {
		p.x += shift_x;
		p.y += shift_y;
	}
}
