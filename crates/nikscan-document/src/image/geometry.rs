// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry for skew estimation — convex hull and minimum-area rectangle.

use imageproc::point::Point;

/// A rotated rectangle enclosing a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinAreaRect {
    pub center: Point<f64>,
    /// Extent along the edge direction given by `angle`.
    pub width: f64,
    /// Extent perpendicular to `angle`.
    pub height: f64,
    /// Direction of one rectangle edge, in degrees, as `atan2(dy, dx)`.
    pub angle: f64,
}

impl MinAreaRect {
    /// The rectangle's angle folded into `[-90, 0)`.
    ///
    /// A rectangle's edges repeat every 90°, so any edge direction describes
    /// the same box. An axis-aligned box reports `-90`.
    pub fn legacy_angle(&self) -> f64 {
        let folded = self.angle.rem_euclid(90.0) - 90.0;
        // rem_euclid can return exactly 90.0 for tiny negative inputs.
        if folded >= 0.0 { folded - 90.0 } else { folded }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Convex hull by Andrew's monotone chain, counter-clockwise, without
/// collinear points. Fewer than three distinct points come back as-is
/// (deduplicated).
pub fn convex_hull(points: &[Point<f64>]) -> Vec<Point<f64>> {
    let mut sorted: Vec<Point<f64>> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    sorted.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point<f64>> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point<f64>> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // The last point of each chain is the first point of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Minimum-area enclosing rectangle via rotating calipers over the convex hull.
///
/// Returns `None` for an empty point set. A single point gives a zero-sized
/// rectangle at angle 0; collinear points give a zero-height rectangle along
/// the line.
pub fn min_area_rect(points: &[Point<f64>]) -> Option<MinAreaRect> {
    let hull = convex_hull(points);

    match hull.len() {
        0 => return None,
        1 => {
            return Some(MinAreaRect {
                center: hull[0],
                width: 0.0,
                height: 0.0,
                angle: 0.0,
            });
        }
        _ => {}
    }

    let n = hull.len();
    let mut best: Option<MinAreaRect> = None;

    for i in 0..n {
        let origin = hull[i];
        let next = hull[(i + 1) % n];
        let (ex, ey) = (next.x - origin.x, next.y - origin.y);
        let length = (ex * ex + ey * ey).sqrt();
        if length < f64::EPSILON {
            continue;
        }
        let (ux, uy) = (ex / length, ey / length);
        let (vx, vy) = (-uy, ux);

        let mut min_u = f64::MAX;
        let mut max_u = f64::MIN;
        let mut min_v = f64::MAX;
        let mut max_v = f64::MIN;
        for p in &hull {
            let (dx, dy) = (p.x - origin.x, p.y - origin.y);
            let along = ux * dx + uy * dy;
            let across = vx * dx + vy * dy;
            min_u = min_u.min(along);
            max_u = max_u.max(along);
            min_v = min_v.min(across);
            max_v = max_v.max(across);
        }

        let width = max_u - min_u;
        let height = max_v - min_v;
        if best.is_some_and(|rect| rect.area() <= width * height) {
            continue;
        }

        let mid_u = (min_u + max_u) / 2.0;
        let mid_v = (min_v + max_v) / 2.0;
        best = Some(MinAreaRect {
            center: Point::new(
                origin.x + mid_u * ux + mid_v * vx,
                origin.y + mid_u * uy + mid_v * vy,
            ),
            width,
            height,
            angle: uy.atan2(ux).to_degrees(),
        });
    }

    best
}

fn cross(o: Point<f64>, a: Point<f64>, b: Point<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}
