//! Points on spirals and circles, and the SVG path strings built from them.
//!
//! Angles for circular helpers follow one convention everywhere: degrees,
//! 0° at 12 o'clock, increasing clockwise in screen space.

use std::f32::consts::TAU;

pub type Point = (f32, f32);

/// Point at `degrees` on a circle of `radius` around `center`.
pub fn polar_point(center: Point, radius: f32, degrees: f32) -> Point {
    let rad = degrees.to_radians();
    (center.0 + radius * rad.sin(), center.1 - radius * rad.cos())
}

/// Traces an Archimedean spiral from `center` out to `max_radius`.
///
/// The spiral is flattened by `x_scale` / `y_scale` so a round spiral reads
/// as an inclined disc.
pub fn spiral_points(
    center: Point,
    start_angle: f32,
    count: usize,
    max_radius: f32,
    turns: f32,
    x_scale: f32,
    y_scale: f32,
) -> Vec<Point> {
    match count {
        0 => Vec::new(),
        1 => vec![center],
        _ => {
            let last = (count - 1) as f32;
            let start = start_angle.to_radians();
            (0..count)
                .map(|idx| {
                    let t = idx as f32 / last;
                    let angle = start + t * turns * TAU;
                    let radius = t * max_radius;
                    (
                        center.0 + radius * angle.cos() * x_scale,
                        center.1 + radius * angle.sin() * y_scale,
                    )
                })
                .collect()
        }
    }
}

/// Closed wedge path from `center` along the arc `start_deg..end_deg`.
///
/// A sweep of 360° or more draws the full circle as two half arcs; a sweep
/// of zero or less collapses to a single spoke.
pub fn arc_path(center: Point, radius: f32, start_deg: f32, end_deg: f32) -> String {
    let (cx, cy) = center;
    let sweep = end_deg - start_deg;
    if sweep >= 360.0 {
        return format!(
            "M {cx:.2} {top:.2} A {radius:.2} {radius:.2} 0 1 1 {cx:.2} {bottom:.2} A {radius:.2} {radius:.2} 0 1 1 {cx:.2} {top:.2} Z",
            top = cy - radius,
            bottom = cy + radius,
        );
    }
    let (x1, y1) = polar_point(center, radius, start_deg);
    if sweep <= 0.0 {
        return format!("M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} Z");
    }
    let (x2, y2) = polar_point(center, radius, end_deg);
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
    )
}

/// Smooths a polyline into quadratic Bezier segments through the midpoints.
pub fn quadratic_path(points: &[Point]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut d = format!("M {:.1} {:.1}", first.0, first.1);
    for pair in points.windows(2) {
        let (px, py) = pair[0];
        let (x, y) = pair[1];
        d.push_str(&format!(
            " Q {px:.1} {py:.1} {:.1} {:.1}",
            (px + x) / 2.0,
            (py + y) / 2.0
        ));
    }
    if let Some(last) = points.last() {
        d.push_str(&format!(" L {:.1} {:.1}", last.0, last.1));
    }
    d
}

/// Unit vector from `origin` towards `point`; `(0, 0)` when they coincide.
pub fn outward_normal(origin: Point, point: Point) -> Point {
    let dx = point.0 - origin.0;
    let dy = point.1 - origin.1;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= f32::EPSILON {
        (0.0, 0.0)
    } else {
        (dx / dist, dy / dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn polar_zero_is_up_and_ninety_is_right() {
        let (x, y) = polar_point((100.0, 100.0), 10.0, 0.0);
        assert!(close(x, 100.0) && close(y, 90.0));
        let (x, y) = polar_point((100.0, 100.0), 10.0, 90.0);
        assert!(close(x, 110.0) && close(y, 100.0));
    }

    #[test]
    fn spiral_degenerate_counts() {
        assert!(spiral_points((0.0, 0.0), 0.0, 0, 100.0, 1.0, 1.0, 1.0).is_empty());
        let single = spiral_points((425.0, 215.0), 25.0, 1, 180.0, 0.85, 1.65, 0.52);
        assert_eq!(single, vec![(425.0, 215.0)]);
    }

    #[test]
    fn spiral_starts_at_center_and_ends_at_scaled_radius() {
        let center = (425.0, 215.0);
        let points = spiral_points(center, 0.0, 30, 180.0, 1.0, 1.65, 0.52);
        assert_eq!(points.len(), 30);
        assert_eq!(points[0], center);
        // a whole number of turns lands back on the start angle
        let last = points[29];
        assert!(close(last.0, 425.0 + 180.0 * 1.65));
        assert!(close(last.1, 215.0));
    }

    #[test]
    fn spiral_is_deterministic() {
        let a = spiral_points((0.0, 0.0), 150.0, 30, 180.0, 0.85, 1.65, 0.52);
        let b = spiral_points((0.0, 0.0), 150.0, 30, 180.0, 0.85, 1.65, 0.52);
        assert_eq!(a, b);
    }

    #[test]
    fn full_circle_arc_is_closed_two_half_arcs() {
        let d = arc_path((50.0, 50.0), 20.0, 0.0, 360.0);
        assert_eq!(d.matches(" A ").count(), 2);
        assert!(d.starts_with("M 50.00 30.00"));
        assert!(d.ends_with("50.00 30.00 Z"));
    }

    #[test]
    fn zero_sweep_arc_is_a_spoke() {
        let d = arc_path((50.0, 50.0), 20.0, 90.0, 90.0);
        assert_eq!(d, "M 50.00 50.00 L 70.00 50.00 Z");
        assert!(!d.contains(" A "));
    }

    #[test]
    fn large_arc_flag_follows_sweep() {
        assert!(arc_path((0.0, 0.0), 10.0, 0.0, 90.0).contains(" 0 0 1 "));
        assert!(arc_path((0.0, 0.0), 10.0, 0.0, 270.0).contains(" 0 1 1 "));
    }

    #[test]
    fn quadratic_path_shapes() {
        assert_eq!(quadratic_path(&[]), "");
        assert_eq!(quadratic_path(&[(1.0, 2.0)]), "M 1.0 2.0 L 1.0 2.0");
        let d = quadratic_path(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(d, "M 0.0 0.0 Q 0.0 0.0 5.0 0.0 Q 10.0 0.0 10.0 5.0 L 10.0 10.0");
    }

    #[test]
    fn outward_normal_is_unit_or_zero() {
        let (nx, ny) = outward_normal((0.0, 0.0), (3.0, 4.0));
        assert!(close(nx, 0.6) && close(ny, 0.8));
        assert_eq!(outward_normal((1.0, 1.0), (1.0, 1.0)), (0.0, 0.0));
    }
}
