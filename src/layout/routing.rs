use std::collections::HashSet;

use crate::config::GeometryConfig;
use crate::diagram::{ConnectorStyle, Side};

use super::primitives::distance;
use super::types::{ConnectorEndpoint, RouteWarning};

/// Points closer than this are treated as coincident when building paths.
const POINT_EPS: f32 = 1e-4;
/// Corner radii below this render as sharp corners.
const MIN_CORNER_RADIUS: f32 = 0.01;

/// Append-only diagnostics for infeasible 90-degree routes. Deduplicated
/// per (connector, direction) so a connector that stays infeasible across
/// render passes surfaces exactly one warning. Owned by the caller for the
/// lifetime of the connector set; dropping and recreating it resets the
/// dedup state along with the connectors.
#[derive(Debug, Default)]
pub struct RouteDiagnostics {
    seen: HashSet<(String, Side)>,
    warnings: Vec<RouteWarning>,
}

impl RouteDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[RouteWarning] {
        &self.warnings
    }

    fn note_infeasible(&mut self, connector: &str, direction: Side) {
        if self.seen.insert((connector.to_string(), direction)) {
            self.warnings.push(RouteWarning {
                connector: connector.to_string(),
                direction,
            });
        }
    }
}

/// Build the SVG path for one connector. Endpoints must already carry any
/// fan-out offsets. Returns the path data and whether an infeasible
/// 90-degree request fell back to straight routing.
pub fn route(
    source: &ConnectorEndpoint,
    target: &ConnectorEndpoint,
    style: &ConnectorStyle,
    connector_id: &str,
    config: &GeometryConfig,
    diagnostics: &mut RouteDiagnostics,
) -> (String, bool) {
    match style {
        ConnectorStyle::Straight => (straight_path(source.point, target.point), false),
        ConnectorStyle::Bezier => (bezier_path(source, target), false),
        ConnectorStyle::Step => (
            polyline_path(&compress_path(&step_points(source, target))),
            false,
        ),
        ConnectorStyle::SmoothStep => (
            rounded_path(&step_points(source, target), config.corner_radius),
            false,
        ),
        ConnectorStyle::Angle(direction) => {
            if can_route_90(
                source.point,
                target.point,
                *direction,
                config.min_angle_clearance,
            ) {
                (angle_path(source.point, target.point, *direction), false)
            } else {
                diagnostics.note_infeasible(connector_id, *direction);
                (straight_path(source.point, target.point), true)
            }
        }
    }
}

/// A 90-degree route needs room to travel in its primary direction before
/// turning; without the clearance the two segments would double back.
pub fn can_route_90(
    source: (f32, f32),
    target: (f32, f32),
    direction: Side,
    clearance: f32,
) -> bool {
    match direction {
        Side::Right => target.0 - source.0 >= clearance,
        Side::Left => source.0 - target.0 >= clearance,
        Side::Top => source.1 - target.1 >= clearance,
        Side::Bottom => target.1 - source.1 >= clearance,
    }
}

fn straight_path(a: (f32, f32), b: (f32, f32)) -> String {
    format!("M {:.2} {:.2} L {:.2} {:.2}", a.0, a.1, b.0, b.1)
}

/// Exactly two segments: primary-direction leg first, then the
/// perpendicular leg into the target.
fn angle_path(source: (f32, f32), target: (f32, f32), direction: Side) -> String {
    let corner = match direction {
        Side::Left | Side::Right => (target.0, source.1),
        Side::Top | Side::Bottom => (source.0, target.1),
    };
    format!(
        "M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2}",
        source.0, source.1, corner.0, corner.1, target.0, target.1
    )
}

/// Push a control point out from `point` along its side, so the curve
/// leaves the node face-on before turning toward the other end.
fn control_point(point: (f32, f32), side: Side, reach: f32) -> (f32, f32) {
    match side {
        Side::Left => (point.0 - reach, point.1),
        Side::Right => (point.0 + reach, point.1),
        Side::Top => (point.0, point.1 - reach),
        Side::Bottom => (point.0, point.1 + reach),
    }
}

fn bezier_path(source: &ConnectorEndpoint, target: &ConnectorEndpoint) -> String {
    let reach = distance(source.point, target.point) / 2.0;
    let c1 = control_point(source.point, source.side, reach);
    let c2 = control_point(target.point, target.side, reach);
    format!(
        "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
        source.point.0, source.point.1, c1.0, c1.1, c2.0, c2.1, target.point.0, target.point.1
    )
}

/// One-bend orthogonal route through the midpoint of the primary axis.
/// The primary axis follows the side the source anchor emerges from.
fn step_points(source: &ConnectorEndpoint, target: &ConnectorEndpoint) -> Vec<(f32, f32)> {
    let (sx, sy) = source.point;
    let (tx, ty) = target.point;
    match source.side {
        Side::Left | Side::Right => {
            let mid_x = (sx + tx) / 2.0;
            vec![(sx, sy), (mid_x, sy), (mid_x, ty), (tx, ty)]
        }
        Side::Top | Side::Bottom => {
            let mid_y = (sy + ty) / 2.0;
            vec![(sx, sy), (sx, mid_y), (tx, mid_y), (tx, ty)]
        }
    }
}

/// Drop duplicate and collinear interior points so degenerate step routes
/// collapse to the simplest polyline.
fn compress_path(points: &[(f32, f32)]) -> Vec<(f32, f32)> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out: Vec<(f32, f32)> = Vec::with_capacity(points.len());
    out.push(points[0]);
    for idx in 1..points.len() - 1 {
        let prev = out[out.len() - 1];
        let curr = points[idx];
        if (curr.0 - prev.0).abs() <= POINT_EPS && (curr.1 - prev.1).abs() <= POINT_EPS {
            continue;
        }
        let next = points[idx + 1];
        let dx1 = curr.0 - prev.0;
        let dy1 = curr.1 - prev.1;
        let dx2 = next.0 - curr.0;
        let dy2 = next.1 - curr.1;
        if (dx1.abs() <= POINT_EPS && dx2.abs() <= POINT_EPS)
            || (dy1.abs() <= POINT_EPS && dy2.abs() <= POINT_EPS)
        {
            continue;
        }
        out.push(curr);
    }
    let last = points[points.len() - 1];
    let tail = out[out.len() - 1];
    if (last.0 - tail.0).abs() > POINT_EPS || (last.1 - tail.1).abs() > POINT_EPS {
        out.push(last);
    }
    out
}

fn polyline_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

/// Polyline with each interior corner replaced by a quadratic arc. The
/// radius is clamped to half of both adjacent segments so arcs never
/// overlap on short legs.
fn rounded_path(points: &[(f32, f32)], radius: f32) -> String {
    let points = compress_path(points);
    if points.len() < 2 {
        return String::new();
    }
    if points.len() == 2 || radius <= MIN_CORNER_RADIUS {
        return polyline_path(&points);
    }
    let mut d = format!("M {:.2} {:.2}", points[0].0, points[0].1);
    for idx in 1..points.len() - 1 {
        let prev = points[idx - 1];
        let corner = points[idx];
        let next = points[idx + 1];
        let r = radius
            .min(distance(prev, corner) / 2.0)
            .min(distance(corner, next) / 2.0);
        if r <= MIN_CORNER_RADIUS {
            d.push_str(&format!(" L {:.2} {:.2}", corner.0, corner.1));
            continue;
        }
        let entry = point_toward(corner, prev, r);
        let exit = point_toward(corner, next, r);
        d.push_str(&format!(
            " L {:.2} {:.2} Q {:.2} {:.2}, {:.2} {:.2}",
            entry.0, entry.1, corner.0, corner.1, exit.0, exit.1
        ));
    }
    let last = points[points.len() - 1];
    d.push_str(&format!(" L {:.2} {:.2}", last.0, last.1));
    d
}

fn point_toward(from: (f32, f32), to: (f32, f32), dist: f32) -> (f32, f32) {
    let len = distance(from, to);
    if len <= POINT_EPS {
        return from;
    }
    (
        from.0 + (to.0 - from.0) * dist / len,
        from.1 + (to.1 - from.1) * dist / len,
    )
}
