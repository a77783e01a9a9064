// Interface-label anchor rules. All functions are pure geometry over the
// already-offset endpoints; the renderer decides whether labels are drawn
// at all (`show_labels`).

use crate::config::GeometryConfig;
use crate::diagram::{ConnectorStyle, Side};

use super::primitives::{angle_between, distance};
use super::types::ConnectorEndpoint;

/// Slack added to the label distance when deciding a step route is too
/// cramped for full-distance label offsets.
const STEP_GAP_SLACK: f32 = 15.0;
/// Endpoints closer than this share their anchors outright.
const COINCIDENT_EPS: f32 = 1e-3;

/// Compute the two label anchors for a connector, each a style-specific
/// offset from its endpoint.
pub fn place_labels(
    source: &ConnectorEndpoint,
    target: &ConnectorEndpoint,
    style: &ConnectorStyle,
    config: &GeometryConfig,
) -> ((f32, f32), (f32, f32)) {
    match style {
        ConnectorStyle::Straight | ConnectorStyle::Bezier => {
            along_line(source.point, target.point, config.label_distance)
        }
        ConnectorStyle::Step | ConnectorStyle::SmoothStep => {
            vertical_clamped(source.point, target.point, config)
        }
        ConnectorStyle::Angle(direction) => {
            beside_bend(source.point, target.point, *direction, config.label_distance)
        }
    }
}

/// Anchors sit on the straight line between the endpoints, just off each
/// node toward the other one.
fn along_line(source: (f32, f32), target: (f32, f32), dist: f32) -> ((f32, f32), (f32, f32)) {
    if distance(source, target) <= COINCIDENT_EPS {
        return (source, target);
    }
    let angle = angle_between(source, target);
    let dx = angle.cos() * dist;
    let dy = angle.sin() * dist;
    (
        (source.0 + dx, source.1 + dy),
        (target.0 - dx, target.1 - dy),
    )
}

/// Step-style anchors offset vertically toward the opposite endpoint. In
/// cramped layouts the offset shrinks to half the vertical gap so the two
/// labels never cross each other or overshoot the segment.
fn vertical_clamped(
    source: (f32, f32),
    target: (f32, f32),
    config: &GeometryConfig,
) -> ((f32, f32), (f32, f32)) {
    let gap = (target.1 - source.1).abs();
    let offset = if gap < config.label_distance + STEP_GAP_SLACK {
        (gap / 2.0).min(config.label_distance)
    } else {
        config.label_distance
    };
    let sign = if target.1 >= source.1 { 1.0 } else { -1.0 };
    (
        (source.0, source.1 + sign * offset),
        (target.0, target.1 - sign * offset),
    )
}

/// Angle-style anchors offset perpendicular to the initial routing
/// segment, on the outward side of the bend. The sign comes from the
/// relative endpoint positions, so it is stable regardless of which node
/// is source and which is target.
fn beside_bend(
    source: (f32, f32),
    target: (f32, f32),
    direction: Side,
    dist: f32,
) -> ((f32, f32), (f32, f32)) {
    match direction {
        Side::Left | Side::Right => {
            let sign = if target.1 >= source.1 { -1.0 } else { 1.0 };
            (
                (source.0, source.1 + sign * dist),
                (target.0, target.1 + sign * dist),
            )
        }
        Side::Top | Side::Bottom => {
            let sign = if target.0 >= source.0 { -1.0 } else { 1.0 };
            (
                (source.0 + sign * dist, source.1),
                (target.0 + sign * dist, target.1),
            )
        }
    }
}
