use crate::config::GeometryConfig;
use crate::diagram::{ConnectorRecord, Node, Side};

use super::primitives::{angle_between, perpendicular_offset};
use super::types::EndpointOffsets;

/// Fan-out displacement for a connector that shares its endpoint pair with
/// other connectors. Both ends receive the same offset so the connector
/// shifts as a parallel line instead of skewing.
///
/// Slots are assigned symmetrically around zero from the connector's index
/// in the (stably ordered) group, so re-running with the same connector
/// list always yields the same assignment.
pub fn pair_offset(
    a: &Node,
    b: &Node,
    connector_id: &str,
    connectors: &[ConnectorRecord],
    config: &GeometryConfig,
) -> EndpointOffsets {
    let group: Vec<&ConnectorRecord> = connectors
        .iter()
        .filter(|c| joins_pair(c, &a.id, &b.id))
        .collect();
    if group.len() <= 1 {
        return EndpointOffsets::default();
    }
    let Some(index) = group.iter().position(|c| c.id == connector_id) else {
        return EndpointOffsets::default();
    };

    let magnitude = slot_magnitude(index, group.len(), config.max_parallel_spacing, config);
    let (ac, bc) = (a.center(), b.center());
    if ac == bc {
        return EndpointOffsets::default();
    }
    let offset = perpendicular_offset(angle_between(ac, bc), magnitude);
    EndpointOffsets {
        source: offset,
        target: offset,
    }
}

/// Fan-out displacement for 90-degree connectors leaving the same source
/// node, regardless of destination. Uses a tighter spacing budget than the
/// pairwise case, and separates along the axis perpendicular to the
/// routing direction so fanned connectors stay parallel to their own run.
pub fn shared_source_offset(
    a: &Node,
    b: &Node,
    connector_id: &str,
    connectors: &[ConnectorRecord],
    direction: Side,
    config: &GeometryConfig,
) -> EndpointOffsets {
    let group: Vec<&ConnectorRecord> =
        connectors.iter().filter(|c| c.source == a.id).collect();
    if group.len() <= 1 {
        return EndpointOffsets::default();
    }
    let Some(index) = group.iter().position(|c| c.id == connector_id) else {
        return EndpointOffsets::default();
    };

    let magnitude = slot_magnitude(
        index,
        group.len(),
        config.max_parallel_spacing / 2.0,
        config,
    );
    // Separate across the dominant run: horizontally-running connectors
    // (explicit left/right routing, or simply more horizontal than
    // vertical) fan out vertically, and vice versa.
    let (ac, bc) = (a.center(), b.center());
    let dx = bc.0 - ac.0;
    let dy = bc.1 - ac.1;
    let vertical_separation =
        matches!(direction, Side::Left | Side::Right) || dx.abs() > dy.abs();
    let offset = if vertical_separation {
        (0.0, magnitude)
    } else {
        (magnitude, 0.0)
    };
    EndpointOffsets {
        source: offset,
        target: offset,
    }
}

/// Signed displacement for slot `index` of `count` packed connectors.
/// Spacing shrinks as the group grows but never drops below the floor.
fn slot_magnitude(index: usize, count: usize, budget: f32, config: &GeometryConfig) -> f32 {
    let spacing = (budget - count as f32).max(config.min_parallel_spacing);
    let center = (count as f32 - 1.0) / 2.0;
    (index as f32 - center) * spacing
}

fn joins_pair(connector: &ConnectorRecord, a_id: &str, b_id: &str) -> bool {
    (connector.source == a_id && connector.target == b_id)
        || (connector.source == b_id && connector.target == a_id)
}
