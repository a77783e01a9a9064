mod anchors;
mod fanout;
mod label_placement;
mod overlap;
mod primitives;
mod routing;
pub(crate) mod types;

pub use anchors::boundary_anchor;
pub use fanout::{pair_offset, shared_source_offset};
pub use label_placement::place_labels;
pub use overlap::{OverlapReport, detect_overlap};
pub use routing::{RouteDiagnostics, can_route_90, route};
pub use types::*;

use std::collections::BTreeMap;

use crate::config::GeometryConfig;
use crate::diagram::{ConnectorRecord, ConnectorStyle, Diagram, Node};

/// Plan every renderable connector in the diagram, in input order.
/// Connectors whose endpoints are missing or not yet measured are skipped
/// for this pass; the host retries them once measurements arrive.
pub fn plan_diagram(
    diagram: &Diagram,
    config: &GeometryConfig,
    diagnostics: &mut RouteDiagnostics,
) -> Vec<ConnectorPath> {
    let nodes = diagram.node_index();
    diagram
        .connectors
        .iter()
        .filter_map(|connector| {
            plan_connector(connector, &nodes, &diagram.connectors, config, diagnostics)
        })
        .collect()
}

/// Full geometry pass for one connector: boundary anchors, fan-out
/// offsets, routing, label anchors. Returns None when the connector is not
/// renderable this pass (unknown node id, or a node still measuring).
pub fn plan_connector(
    connector: &ConnectorRecord,
    nodes: &BTreeMap<&str, &Node>,
    connectors: &[ConnectorRecord],
    config: &GeometryConfig,
    diagnostics: &mut RouteDiagnostics,
) -> Option<ConnectorPath> {
    let source = *nodes.get(connector.source.as_str())?;
    let target = *nodes.get(connector.target.as_str())?;
    if !source.is_measured() || !target.is_measured() {
        return None;
    }

    let mut source_end = boundary_anchor(source, target, config);
    let mut target_end = boundary_anchor(target, source, config);

    let offsets = match connector.style {
        ConnectorStyle::Angle(direction) => {
            shared_source_offset(source, target, &connector.id, connectors, direction, config)
        }
        _ => pair_offset(source, target, &connector.id, connectors, config),
    };
    source_end.point.0 += offsets.source.0;
    source_end.point.1 += offsets.source.1;
    target_end.point.0 += offsets.target.0;
    target_end.point.1 += offsets.target.1;

    let (svg_path, fell_back) = route(
        &source_end,
        &target_end,
        &connector.style,
        &connector.id,
        config,
        diagnostics,
    );
    let (source_label_anchor, target_label_anchor) =
        place_labels(&source_end, &target_end, &connector.style, config);

    Some(ConnectorPath {
        id: connector.id.clone(),
        svg_path,
        source_label_anchor,
        target_label_anchor,
        fell_back,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Side;

    fn node(id: &str, x: f32, y: f32, width: f32, height: f32) -> Node {
        Node {
            id: id.to_string(),
            label: String::new(),
            x,
            y,
            width,
            height,
        }
    }

    fn link(id: &str, source: &str, target: &str, style: ConnectorStyle) -> ConnectorRecord {
        ConnectorRecord {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            style,
            source_label: String::new(),
            target_label: String::new(),
            show_labels: true,
        }
    }

    fn diagram(nodes: Vec<Node>, connectors: Vec<ConnectorRecord>) -> Diagram {
        Diagram { nodes, connectors }
    }

    #[test]
    fn straight_connector_between_horizontal_neighbors() {
        let config = GeometryConfig::default();
        let mut diagnostics = RouteDiagnostics::new();
        let d = diagram(
            vec![
                node("a", 0.0, 0.0, 100.0, 60.0),
                node("b", 200.0, 0.0, 100.0, 60.0),
            ],
            vec![link("l1", "a", "b", ConnectorStyle::Straight)],
        );
        let paths = plan_diagram(&d, &config, &mut diagnostics);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].svg_path, "M 100.00 30.00 L 200.00 30.00");
        assert!(!paths[0].fell_back);
    }

    #[test]
    fn planning_is_deterministic() {
        let config = GeometryConfig::default();
        let d = diagram(
            vec![
                node("a", 0.0, 0.0, 100.0, 60.0),
                node("b", 250.0, 120.0, 90.0, 50.0),
                node("c", 40.0, 300.0, 110.0, 44.0),
            ],
            vec![
                link("l1", "a", "b", ConnectorStyle::Bezier),
                link("l2", "a", "b", ConnectorStyle::Bezier),
                link("l3", "b", "c", ConnectorStyle::SmoothStep),
                link("l4", "c", "a", ConnectorStyle::Angle(Side::Top)),
            ],
        );
        let mut diagnostics = RouteDiagnostics::new();
        let first = plan_diagram(&d, &config, &mut diagnostics);
        let second = plan_diagram(&d, &config, &mut diagnostics);
        assert_eq!(first, second);
    }

    #[test]
    fn unmeasured_or_unknown_nodes_are_skipped_without_panic() {
        let config = GeometryConfig::default();
        let mut diagnostics = RouteDiagnostics::new();
        let d = diagram(
            vec![
                node("a", 0.0, 0.0, 100.0, 60.0),
                node("pending", 200.0, 0.0, 0.0, 0.0),
            ],
            vec![link("l1", "a", "pending", ConnectorStyle::Straight)],
        );
        assert!(plan_diagram(&d, &config, &mut diagnostics).is_empty());

        // Unknown node id: the engine declines to produce output, the
        // caller skips rendering. (Bypasses document validation on purpose.)
        let nodes = d.node_index();
        let orphan = link("l2", "a", "ghost", ConnectorStyle::Straight);
        assert!(
            plan_connector(&orphan, &nodes, &d.connectors, &config, &mut diagnostics).is_none()
        );
    }

    #[test]
    fn parallel_connectors_produce_distinct_paths() {
        let config = GeometryConfig::default();
        let mut diagnostics = RouteDiagnostics::new();
        let d = diagram(
            vec![
                node("a", 0.0, 0.0, 100.0, 60.0),
                node("b", 200.0, 0.0, 100.0, 60.0),
            ],
            vec![
                link("l1", "a", "b", ConnectorStyle::Bezier),
                link("l2", "a", "b", ConnectorStyle::Bezier),
                link("l3", "a", "b", ConnectorStyle::Bezier),
            ],
        );
        let paths = plan_diagram(&d, &config, &mut diagnostics);
        assert_eq!(paths.len(), 3);
        assert_ne!(paths[0].svg_path, paths[1].svg_path);
        assert_ne!(paths[1].svg_path, paths[2].svg_path);
        assert_ne!(paths[0].svg_path, paths[2].svg_path);
    }

    #[test]
    fn moving_an_unrelated_node_does_not_change_a_route() {
        let config = GeometryConfig::default();
        let mut diagnostics = RouteDiagnostics::new();
        let mut d = diagram(
            vec![
                node("a", 0.0, 0.0, 100.0, 60.0),
                node("b", 200.0, 0.0, 100.0, 60.0),
                node("bystander", 500.0, 500.0, 80.0, 40.0),
            ],
            vec![
                link("l1", "a", "b", ConnectorStyle::Step),
                link("l2", "bystander", "b", ConnectorStyle::Straight),
            ],
        );
        let before = plan_diagram(&d, &config, &mut diagnostics);
        d.nodes[2].x = 900.0;
        d.nodes[2].y = 100.0;
        let after = plan_diagram(&d, &config, &mut diagnostics);

        let find = |paths: &[ConnectorPath]| {
            paths
                .iter()
                .find(|p| p.id == "l1")
                .expect("l1 planned")
                .clone()
        };
        assert_eq!(find(&before), find(&after));
    }

    #[test]
    fn angle_fallback_is_surfaced_on_the_path_result() {
        let config = GeometryConfig::default();
        let mut diagnostics = RouteDiagnostics::new();
        // Nearly stacked nodes: only a few units of rightward clearance
        // between the anchors, far under the 20-unit threshold.
        let d = diagram(
            vec![
                node("a", 0.0, 0.0, 100.0, 60.0),
                node("b", 5.0, 200.0, 100.0, 60.0),
            ],
            vec![link("l1", "a", "b", ConnectorStyle::Angle(Side::Right))],
        );
        let paths = plan_diagram(&d, &config, &mut diagnostics);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].fell_back);
        assert_eq!(diagnostics.warnings().len(), 1);

        // Re-planning with the same diagnostics does not duplicate the warning.
        let again = plan_diagram(&d, &config, &mut diagnostics);
        assert!(again[0].fell_back);
        assert_eq!(diagnostics.warnings().len(), 1);
    }
}
