use crate::diagram::{ConnectorRecord, ConnectorStyle};

/// Which other connectors share a node with the one being inspected.
/// Purely informational; drives UI hints, never layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlapReport {
    pub has_overlap: bool,
    pub source_matches: Vec<String>,
    pub target_matches: Vec<String>,
}

/// List the connectors (other than `connector_id`) touching `node_id`,
/// optionally restricted to a single style.
pub fn detect_overlap(
    node_id: &str,
    connector_id: &str,
    connectors: &[ConnectorRecord],
    style_filter: Option<ConnectorStyle>,
) -> OverlapReport {
    let mut report = OverlapReport::default();
    for connector in connectors {
        if connector.id == connector_id {
            continue;
        }
        if let Some(style) = style_filter {
            if connector.style != style {
                continue;
            }
        }
        if connector.source == node_id {
            report.source_matches.push(connector.id.clone());
        }
        if connector.target == node_id {
            report.target_matches.push(connector.id.clone());
        }
    }
    report.has_overlap = !report.source_matches.is_empty() || !report.target_matches.is_empty();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Side;

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

    #[test]
    fn reports_connectors_sharing_the_node() {
        let connectors = vec![
            link("l1", "a", "b", ConnectorStyle::Straight),
            link("l2", "a", "c", ConnectorStyle::Straight),
            link("l3", "d", "a", ConnectorStyle::Bezier),
            link("l4", "d", "e", ConnectorStyle::Straight),
        ];
        let report = detect_overlap("a", "l1", &connectors, None);
        assert!(report.has_overlap);
        assert_eq!(report.source_matches, vec!["l2".to_string()]);
        assert_eq!(report.target_matches, vec!["l3".to_string()]);
    }

    #[test]
    fn style_filter_narrows_the_report() {
        let connectors = vec![
            link("l1", "a", "b", ConnectorStyle::Angle(Side::Right)),
            link("l2", "a", "c", ConnectorStyle::Angle(Side::Right)),
            link("l3", "a", "d", ConnectorStyle::Straight),
        ];
        let report = detect_overlap(
            "a",
            "l1",
            &connectors,
            Some(ConnectorStyle::Angle(Side::Right)),
        );
        assert_eq!(report.source_matches, vec!["l2".to_string()]);
        assert!(report.target_matches.is_empty());
    }

    #[test]
    fn lone_connector_has_no_overlap() {
        let connectors = vec![link("l1", "a", "b", ConnectorStyle::Straight)];
        let report = detect_overlap("a", "l1", &connectors, None);
        assert_eq!(report, OverlapReport::default());
    }
}
