use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Cardinal side of a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// A device node as the host editor hands it over: identity, label, and the
/// measured bounding box. Width/height stay 0 until the host's layout pass
/// has measured the rendered element; geometry must skip such nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl Node {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// How a connector is routed between its two nodes.
///
/// Serialized as a lowercase string for the simple styles and as
/// `{"angle": "<side>"}` for 90-degree routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    Straight,
    Bezier,
    Step,
    SmoothStep,
    Angle(Side),
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        ConnectorStyle::Straight
    }
}

/// One link between two device nodes, with the interface names shown at
/// each end. Owned by the host's edge collection; the geometry engine only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub style: ConnectorStyle,
    #[serde(default)]
    pub source_label: String,
    #[serde(default)]
    pub target_label: String,
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
}

fn default_show_labels() -> bool {
    true
}

/// A full topology document: the node set plus the connector set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connectors: Vec<ConnectorRecord>,
}

impl Diagram {
    /// Node lookup keyed by id. BTreeMap keeps iteration order stable so
    /// repeated geometry passes stay byte-identical.
    pub fn node_index(&self) -> BTreeMap<&str, &Node> {
        self.nodes.iter().map(|node| (node.id.as_str(), node)).collect()
    }

    fn validate(&self) -> Result<(), DiagramError> {
        let mut node_ids: BTreeSet<&str> = BTreeSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(DiagramError::DuplicateNode(node.id.clone()));
            }
        }
        let mut connector_ids: BTreeSet<&str> = BTreeSet::new();
        for connector in &self.connectors {
            if !connector_ids.insert(connector.id.as_str()) {
                return Err(DiagramError::DuplicateConnector(connector.id.clone()));
            }
            for endpoint in [&connector.source, &connector.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(DiagramError::UnknownNode {
                        connector: connector.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("invalid topology document: {0}")]
    Parse(#[from] json5::Error),
    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),
    #[error("duplicate connector id {0:?}")]
    DuplicateConnector(String),
    #[error("connector {connector:?} references unknown node {node:?}")]
    UnknownNode { connector: String, node: String },
}

/// Parse and validate a topology document. json5 keeps hand-written files
/// friendly (comments, trailing commas) without a second format.
pub fn parse_diagram(input: &str) -> Result<Diagram, DiagramError> {
    let diagram: Diagram = json5::from_str(input)?;
    diagram.validate()?;
    Ok(diagram)
}
