use crate::diagram::Side;

/// Where a connector touches a node: the boundary point and the side it
/// emerges from. Derived fresh on every pass, never cached across moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorEndpoint {
    pub point: (f32, f32),
    pub side: Side,
}

/// Perpendicular displacement applied to a connector's endpoints so that
/// parallel connectors fan out instead of overlapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EndpointOffsets {
    pub source: (f32, f32),
    pub target: (f32, f32),
}

/// The per-connector output consumed by the renderer: the path data plus
/// the two interface-label anchors. `fell_back` records that a requested
/// 90-degree route was infeasible and the path is a straight-line stand-in.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPath {
    pub id: String,
    pub svg_path: String,
    pub source_label_anchor: (f32, f32),
    pub target_label_anchor: (f32, f32),
    pub fell_back: bool,
}

/// One deduplicated infeasible-route diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteWarning {
    pub connector: String,
    pub direction: Side,
}
