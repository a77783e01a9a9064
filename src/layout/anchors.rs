use crate::config::GeometryConfig;
use crate::diagram::{Node, Side};

use super::types::ConnectorEndpoint;

/// Compute where a connector leaving `from` toward `toward` crosses the
/// boundary of `from`, and which side it emerges on.
///
/// The centre-to-centre ray is first projected with the diamond
/// normalisation `1 / (|dx|/halfW + |dy|/halfH)` to pick a side, then the
/// ray is intersected with that side's edge so the returned point lies
/// exactly on the rectangle perimeter. Callers must only pass measured
/// nodes (positive width/height).
pub fn boundary_anchor(from: &Node, toward: &Node, config: &GeometryConfig) -> ConnectorEndpoint {
    let (fcx, fcy) = from.center();
    let (tcx, tcy) = toward.center();
    let dx = tcx - fcx;
    let dy = tcy - fcy;
    let eps = config.boundary_epsilon;

    // Coincident centres have no usable direction; the top-centre point is
    // a stable fallback that keeps the connector attached to the node.
    if dx.abs() <= eps && dy.abs() <= eps {
        return ConnectorEndpoint {
            point: (fcx, from.y),
            side: Side::Top,
        };
    }

    let half_w = from.width / 2.0;
    let half_h = from.height / 2.0;
    let side = classify_side(dx, dy, half_w, half_h, eps);

    let point = match side {
        Side::Left | Side::Right => {
            let t = half_w / dx.abs();
            let y = (fcy + dy * t).clamp(from.y, from.y + from.height);
            let x = if side == Side::Right { from.x + from.width } else { from.x };
            (x, y)
        }
        Side::Top | Side::Bottom => {
            // Near-vertical alignment is forced here with dy possibly tiny;
            // guard the division and fall back to the centre column.
            let x = if dy.abs() <= eps {
                fcx
            } else {
                let t = half_h / dy.abs();
                (fcx + dx * t).clamp(from.x, from.x + from.width)
            };
            let y = if side == Side::Bottom { from.y + from.height } else { from.y };
            (x, y)
        }
    };

    ConnectorEndpoint { point, side }
}

/// Pick the side the diamond-projected point lands on. Horizontal deltas
/// below the epsilon are forced to Top/Bottom so stacked nodes don't
/// flicker between Left and Right while dragging.
fn classify_side(dx: f32, dy: f32, half_w: f32, half_h: f32, eps: f32) -> Side {
    if dx.abs() <= eps {
        return if dy >= 0.0 { Side::Bottom } else { Side::Top };
    }
    if dx.abs() / half_w >= dy.abs() / half_h {
        if dx >= 0.0 { Side::Right } else { Side::Left }
    } else if dy >= 0.0 {
        Side::Bottom
    } else {
        Side::Top
    }
}
