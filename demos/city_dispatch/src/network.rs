//! The demo city: a complete graph of lettered stops on an 800 × 600 canvas.

use fd_core::{NodeId, SimRng};
use fd_spatial::{Bounds, SpatialGraph, SpatialResult, complete_graph};

pub const CANVAS_WIDTH:   f64 = 800.0;
pub const CANVAS_HEIGHT:  f64 = 600.0;
pub const CANVAS_PADDING: f64 = 100.0;

/// Scatter `count` stops over the padded canvas and connect every pair.
pub fn build_city(rng: &mut SimRng, count: u32) -> SpatialResult<SpatialGraph> {
    complete_graph(
        rng,
        count,
        Bounds::padded(CANVAS_WIDTH, CANVAS_HEIGHT, CANVAS_PADDING),
    )
}

/// `A`–`Z` for the first 26 stops, `N26`, `N27`, … after that.
pub fn label(node: NodeId) -> String {
    match u8::try_from(node.0) {
        Ok(n) if n < 26 => char::from(b'A' + n).to_string(),
        _ => format!("N{}", node.0),
    }
}

/// Labels joined with arrows, e.g. `C → F → A`.
pub fn route_label(stops: &[NodeId]) -> String {
    if stops.is_empty() {
        return "-".to_string();
    }
    stops.iter().map(|&n| label(n)).collect::<Vec<_>>().join(" → ")
}
