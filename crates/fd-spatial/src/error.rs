//! Spatial-subsystem error type.

use thiserror::Error;

use fd_core::NodeId;

/// Errors produced by `fd-spatial`.
///
/// An unreachable destination is deliberately **not** here: routers report it
/// as a [`Route`](crate::Route) with infinite cost.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("node {0} already exists in network")]
    DuplicateNode(NodeId),

    #[error("edge {from} - {to} has invalid weight {weight}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
