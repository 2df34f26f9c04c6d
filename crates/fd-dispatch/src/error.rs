use fd_core::NodeId;
use fd_fleet::FleetError;
use fd_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request origin and destination are both {0}")]
    SameOriginDestination(NodeId),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
