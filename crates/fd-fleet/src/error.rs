use fd_core::{NodeId, VehicleId};
use fd_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("vehicle {0} not found")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {0} is at capacity")]
    CapacityExceeded(VehicleId),

    #[error("stop {node} missing from the plan for vehicle {vehicle}")]
    StopNotInPlan { vehicle: VehicleId, node: NodeId },

    #[error("vehicle capacity must be at least 1")]
    ZeroCapacity,

    #[error("no vehicle id left for fleet slot {0}")]
    FleetFull(usize),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type FleetResult<T> = Result<T, FleetError>;
