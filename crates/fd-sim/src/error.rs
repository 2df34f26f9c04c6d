use fd_core::FdError;
use fd_dispatch::DispatchError;
use fd_fleet::FleetError;
use fd_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] FdError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("network error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
