//! Per-vehicle state.

use fd_core::{NodeId, Point, VehicleId};

use crate::{FleetError, FleetResult, MotionPhase, MotionState};

/// A committed booking: who is riding (or waiting) and what they were told.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerRecord {
    /// Drop-off node.  Stays in the owning vehicle's stop queue until served.
    pub destination: NodeId,

    /// Absolute tick the passenger was promised at acceptance.  Never
    /// revised afterwards.
    pub promised_arrival: f64,
}

/// One fleet vehicle.
///
/// Invariants, upheld by [`apply_insertion`](Vehicle::apply_insertion) and
/// [`advance`](Vehicle::advance):
///
/// - `passengers.len() <= capacity`
/// - every passenger's destination occurs in `stops` until it is served
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,

    /// Last network node the vehicle actually reached.
    pub location: NodeId,

    pub capacity: usize,

    /// Future stops in visiting order, pickups and drop-offs interleaved.
    pub stops: Vec<NodeId>,

    pub passengers: Vec<PassengerRecord>,

    pub motion: MotionState,
}

impl Vehicle {
    /// A new idle vehicle parked at `location`.
    pub fn new(id: VehicleId, location: NodeId, capacity: usize) -> FleetResult<Self> {
        if capacity == 0 {
            return Err(FleetError::ZeroCapacity);
        }
        Ok(Self {
            id,
            location,
            capacity,
            stops:      Vec::new(),
            passengers: Vec::new(),
            motion:     MotionState::default(),
        })
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.capacity
    }

    /// `true` once there is nothing left to do: no stops and no route.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase() == MotionPhase::Idle
    }

    /// Where the vehicle is in the motion state machine.
    pub fn phase(&self) -> MotionPhase {
        if self.motion.has_route() {
            MotionPhase::RoutingToStop
        } else if self.stops.first() == Some(&self.location) {
            MotionPhase::AtStop
        } else if self.stops.is_empty() {
            MotionPhase::Idle
        } else if self.motion.unreachable.is_some_and(|n| self.stops.first() == Some(&n)) {
            MotionPhase::Waiting
        } else {
            // Stops queued, route not planned yet: the next advance plans it.
            MotionPhase::RoutingToStop
        }
    }

    /// Pop the head stop and release every passenger bound for it.
    ///
    /// Returns how many passengers got off.
    pub(crate) fn serve_head(&mut self) -> usize {
        if self.stops.is_empty() {
            return 0;
        }
        let node = self.stops.remove(0);
        let before = self.passengers.len();
        self.passengers.retain(|p| p.destination != node);
        before - self.passengers.len()
    }

    /// Read-only view for presentation layers.
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id:              self.id,
            location:        self.location,
            position:        self.motion.position,
            stops:           self.stops.clone(),
            passenger_count: self.passengers.len(),
            phase:           self.phase(),
        }
    }
}

/// Copy of the parts of a [`Vehicle`] a renderer or table needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSnapshot {
    pub id:              VehicleId,
    pub location:        NodeId,
    /// Continuous position; `None` until the first motion tick.
    pub position:        Option<Point>,
    pub stops:           Vec<NodeId>,
    pub passenger_count: usize,
    pub phase:           MotionPhase,
}
