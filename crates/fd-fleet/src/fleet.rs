//! The `Fleet`: every vehicle, indexed by `VehicleId`.

use fd_core::{NodeId, VehicleId};
use fd_spatial::{Router, SpatialError, SpatialGraph};

use crate::{FleetError, FleetResult, MotionEvent, Vehicle, VehicleSnapshot};

/// Owns all vehicles.
///
/// `VehicleId`s are handed out sequentially by [`add`](Self::add) and are
/// direct indices into the backing `Vec`.  Vehicles are never removed.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a new vehicle at `location`.
    ///
    /// # Errors
    ///
    /// - [`FleetError::Routing`] if `location` is not in `graph`.
    /// - [`FleetError::ZeroCapacity`] if `capacity` is 0.
    /// - [`FleetError::FleetFull`] once every `VehicleId` is taken.
    pub fn add(&mut self, graph: &SpatialGraph, location: NodeId, capacity: usize) -> FleetResult<VehicleId> {
        if !graph.contains(location) {
            return Err(SpatialError::NodeNotFound(location).into());
        }
        let id = next_id(self.vehicles.len())?;
        self.vehicles.push(Vehicle::new(id, location, capacity)?);
        Ok(id)
    }

    pub fn get(&self, id: VehicleId) -> FleetResult<&Vehicle> {
        self.vehicles.get(id.index()).ok_or(FleetError::UnknownVehicle(id))
    }

    pub fn get_mut(&mut self, id: VehicleId) -> FleetResult<&mut Vehicle> {
        self.vehicles.get_mut(id.index()).ok_or(FleetError::UnknownVehicle(id))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// `true` if no vehicle has stops or an active path.
    pub fn all_idle(&self) -> bool {
        self.vehicles.iter().all(Vehicle::is_idle)
    }

    /// Booked passengers across the fleet.
    pub fn passenger_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.passengers.len()).sum()
    }

    pub fn snapshot(&self, id: VehicleId) -> FleetResult<VehicleSnapshot> {
        Ok(self.get(id)?.snapshot())
    }

    /// Advance every vehicle by one step, in `VehicleId` order.
    ///
    /// Returns every event tagged with the vehicle it happened to.
    pub fn tick_motion<R: Router + ?Sized>(
        &mut self,
        router:            &R,
        graph:             &SpatialGraph,
        step:              f64,
        arrival_threshold: f64,
    ) -> FleetResult<Vec<(VehicleId, MotionEvent)>> {
        let mut events = Vec::new();
        for vehicle in &mut self.vehicles {
            for event in vehicle.advance(router, graph, step, arrival_threshold)? {
                if let MotionEvent::StopServed { node, released } = event {
                    log::debug!("{} served stop {} ({} off)", vehicle.id, node, released);
                }
                events.push((vehicle.id, event));
            }
        }
        Ok(events)
    }
}

/// The id for the vehicle stored at slot `len`.
pub(crate) fn next_id(len: usize) -> FleetResult<VehicleId> {
    VehicleId::try_from(len).map_err(|_| FleetError::FleetFull(len))
}
