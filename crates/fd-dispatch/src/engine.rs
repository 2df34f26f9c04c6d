//! Greedy cross-fleet assignment.

use fd_core::{DispatchConfig, RequestId, Tick, VehicleId};
use fd_fleet::{DelayPolicy, Fleet, FleetResult, InsertionPlan, Quote};
use fd_spatial::{Router, SpatialGraph};

use crate::{DispatchResult, PendingPool, Request};

/// Outcome of offering one request to the fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assignment {
    /// `vehicle` quoted the lowest cost and has committed the trip.
    Accepted { vehicle: VehicleId, cost: f64 },
    /// Every vehicle rejected; the request stays pending.
    Unassigned,
}

impl Assignment {
    pub fn vehicle(&self) -> Option<VehicleId> {
        match self {
            Assignment::Accepted { vehicle, .. } => Some(*vehicle),
            Assignment::Unassigned => None,
        }
    }
}

/// One attempt from a [`resolve_pending`](DispatchEngine::resolve_pending) pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub request: RequestId,
    /// The vehicle that took the request, `None` if it is still pending.
    pub vehicle: Option<VehicleId>,
}

impl Resolution {
    #[inline]
    pub fn accepted(&self) -> bool {
        self.vehicle.is_some()
    }
}

/// Offers requests to every vehicle and books the cheapest quote.
///
/// Holds no timing state: callers decide how often to run a pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchEngine {
    pub policy: DelayPolicy,
}

impl DispatchEngine {
    pub fn new(policy: DelayPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(DelayPolicy::from_config(config))
    }

    /// Price `request` on every vehicle and commit it to the cheapest.
    ///
    /// Ties go to the vehicle earliest in fleet order.  Returns
    /// [`Assignment::Unassigned`] when no vehicle accepts; the fleet is then
    /// untouched.
    pub fn assign<R: Router + ?Sized>(
        &self,
        router:  &R,
        graph:   &SpatialGraph,
        fleet:   &mut Fleet,
        request: &Request,
        now:     Tick,
    ) -> DispatchResult<Assignment> {
        let quotes = self.price_fleet(router, graph, fleet, request, now)?;

        let mut best: Option<(usize, InsertionPlan, f64)> = None;
        for (idx, quote) in quotes.into_iter().enumerate() {
            let Quote::Accepted { plan, cost } = quote else {
                continue;
            };
            if best.as_ref().is_none_or(|(_, _, c)| cost < *c) {
                best = Some((idx, plan, cost));
            }
        }

        let Some((idx, plan, cost)) = best else {
            log::trace!("{} ({} -> {}): no vehicle accepted", request.id, request.from, request.to);
            return Ok(Assignment::Unassigned);
        };

        let vehicle = fleet.vehicles()[idx].id;
        let record = fleet
            .get_mut(vehicle)?
            .apply_insertion(router, graph, request.to, plan, now)?;
        log::debug!(
            "{} ({} -> {}) assigned to {} at cost {:.2}, promised {:.1}",
            request.id, request.from, request.to, vehicle, cost, record.promised_arrival,
        );
        Ok(Assignment::Accepted { vehicle, cost })
    }

    /// Offer every pending request once, in pool order.
    ///
    /// Accepted requests leave the pool; the rest stay for the next pass.
    /// Each request sees the fleet as left by the ones before it.  Returns
    /// one [`Resolution`] per attempt.
    pub fn resolve_pending<R: Router + ?Sized>(
        &self,
        router: &R,
        graph:  &SpatialGraph,
        fleet:  &mut Fleet,
        pool:   &mut PendingPool,
        now:    Tick,
    ) -> DispatchResult<Vec<Resolution>> {
        let mut resolutions = Vec::with_capacity(pool.len());
        let mut idx = 0;
        while let Some(request) = pool.request_at(idx) {
            let vehicle = self.assign(router, graph, fleet, &request, now)?.vehicle();
            if vehicle.is_some() {
                pool.remove_at(idx);
            } else {
                idx += 1;
            }
            resolutions.push(Resolution { request: request.id, vehicle });
        }
        Ok(resolutions)
    }

    /// One quote per vehicle, in fleet order.
    fn price_fleet<R: Router + ?Sized>(
        &self,
        router:  &R,
        graph:   &SpatialGraph,
        fleet:   &Fleet,
        request: &Request,
        now:     Tick,
    ) -> DispatchResult<Vec<Quote>> {
        let policy = &self.policy;

        #[cfg(not(feature = "parallel"))]
        let quotes = fleet
            .iter()
            .map(|v| v.evaluate_insertion(router, graph, request.from, request.to, now, policy))
            .collect::<FleetResult<Vec<_>>>()?;

        #[cfg(feature = "parallel")]
        let quotes = {
            use rayon::prelude::*;

            fleet
                .vehicles()
                .par_iter()
                .map(|v| v.evaluate_insertion(router, graph, request.from, request.to, now, policy))
                .collect::<FleetResult<Vec<_>>>()?
        };

        Ok(quotes)
    }
}
