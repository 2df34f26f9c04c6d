//! Insertion pricing: where would a new trip fit in this vehicle's queue,
//! and what would it cost?
//!
//! # Cost model
//!
//! A candidate queue is priced by projecting a [`Timeline`] from the
//! vehicle's current node:
//!
//! ```text
//! cost = arrival(dropoff) + Σ max(0, new_eta(p) - old_eta(p))   over passengers p
//! old_eta(p) = p.promised_arrival - now
//! ```
//!
//! A candidate is discarded outright if it over-delays any passenger (see
//! [`DelayPolicy::violates`]).

use fd_core::{DispatchConfig, NodeId, Tick};
use fd_spatial::{Router, SpatialGraph};

use crate::{FleetError, FleetResult, PassengerRecord, Timeline, Vehicle, compute_timeline};

// ── DelayPolicy ───────────────────────────────────────────────────────────────

/// How much extra delay an already-booked passenger tolerates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayPolicy {
    /// Maximum acceptable `new_eta / old_eta`.
    pub ratio_threshold: f64,
    /// Maximum acceptable `new_eta - old_eta`.
    pub absolute_threshold: f64,
}

impl DelayPolicy {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            ratio_threshold:    config.delay_ratio_threshold,
            absolute_threshold: config.delay_absolute_threshold,
        }
    }

    /// `true` if moving a passenger's ETA from `old_eta` to `new_eta`
    /// (both relative to now) is unacceptable.
    ///
    /// Both limits must be exceeded: a short trip may double in length if the
    /// absolute delay stays small, and a long one may slip by more than the
    /// absolute limit if the ratio stays small.
    ///
    /// A passenger already due or overdue (`old_eta <= 0`) has no meaningful
    /// ratio; only the absolute limit applies to them.
    pub fn violates(&self, new_eta: f64, old_eta: f64) -> bool {
        let delay = new_eta - old_eta;
        if old_eta <= 0.0 {
            return delay > self.absolute_threshold;
        }
        new_eta / old_eta > self.ratio_threshold && delay > self.absolute_threshold
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::from_config(&DispatchConfig::default())
    }
}

// ── Plans and quotes ──────────────────────────────────────────────────────────

/// The stop queue a vehicle would follow after accepting a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionPlan {
    pub stops: Vec<NodeId>,
    /// Index of the pickup in `stops`.
    pub pickup_index: usize,
    /// Index of the drop-off in `stops`; always greater than `pickup_index`.
    pub dropoff_index: usize,
    /// `true` when the trip rides along existing stops and `stops` equals the
    /// vehicle's current queue.
    pub reuses_existing: bool,
}

/// Why a vehicle declined a trip.  Rejection is an ordinary outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    CapacityExceeded,
    NoFeasibleInsertion,
}

/// A vehicle's answer to "could you take this trip?".
#[derive(Debug, Clone, PartialEq)]
pub enum Quote {
    Accepted { plan: InsertionPlan, cost: f64 },
    Rejected(RejectReason),
}

impl Quote {
    /// The quoted cost, or `None` for a rejection.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Quote::Accepted { cost, .. } => Some(*cost),
            Quote::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Quote::Accepted { .. })
    }
}

// ── Vehicle pricing and commit ────────────────────────────────────────────────

impl Vehicle {
    /// Price carrying a passenger from `pickup` to `dropoff`.
    ///
    /// 1. A full vehicle rejects with [`RejectReason::CapacityExceeded`].
    /// 2. If `pickup` already precedes `dropoff` in the queue the trip rides
    ///    along for free.
    /// 3. Otherwise every `(i, j)` pair, pickup inserted at `i` and drop-off
    ///    at `j > i`, is projected and priced; the cheapest candidate that
    ///    over-delays nobody wins, the earliest pair on ties.
    ///
    /// # Errors
    ///
    /// Only routing errors (an unknown node) are `Err`; every other outcome is
    /// a [`Quote`].
    pub fn evaluate_insertion<R: Router + ?Sized>(
        &self,
        router:  &R,
        graph:   &SpatialGraph,
        pickup:  NodeId,
        dropoff: NodeId,
        now:     Tick,
        policy:  &DelayPolicy,
    ) -> FleetResult<Quote> {
        if self.is_full() {
            return Ok(Quote::Rejected(RejectReason::CapacityExceeded));
        }

        if let Some(plan) = self.ride_along(pickup, dropoff) {
            return Ok(Quote::Accepted { plan, cost: 0.0 });
        }

        let n = self.stops.len();
        let mut best: Option<(InsertionPlan, f64)> = None;

        for i in 0..=n {
            for j in (i + 1)..=(n + 1) {
                let mut stops = Vec::with_capacity(n + 2);
                stops.extend_from_slice(&self.stops);
                stops.insert(i, pickup);
                stops.insert(j, dropoff);

                let timeline = compute_timeline(router, graph, self.location, &stops)?;
                let Some(delay_cost) = self.delay_cost(&timeline, now, policy) else {
                    log::trace!("{}: ({i}, {j}) over-delays a passenger", self.id);
                    continue;
                };
                let cost = timeline.arrival(dropoff).unwrap_or(f64::INFINITY) + delay_cost;
                log::trace!("{}: ({i}, {j}) costs {cost:.2}", self.id);

                if cost.is_finite() && best.as_ref().is_none_or(|(_, c)| cost < *c) {
                    best = Some((
                        InsertionPlan {
                            stops,
                            pickup_index:    i,
                            dropoff_index:   j,
                            reuses_existing: false,
                        },
                        cost,
                    ));
                }
            }
        }

        Ok(match best {
            Some((plan, cost)) => Quote::Accepted { plan, cost },
            None => Quote::Rejected(RejectReason::NoFeasibleInsertion),
        })
    }

    /// Commit a plan from [`evaluate_insertion`](Self::evaluate_insertion).
    ///
    /// Replaces the stop queue and books a passenger for `dropoff`, promising
    /// arrival at `now + arrival(dropoff)`.  Existing passengers keep the
    /// promises they were given.  On error the vehicle is left unchanged.
    pub fn apply_insertion<R: Router + ?Sized>(
        &mut self,
        router:  &R,
        graph:   &SpatialGraph,
        dropoff: NodeId,
        plan:    InsertionPlan,
        now:     Tick,
    ) -> FleetResult<PassengerRecord> {
        if self.is_full() {
            return Err(FleetError::CapacityExceeded(self.id));
        }
        let timeline = compute_timeline(router, graph, self.location, &plan.stops)?;
        let eta = timeline
            .arrival(dropoff)
            .ok_or(FleetError::StopNotInPlan { vehicle: self.id, node: dropoff })?;

        let record = PassengerRecord {
            destination:      dropoff,
            promised_arrival: now.as_units() + eta,
        };
        self.stops = plan.stops;
        self.passengers.push(record);
        Ok(record)
    }

    /// Plan reusing existing stops, if `pickup` occurs before a later
    /// `dropoff` in the current queue.
    fn ride_along(&self, pickup: NodeId, dropoff: NodeId) -> Option<InsertionPlan> {
        let p = self.stops.iter().position(|&s| s == pickup)?;
        let d = p + 1 + self.stops[p + 1..].iter().position(|&s| s == dropoff)?;
        Some(InsertionPlan {
            stops:           self.stops.clone(),
            pickup_index:    p,
            dropoff_index:   d,
            reuses_existing: true,
        })
    }

    /// Sum of positive delays imposed on booked passengers, or `None` if any
    /// passenger would be over-delayed.
    fn delay_cost(&self, timeline: &Timeline, now: Tick, policy: &DelayPolicy) -> Option<f64> {
        let mut total = 0.0;
        for p in &self.passengers {
            let new_eta = timeline.arrival(p.destination).unwrap_or(f64::INFINITY);
            let old_eta = p.promised_arrival - now.as_units();
            if policy.violates(new_eta, old_eta) {
                return None;
            }
            let delay = new_eta - old_eta;
            if delay > 0.0 {
                total += delay;
            }
        }
        Some(total)
    }
}
