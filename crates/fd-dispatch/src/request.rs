//! Ride requests and the pool of requests still waiting for a vehicle.

use fd_core::{NodeId, RequestId, Tick};
use fd_spatial::{SpatialError, SpatialGraph};

use crate::{DispatchError, DispatchResult};

/// A passenger wanting to travel from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub id:         RequestId,
    pub from:       NodeId,
    pub to:         NodeId,
    /// Tick the request was submitted.
    pub created_at: Tick,
}

impl Request {
    /// # Errors
    ///
    /// [`DispatchError::SameOriginDestination`] if `from == to`.
    pub fn new(id: RequestId, from: NodeId, to: NodeId, created_at: Tick) -> DispatchResult<Self> {
        if from == to {
            return Err(DispatchError::SameOriginDestination(from));
        }
        Ok(Self { id, from, to, created_at })
    }
}

/// Requests not yet assigned, in submission order.
///
/// `RequestId`s are handed out sequentially and never reused, even after
/// the request leaves the pool.
#[derive(Debug, Clone, Default)]
pub struct PendingPool {
    requests: Vec<Request>,
    next_id:  u32,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and enqueue a request, stamping it with `now`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::SameOriginDestination`] if `from == to`.
    /// - [`DispatchError::Spatial`] if either node is not in `graph`.
    ///
    /// A failed submission consumes no id.
    pub fn submit(
        &mut self,
        graph: &SpatialGraph,
        from:  NodeId,
        to:    NodeId,
        now:   Tick,
    ) -> DispatchResult<RequestId> {
        for node in [from, to] {
            if !graph.contains(node) {
                return Err(SpatialError::NodeNotFound(node).into());
            }
        }
        let request = Request::new(RequestId(self.next_id), from, to, now)?;
        self.next_id += 1;
        self.requests.push(request);
        Ok(request.id)
    }

    pub fn as_slice(&self) -> &[Request] {
        &self.requests
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn get(&self, id: RequestId) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn request_at(&self, index: usize) -> Option<Request> {
        self.requests.get(index).copied()
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Request {
        self.requests.remove(index)
    }
}
