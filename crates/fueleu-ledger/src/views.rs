use fueleu_core::{CbScope, PoolAllocation, ShipId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a route aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CbSnapshot {
    pub scope: CbScope,
    pub year: i32,
    pub route_count: usize,
    pub cb_gco2eq: f64,
}

/// Base CB of a ship-year together with its net banking adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedCb {
    pub ship_id: ShipId,
    pub year: i32,
    /// Stored base CB
    pub cb_before: f64,
    /// Net of all bank entries
    pub bank_adjustment: f64,
    pub adjusted_cb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub pool_id: Uuid,
    pub year: i32,
    /// Sum of member balances after reallocation
    pub adjusted_cb: f64,
    pub members: Vec<PoolAllocation>,
}
