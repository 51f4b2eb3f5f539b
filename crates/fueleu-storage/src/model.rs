use chrono::{DateTime, Utc};
use fueleu_core::{PoolAllocation, Route, ShipId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Surrogate key assigned to a route by storage.
pub type RouteKey = u64;

/// Persisted route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub key: RouteKey,
    #[serde(flatten)]
    pub route: Route,
}

/// Stored base compliance balance of one ship-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipComplianceRecord {
    pub ship_id: ShipId,
    pub year: i32,
    pub cb_gco2eq: f64,
    pub updated_at: DateTime<Utc>,
}

/// Signed bank entry: positive deposits, negative withdrawals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankEntryRecord {
    pub entry_id: Uuid,
    pub ship_id: ShipId,
    pub year: i32,
    pub amount_gco2eq: f64,
    pub created_at: DateTime<Utc>,
}

/// One banking write: append `amount_gco2eq` as a bank entry and set the
/// ship-year base CB to `base_cb_gco2eq`, both or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    pub ship_id: ShipId,
    pub year: i32,
    pub amount_gco2eq: f64,
    pub base_cb_gco2eq: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Immutable pool with its member allocations in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub pool_id: Uuid,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub members: Vec<PoolAllocation>,
}

impl PoolRecord {
    /// Sum of member balances after reallocation.
    pub fn adjusted_cb(&self) -> f64 {
        fueleu_core::pool_total_after(&self.members)
    }
}
