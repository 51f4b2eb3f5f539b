use crate::model::{
    BankEntryRecord, BankTransaction, PoolRecord, RouteKey, RouteRecord, ShipComplianceRecord,
};
use crate::StorageResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fueleu_core::{PoolAllocation, Route, ShipId};
use uuid::Uuid;

/// Storage interface for route records.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Insert a route. `route_id` must be unique. A route inserted with the
    /// baseline flag clears the flag on every other route of its year.
    async fn insert_route(&self, route: Route) -> StorageResult<RouteRecord>;

    async fn get_route(&self, key: RouteKey) -> StorageResult<Option<RouteRecord>>;

    /// List routes ordered by key, optionally restricted to one year.
    async fn list_routes(&self, year: Option<i32>) -> StorageResult<Vec<RouteRecord>>;

    /// Flag `key` as the baseline of its year and clear every other route of
    /// that year, atomically.
    async fn set_baseline(&self, key: RouteKey) -> StorageResult<RouteRecord>;
}

/// Storage interface for the stored base compliance balance.
#[async_trait]
pub trait ComplianceStore: Send + Sync {
    async fn upsert_compliance(
        &self,
        ship_id: &ShipId,
        year: i32,
        cb_gco2eq: f64,
        updated_at: DateTime<Utc>,
    ) -> StorageResult<ShipComplianceRecord>;

    async fn get_compliance(
        &self,
        ship_id: &ShipId,
        year: i32,
    ) -> StorageResult<Option<ShipComplianceRecord>>;
}

/// Storage interface for signed bank entries.
#[async_trait]
pub trait BankStore: Send + Sync {
    /// Entries of one ship-year, oldest first.
    async fn list_bank_entries(
        &self,
        ship_id: &ShipId,
        year: i32,
    ) -> StorageResult<Vec<BankEntryRecord>>;

    /// Append the entry and overwrite the base CB in one atomic write.
    async fn record_bank_transaction(
        &self,
        transaction: BankTransaction,
    ) -> StorageResult<BankEntryRecord>;
}

/// Storage interface for pools.
#[async_trait]
pub trait PoolStore: Send + Sync {
    /// Persist a pool and all of its members in one write.
    async fn create_pool(
        &self,
        year: i32,
        members: Vec<PoolAllocation>,
        created_at: DateTime<Utc>,
    ) -> StorageResult<PoolRecord>;

    async fn get_pool(&self, pool_id: &Uuid) -> StorageResult<Option<PoolRecord>>;
}

/// Unified storage bundle used by the ledger.
pub trait FuelEuStorage: RouteStore + ComplianceStore + BankStore + PoolStore + Send + Sync {}

impl<T> FuelEuStorage for T where T: RouteStore + ComplianceStore + BankStore + PoolStore + Send + Sync
{}
