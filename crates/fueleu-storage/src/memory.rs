//! In-memory reference implementation of the storage traits.
//!
//! All records live behind one lock, so every trait call is atomic with
//! respect to every other. Production deployments should use a transactional
//! backend.

use crate::model::{
    BankEntryRecord, BankTransaction, PoolRecord, RouteKey, RouteRecord, ShipComplianceRecord,
};
use crate::traits::{BankStore, ComplianceStore, PoolStore, RouteStore};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fueleu_core::{PoolAllocation, Route, ShipId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    next_route_key: RouteKey,
    routes: BTreeMap<RouteKey, RouteRecord>,
    compliance: HashMap<(ShipId, i32), ShipComplianceRecord>,
    bank_entries: Vec<BankEntryRecord>,
    pools: HashMap<Uuid, PoolRecord>,
}

impl MemoryState {
    fn clear_baselines(&mut self, year: i32, except: RouteKey) {
        for record in self.routes.values_mut() {
            if record.route.year == year && record.key != except {
                record.route.is_baseline = false;
            }
        }
    }
}

/// In-memory storage adapter.
#[derive(Default)]
pub struct InMemoryFuelEuStorage {
    state: RwLock<MemoryState>,
}

impl InMemoryFuelEuStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| StorageError::Backend("storage lock poisoned".to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| StorageError::Backend("storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl RouteStore for InMemoryFuelEuStorage {
    async fn insert_route(&self, route: Route) -> StorageResult<RouteRecord> {
        let mut guard = self.write()?;

        if guard
            .routes
            .values()
            .any(|record| record.route.route_id == route.route_id)
        {
            return Err(StorageError::Conflict(format!(
                "route {} already exists",
                route.route_id
            )));
        }

        guard.next_route_key += 1;
        let key = guard.next_route_key;
        if route.is_baseline {
            guard.clear_baselines(route.year, key);
        }

        let record = RouteRecord { key, route };
        guard.routes.insert(key, record.clone());
        Ok(record)
    }

    async fn get_route(&self, key: RouteKey) -> StorageResult<Option<RouteRecord>> {
        Ok(self.read()?.routes.get(&key).cloned())
    }

    async fn list_routes(&self, year: Option<i32>) -> StorageResult<Vec<RouteRecord>> {
        let guard = self.read()?;
        Ok(guard
            .routes
            .values()
            .filter(|record| year.map_or(true, |y| record.route.year == y))
            .cloned()
            .collect())
    }

    async fn set_baseline(&self, key: RouteKey) -> StorageResult<RouteRecord> {
        let mut guard = self.write()?;
        let year = guard
            .routes
            .get(&key)
            .map(|record| record.route.year)
            .ok_or_else(|| StorageError::NotFound(format!("route {} not found", key)))?;

        guard.clear_baselines(year, key);
        let record = guard
            .routes
            .get_mut(&key)
            .ok_or_else(|| StorageError::NotFound(format!("route {} not found", key)))?;
        record.route.is_baseline = true;
        Ok(record.clone())
    }
}

#[async_trait]
impl ComplianceStore for InMemoryFuelEuStorage {
    async fn upsert_compliance(
        &self,
        ship_id: &ShipId,
        year: i32,
        cb_gco2eq: f64,
        updated_at: DateTime<Utc>,
    ) -> StorageResult<ShipComplianceRecord> {
        let record = ShipComplianceRecord {
            ship_id: ship_id.clone(),
            year,
            cb_gco2eq,
            updated_at,
        };
        self.write()?
            .compliance
            .insert((ship_id.clone(), year), record.clone());
        Ok(record)
    }

    async fn get_compliance(
        &self,
        ship_id: &ShipId,
        year: i32,
    ) -> StorageResult<Option<ShipComplianceRecord>> {
        Ok(self
            .read()?
            .compliance
            .get(&(ship_id.clone(), year))
            .cloned())
    }
}

#[async_trait]
impl BankStore for InMemoryFuelEuStorage {
    async fn list_bank_entries(
        &self,
        ship_id: &ShipId,
        year: i32,
    ) -> StorageResult<Vec<BankEntryRecord>> {
        let guard = self.read()?;
        Ok(guard
            .bank_entries
            .iter()
            .filter(|entry| entry.ship_id == *ship_id && entry.year == year)
            .cloned()
            .collect())
    }

    async fn record_bank_transaction(
        &self,
        transaction: BankTransaction,
    ) -> StorageResult<BankEntryRecord> {
        if !transaction.amount_gco2eq.is_finite() || !transaction.base_cb_gco2eq.is_finite() {
            return Err(StorageError::InvalidInput(
                "bank transaction amounts must be finite".to_string(),
            ));
        }

        let mut guard = self.write()?;
        let entry = BankEntryRecord {
            entry_id: Uuid::new_v4(),
            ship_id: transaction.ship_id.clone(),
            year: transaction.year,
            amount_gco2eq: transaction.amount_gco2eq,
            created_at: transaction.recorded_at,
        };

        guard.compliance.insert(
            (transaction.ship_id.clone(), transaction.year),
            ShipComplianceRecord {
                ship_id: transaction.ship_id,
                year: transaction.year,
                cb_gco2eq: transaction.base_cb_gco2eq,
                updated_at: transaction.recorded_at,
            },
        );
        guard.bank_entries.push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl PoolStore for InMemoryFuelEuStorage {
    async fn create_pool(
        &self,
        year: i32,
        members: Vec<PoolAllocation>,
        created_at: DateTime<Utc>,
    ) -> StorageResult<PoolRecord> {
        let record = PoolRecord {
            pool_id: Uuid::new_v4(),
            year,
            created_at,
            members,
        };

        let mut guard = self.write()?;
        if guard.pools.contains_key(&record.pool_id) {
            return Err(StorageError::Conflict(format!(
                "pool {} already exists",
                record.pool_id
            )));
        }
        guard.pools.insert(record.pool_id, record.clone());
        Ok(record)
    }

    async fn get_pool(&self, pool_id: &Uuid) -> StorageResult<Option<PoolRecord>> {
        Ok(self.read()?.pools.get(pool_id).cloned())
    }
}
