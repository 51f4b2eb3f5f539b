use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::views::{AdjustedCb, CbSnapshot, PoolSummary};
use chrono::{Datelike, Utc};
use fueleu_core::{BankingOutcome, CbScope, PoolMemberInput, Route, RouteComparison, ShipId};
use fueleu_storage::memory::InMemoryFuelEuStorage;
use fueleu_storage::{
    BankEntryRecord, BankTransaction, FuelEuStorage, PoolRecord, RouteKey, RouteRecord,
    StorageError,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Compliance ledger facade.
///
/// Validates requests, runs the pure core over storage snapshots and writes
/// the results back. Every read-compute-write sequence runs under a single
/// write gate, so two banking calls on the same ship-year can never both see
/// the same pre-write balance.
pub struct ComplianceLedger {
    storage: Arc<dyn FuelEuStorage>,
    config: LedgerConfig,
    write_gate: Mutex<()>,
}

impl Default for ComplianceLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceLedger {
    /// Create a ledger backed by in-memory storage and default configuration.
    pub fn new() -> Self {
        Self::with_storage(Arc::new(InMemoryFuelEuStorage::new()))
    }

    /// Create a ledger backed by an explicit storage adapter.
    pub fn with_storage(storage: Arc<dyn FuelEuStorage>) -> Self {
        Self::with_config(storage, LedgerConfig::default())
    }

    pub fn with_config(storage: Arc<dyn FuelEuStorage>, config: LedgerConfig) -> Self {
        Self {
            storage,
            config,
            write_gate: Mutex::new(()),
        }
    }

    /// Access the underlying storage backend.
    pub fn storage(&self) -> Arc<dyn FuelEuStorage> {
        Arc::clone(&self.storage)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Routes ──────────────────────────────────────────────────────────

    /// Register a route. Route figures must be finite and the id non-empty.
    pub async fn register_route(&self, route: Route) -> LedgerResult<RouteRecord> {
        if route.route_id.trim().is_empty() {
            return Err(LedgerError::InvalidRequest(
                "route_id must not be empty".to_string(),
            ));
        }
        let figures = [
            ("ghg_intensity", route.ghg_intensity),
            ("fuel_consumption", route.fuel_consumption),
            ("distance_km", route.distance_km),
            ("total_emissions", route.total_emissions),
        ];
        if let Some((field, value)) = figures.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LedgerError::InvalidRequest(format!(
                "{field} must be finite, got {value}"
            )));
        }

        let _gate = self.write_gate.lock().await;
        let record = self.storage.insert_route(route).await?;
        info!(
            key = record.key,
            route_id = %record.route.route_id,
            year = record.route.year,
            baseline = record.route.is_baseline,
            "Route registered"
        );
        Ok(record)
    }

    pub async fn list_routes(&self, year: Option<i32>) -> LedgerResult<Vec<RouteRecord>> {
        let routes = self.storage.list_routes(year).await?;
        debug!(?year, count = routes.len(), "Listed routes");
        Ok(routes)
    }

    /// Make `key` the baseline of its year, clearing every other baseline of
    /// that year.
    pub async fn set_baseline(&self, key: RouteKey) -> LedgerResult<RouteRecord> {
        let _gate = self.write_gate.lock().await;
        let record = self.storage.set_baseline(key).await.map_err(|e| match e {
            StorageError::NotFound(_) => {
                warn!(key, "Baseline toggle for unknown route");
                LedgerError::NotFound(format!("Route not found: {key}"))
            }
            other => LedgerError::Storage(other),
        })?;
        info!(
            key,
            route_id = %record.route.route_id,
            year = record.route.year,
            "Baseline set"
        );
        Ok(record)
    }

    /// Compare every route of `year` against that year's baseline.
    pub async fn comparison(&self, year: i32) -> LedgerResult<Vec<RouteComparison>> {
        let routes = self.storage.list_routes(Some(year)).await?;
        let baseline = routes
            .iter()
            .find(|r| r.route.is_baseline)
            .ok_or(LedgerError::NoBaseline { year })?;

        let comparisons = fueleu_core::compare_routes(
            &self.config.regulatory,
            &baseline.route,
            routes.iter().map(|r| &r.route),
        );
        debug!(
            year,
            baseline = %baseline.route.route_id,
            count = comparisons.len(),
            "Compared routes against baseline"
        );
        Ok(comparisons)
    }

    // ── Compliance balance ─────────────────────────────────────────────

    /// Aggregate the CB of every route of `year` (current calendar year if
    /// `None`).
    ///
    /// A `Ship` scope also stores a base CB for that ship-year. Surplus
    /// already moved into the bank stays there: the stored base is the route
    /// CB minus the net of the bank entries, so `adjusted_cb` equals the
    /// route CB after every recompute.
    pub async fn compute_cb(&self, scope: CbScope, year: Option<i32>) -> LedgerResult<CbSnapshot> {
        let year = year.unwrap_or_else(|| Utc::now().year());

        let _gate = match scope {
            CbScope::Ship(_) => Some(self.write_gate.lock().await),
            CbScope::Fleet => None,
        };

        let routes = self.storage.list_routes(Some(year)).await?;
        let cb_gco2eq = fueleu_core::aggregate_cb_with(
            &self.config.regulatory,
            routes.iter().map(|r| &r.route),
        );

        if let Some(ship_id) = scope.ship() {
            let entries = self.storage.list_bank_entries(ship_id, year).await?;
            let banked = fueleu_core::available_banked(entries.iter().map(|e| e.amount_gco2eq));
            let base_cb = cb_gco2eq - banked;
            self.storage
                .upsert_compliance(ship_id, year, base_cb, Utc::now())
                .await?;
            info!(
                ship_id = %ship_id,
                year,
                cb_gco2eq,
                banked,
                base_cb,
                routes = routes.len(),
                "Base CB stored"
            );
        } else {
            debug!(year, cb_gco2eq, routes = routes.len(), "Fleet CB computed");
        }

        Ok(CbSnapshot {
            scope,
            year,
            route_count: routes.len(),
            cb_gco2eq,
        })
    }

    /// Base CB plus the net of all bank entries for the ship-year.
    pub async fn adjusted_cb(&self, ship_id: &ShipId, year: i32) -> LedgerResult<AdjustedCb> {
        let record = self
            .storage
            .get_compliance(ship_id, year)
            .await?
            .ok_or_else(|| {
                LedgerError::NotFound(format!(
                    "Compliance record not found for {ship_id} in {year}"
                ))
            })?;
        let entries = self.storage.list_bank_entries(ship_id, year).await?;
        let bank_adjustment = entries.iter().map(|e| e.amount_gco2eq).sum::<f64>();

        Ok(AdjustedCb {
            ship_id: ship_id.clone(),
            year,
            cb_before: record.cb_gco2eq,
            bank_adjustment,
            adjusted_cb: record.cb_gco2eq + bank_adjustment,
        })
    }

    // ── Banking ─────────────────────────────────────────────────────────

    /// Move `amount` of the ship-year's positive base CB into the bank.
    pub async fn bank_surplus(
        &self,
        ship_id: &ShipId,
        year: i32,
        amount: f64,
    ) -> LedgerResult<BankingOutcome> {
        require_positive_amount(amount)?;
        let _gate = self.write_gate.lock().await;

        let base = match self.storage.get_compliance(ship_id, year).await? {
            Some(record) if record.cb_gco2eq > 0.0 => record.cb_gco2eq,
            _ => {
                warn!(ship_id = %ship_id, year, "Bank rejected: no positive compliance balance");
                return Err(LedgerError::NoPositiveBalance {
                    ship_id: ship_id.clone(),
                    year,
                });
            }
        };

        let outcome = fueleu_core::bank_surplus(base, amount).map_err(|e| {
            warn!(ship_id = %ship_id, year, amount, base, error = %e, "Bank rejected");
            e
        })?;

        self.storage
            .record_bank_transaction(BankTransaction {
                ship_id: ship_id.clone(),
                year,
                amount_gco2eq: outcome.applied,
                base_cb_gco2eq: outcome.remaining,
                recorded_at: Utc::now(),
            })
            .await?;

        info!(
            ship_id = %ship_id,
            year,
            banked = outcome.applied,
            base_cb = outcome.remaining,
            "Surplus banked"
        );
        Ok(outcome)
    }

    /// Withdraw up to `amount` of banked surplus into the ship-year's base CB.
    ///
    /// Over-requests are capped at what is available; `remaining` in the
    /// outcome is the banked surplus left afterwards.
    pub async fn apply_banked(
        &self,
        ship_id: &ShipId,
        year: i32,
        amount: f64,
    ) -> LedgerResult<BankingOutcome> {
        require_positive_amount(amount)?;
        let _gate = self.write_gate.lock().await;

        let entries = self.storage.list_bank_entries(ship_id, year).await?;
        let available = fueleu_core::available_banked(entries.iter().map(|e| e.amount_gco2eq));
        if !(available > 0.0) {
            warn!(ship_id = %ship_id, year, available, "Apply rejected: no banked surplus");
            return Err(LedgerError::NoBankedSurplus {
                ship_id: ship_id.clone(),
                year,
            });
        }

        let outcome = fueleu_core::apply_banked(available, amount)?;
        let base = self
            .storage
            .get_compliance(ship_id, year)
            .await?
            .map(|r| r.cb_gco2eq)
            .unwrap_or(0.0);

        self.storage
            .record_bank_transaction(BankTransaction {
                ship_id: ship_id.clone(),
                year,
                amount_gco2eq: -outcome.applied,
                base_cb_gco2eq: base + outcome.applied,
                recorded_at: Utc::now(),
            })
            .await?;

        info!(
            ship_id = %ship_id,
            year,
            applied = outcome.applied,
            requested = amount,
            banked_left = outcome.remaining,
            "Banked surplus applied"
        );
        Ok(outcome)
    }

    /// Bank entries of a ship-year, oldest first.
    pub async fn bank_records(
        &self,
        ship_id: &ShipId,
        year: i32,
    ) -> LedgerResult<Vec<BankEntryRecord>> {
        Ok(self.storage.list_bank_entries(ship_id, year).await?)
    }

    // ── Pooling ─────────────────────────────────────────────────────────

    /// Validate the request against the pool policy, reallocate and persist.
    pub async fn create_pool(
        &self,
        year: i32,
        members: Vec<PoolMemberInput>,
    ) -> LedgerResult<PoolRecord> {
        if let Err(e) = self.check_pool_request(&members) {
            warn!(year, members = members.len(), error = %e, "Pool rejected");
            return Err(e);
        }

        let _gate = self.write_gate.lock().await;
        let allocations = fueleu_core::create_pool(&members);
        let pool = self
            .storage
            .create_pool(year, allocations, Utc::now())
            .await?;

        info!(
            pool_id = %pool.pool_id,
            year,
            members = pool.members.len(),
            adjusted_cb = pool.adjusted_cb(),
            "Pool created"
        );
        Ok(pool)
    }

    pub async fn pool_adjusted_cb(&self, pool_id: &Uuid) -> LedgerResult<PoolSummary> {
        let pool = self
            .storage
            .get_pool(pool_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Pool not found: {pool_id}")))?;

        Ok(PoolSummary {
            pool_id: pool.pool_id,
            year: pool.year,
            adjusted_cb: pool.adjusted_cb(),
            members: pool.members,
        })
    }

    fn check_pool_request(&self, members: &[PoolMemberInput]) -> LedgerResult<()> {
        let policy = &self.config.pool;
        if members.len() < policy.min_members {
            return Err(LedgerError::InvalidRequest(format!(
                "a pool needs at least {} members, got {}",
                policy.min_members,
                members.len()
            )));
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in members {
            if member.ship_id.as_str().trim().is_empty() {
                return Err(LedgerError::InvalidRequest(
                    "pool member ship_id must not be empty".to_string(),
                ));
            }
            if !seen.insert(&member.ship_id) {
                return Err(LedgerError::InvalidRequest(format!(
                    "duplicate pool member {}",
                    member.ship_id
                )));
            }
            if !member.cb.is_finite() {
                return Err(LedgerError::InvalidRequest(format!(
                    "cb of {} must be finite, got {}",
                    member.ship_id, member.cb
                )));
            }
        }

        if policy.require_non_negative_total {
            let total = members.iter().map(|m| m.cb).sum::<f64>();
            if total < 0.0 {
                return Err(LedgerError::InvalidRequest(format!(
                    "pool total CB must not be negative, got {total}"
                )));
            }
        }
        Ok(())
    }
}

fn require_positive_amount(amount: f64) -> LedgerResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidRequest(format!(
            "amount must be a positive finite number, got {amount}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolPolicy;
    use fueleu_core::BankingError;

    fn route(route_id: &str, year: i32, ghg: f64, fuel: f64, baseline: bool) -> Route {
        Route {
            route_id: route_id.to_string(),
            vessel_type: "Container".to_string(),
            fuel_type: "HFO".to_string(),
            year,
            ghg_intensity: ghg,
            fuel_consumption: fuel,
            distance_km: 12_000.0,
            total_emissions: 4_500.0,
            is_baseline: baseline,
        }
    }

    async fn ledger_with_base(ship: &ShipId, year: i32, cb: f64) -> ComplianceLedger {
        let ledger = ComplianceLedger::new();
        ledger
            .storage()
            .upsert_compliance(ship, year, cb, Utc::now())
            .await
            .unwrap();
        ledger
    }

    #[tokio::test]
    async fn bank_moves_base_into_entries() {
        let ship = ShipId::new("SHIP001");
        let ledger = ledger_with_base(&ship, 2024, 1_000.0).await;

        let outcome = ledger.bank_surplus(&ship, 2024, 400.0).await.unwrap();
        assert_eq!(outcome, BankingOutcome { applied: 400.0, remaining: 600.0 });

        let adjusted = ledger.adjusted_cb(&ship, 2024).await.unwrap();
        assert_eq!(adjusted.cb_before, 600.0);
        assert_eq!(adjusted.bank_adjustment, 400.0);
        assert_eq!(adjusted.adjusted_cb, 1_000.0);
    }

    #[tokio::test]
    async fn bank_requires_positive_base() {
        let ship = ShipId::new("SHIP001");
        let ledger = ledger_with_base(&ship, 2024, -50.0).await;

        let err = ledger.bank_surplus(&ship, 2024, 10.0).await.unwrap_err();
        assert!(matches!(err, LedgerError::NoPositiveBalance { year: 2024, .. }));

        let err = ledger
            .bank_surplus(&ShipId::new("UNKNOWN"), 2024, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoPositiveBalance { .. }));
    }

    #[tokio::test]
    async fn bank_over_base_is_rejected_without_writes() {
        let ship = ShipId::new("SHIP001");
        let ledger = ledger_with_base(&ship, 2024, 100.0).await;

        let err = ledger.bank_surplus(&ship, 2024, 150.0).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Banking(BankingError::InsufficientBalance { .. })
        ));
        assert!(ledger.bank_records(&ship, 2024).await.unwrap().is_empty());
        assert_eq!(ledger.adjusted_cb(&ship, 2024).await.unwrap().cb_before, 100.0);
    }

    #[tokio::test]
    async fn invalid_amounts_are_rejected() {
        let ship = ShipId::new("SHIP001");
        let ledger = ledger_with_base(&ship, 2024, 100.0).await;

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = ledger.bank_surplus(&ship, 2024, amount).await.unwrap_err();
            assert!(matches!(err, LedgerError::InvalidRequest(_)), "{amount}");
            let err = ledger.apply_banked(&ship, 2024, amount).await.unwrap_err();
            assert!(matches!(err, LedgerError::InvalidRequest(_)), "{amount}");
        }
    }

    #[tokio::test]
    async fn apply_caps_and_restores_base() {
        let ship = ShipId::new("SHIP001");
        let ledger = ledger_with_base(&ship, 2024, 500.0).await;
        ledger.bank_surplus(&ship, 2024, 300.0).await.unwrap();

        let outcome = ledger.apply_banked(&ship, 2024, 1_000.0).await.unwrap();
        assert_eq!(outcome, BankingOutcome { applied: 300.0, remaining: 0.0 });

        let adjusted = ledger.adjusted_cb(&ship, 2024).await.unwrap();
        assert_eq!(adjusted.cb_before, 500.0);
        assert_eq!(adjusted.bank_adjustment, 0.0);

        let err = ledger.apply_banked(&ship, 2024, 1.0).await.unwrap_err();
        assert!(matches!(err, LedgerError::NoBankedSurplus { .. }));
    }

    #[tokio::test]
    async fn apply_without_bank_is_rejected() {
        let ledger = ComplianceLedger::new();
        let err = ledger
            .apply_banked(&ShipId::new("SHIP009"), 2025, 10.0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no banked surplus available"));
    }

    #[tokio::test]
    async fn adjusted_cb_requires_record() {
        let ledger = ComplianceLedger::new();
        let err = ledger
            .adjusted_cb(&ShipId::new("SHIP001"), 2024)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert!(err.to_string().starts_with("Compliance record not found"));
    }

    #[tokio::test]
    async fn compute_cb_scopes() {
        let ledger = ComplianceLedger::new();
        ledger.register_route(route("R002", 2024, 88.0, 4_800.0, false)).await.unwrap();
        ledger.register_route(route("R004", 2025, 89.2, 4_900.0, false)).await.unwrap();

        let expected = (89.3368 - 88.0) * 4_800.0 * 41_000.0;
        let fleet = ledger.compute_cb(CbScope::Fleet, Some(2024)).await.unwrap();
        assert_eq!(fleet.route_count, 1);
        assert!((fleet.cb_gco2eq - expected).abs() < 1e-3);

        let ship = ShipId::new("SHIP001");
        assert!(ledger.adjusted_cb(&ship, 2024).await.is_err());
        let stored = ledger
            .compute_cb(CbScope::Ship(ship.clone()), Some(2024))
            .await
            .unwrap();
        assert_eq!(stored.cb_gco2eq, fleet.cb_gco2eq);
        assert_eq!(
            ledger.adjusted_cb(&ship, 2024).await.unwrap().cb_before,
            fleet.cb_gco2eq
        );
    }

    #[tokio::test]
    async fn recompute_keeps_banked_surplus_out_of_base() {
        let ledger = ComplianceLedger::new();
        ledger.register_route(route("R101", 2026, 80.0, 1_000.0, false)).await.unwrap();
        let ship = ShipId::new("SHIP042");
        let scope = CbScope::Ship(ship.clone());

        let route_cb = ledger.compute_cb(scope.clone(), Some(2026)).await.unwrap().cb_gco2eq;
        ledger.bank_surplus(&ship, 2026, route_cb).await.unwrap();

        let recomputed = ledger.compute_cb(scope.clone(), Some(2026)).await.unwrap();
        assert_eq!(recomputed.cb_gco2eq, route_cb);

        let adjusted = ledger.adjusted_cb(&ship, 2026).await.unwrap();
        assert_eq!(adjusted.cb_before, 0.0);
        assert_eq!(adjusted.bank_adjustment, route_cb);
        assert_eq!(adjusted.adjusted_cb, route_cb);

        let err = ledger.bank_surplus(&ship, 2026, route_cb).await.unwrap_err();
        assert!(matches!(err, LedgerError::NoPositiveBalance { .. }));
        assert_eq!(ledger.bank_records(&ship, 2026).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn recompute_after_partial_bank_and_apply() {
        let ledger = ComplianceLedger::new();
        ledger.register_route(route("R101", 2026, 80.0, 1_000.0, false)).await.unwrap();
        let ship = ShipId::new("SHIP042");
        let scope = CbScope::Ship(ship.clone());

        let route_cb = ledger.compute_cb(scope.clone(), Some(2026)).await.unwrap().cb_gco2eq;
        ledger.bank_surplus(&ship, 2026, route_cb / 2.0).await.unwrap();
        ledger.apply_banked(&ship, 2026, route_cb / 4.0).await.unwrap();
        ledger.compute_cb(scope, Some(2026)).await.unwrap();

        let adjusted = ledger.adjusted_cb(&ship, 2026).await.unwrap();
        assert_eq!(adjusted.bank_adjustment, route_cb / 4.0);
        assert_eq!(adjusted.cb_before, route_cb * 3.0 / 4.0);
        assert!((adjusted.adjusted_cb - route_cb).abs() < 1e-6);

        let err = ledger.bank_surplus(&ship, 2026, route_cb).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Banking(BankingError::InsufficientBalance { .. })
        ));
    }

    #[tokio::test]
    async fn compute_cb_defaults_to_current_year() {
        let ledger = ComplianceLedger::new();
        let year = Utc::now().year();
        ledger.register_route(route("R201", year, 88.0, 100.0, false)).await.unwrap();

        let snapshot = ledger.compute_cb(CbScope::Fleet, None).await.unwrap();
        assert_eq!(snapshot.year, year);
        assert_eq!(snapshot.route_count, 1);
        assert!(snapshot.cb_gco2eq > 0.0);
    }

    #[tokio::test]
    async fn compute_cb_for_empty_year_is_zero() {
        let ledger = ComplianceLedger::new();
        let snapshot = ledger.compute_cb(CbScope::Fleet, Some(1999)).await.unwrap();
        assert_eq!(snapshot.cb_gco2eq, 0.0);
        assert_eq!(snapshot.route_count, 0);
    }

    #[tokio::test]
    async fn register_route_validates_figures() {
        let ledger = ComplianceLedger::new();
        let err = ledger
            .register_route(route("", 2024, 91.0, 5_000.0, false))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRequest(_)));

        let err = ledger
            .register_route(route("R001", 2024, f64::NAN, 5_000.0, false))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghg_intensity"));

        ledger.register_route(route("R001", 2024, 91.0, 5_000.0, false)).await.unwrap();
        let err = ledger
            .register_route(route("R001", 2024, 91.0, 5_000.0, false))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
    }

    #[tokio::test]
    async fn set_baseline_unknown_route() {
        let ledger = ComplianceLedger::new();
        let err = ledger.set_baseline(42).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert_eq!(err.to_string(), "Route not found: 42");

        let record = ledger.register_route(route("R001", 2024, 91.0, 5_000.0, false)).await.unwrap();
        let baseline = ledger.set_baseline(record.key).await.unwrap();
        assert!(baseline.route.is_baseline);
    }

    #[tokio::test]
    async fn comparison_requires_baseline() {
        let ledger = ComplianceLedger::new();
        ledger.register_route(route("R002", 2024, 88.0, 4_800.0, false)).await.unwrap();

        let err = ledger.comparison(2024).await.unwrap_err();
        assert!(matches!(err, LedgerError::NoBaseline { year: 2024 }));
    }

    #[tokio::test]
    async fn pool_policy_rejections() {
        let ledger = ComplianceLedger::new();

        let err = ledger
            .create_pool(2024, vec![PoolMemberInput::new("A", 10.0)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least 2 members"));

        let err = ledger
            .create_pool(
                2024,
                vec![PoolMemberInput::new("A", 10.0), PoolMemberInput::new("A", -5.0)],
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("duplicate pool member A"));

        let err = ledger
            .create_pool(
                2024,
                vec![PoolMemberInput::new(" ", 10.0), PoolMemberInput::new("B", -5.0)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRequest(_)));

        let err = ledger
            .create_pool(
                2024,
                vec![PoolMemberInput::new("A", f64::NAN), PoolMemberInput::new("B", -5.0)],
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must be finite"));

        let err = ledger
            .create_pool(
                2024,
                vec![PoolMemberInput::new("A", 10.0), PoolMemberInput::new("B", -50.0)],
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[tokio::test]
    async fn relaxed_policy_allows_net_deficit() {
        let config = LedgerConfig {
            pool: PoolPolicy {
                min_members: 1,
                require_non_negative_total: false,
            },
            ..LedgerConfig::default()
        };
        let ledger =
            ComplianceLedger::with_config(Arc::new(InMemoryFuelEuStorage::new()), config);

        let pool = ledger
            .create_pool(
                2024,
                vec![PoolMemberInput::new("A", 10.0), PoolMemberInput::new("B", -50.0)],
            )
            .await
            .unwrap();
        assert_eq!(pool.members[0].cb_after, 0.0);
        assert_eq!(pool.members[1].cb_after, -40.0);
        assert_eq!(pool.adjusted_cb(), -40.0);
    }

    #[tokio::test]
    async fn pool_round_trip() {
        let ledger = ComplianceLedger::new();
        let pool = ledger
            .create_pool(
                2024,
                vec![
                    PoolMemberInput::new("A", 100.0),
                    PoolMemberInput::new("B", -30.0),
                    PoolMemberInput::new("C", -50.0),
                ],
            )
            .await
            .unwrap();

        let summary = ledger.pool_adjusted_cb(&pool.pool_id).await.unwrap();
        assert_eq!(summary.year, 2024);
        assert_eq!(summary.adjusted_cb, 20.0);
        let after: Vec<f64> = summary.members.iter().map(|m| m.cb_after).collect();
        assert_eq!(after, vec![20.0, 0.0, 0.0]);

        let err = ledger.pool_adjusted_cb(&Uuid::new_v4()).await.unwrap_err();
        assert!(err.to_string().starts_with("Pool not found"));
    }
}
