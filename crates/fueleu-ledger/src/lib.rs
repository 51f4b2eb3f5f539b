//! FuelEU compliance ledger.
//!
//! Facade over a [`FuelEuStorage`] backend that validates requests, runs the
//! pure `fueleu-core` computations on storage snapshots and persists the
//! results. Writes are serialized through one async gate; reads are not.
//!
//! ```no_run
//! # async fn demo() -> Result<(), fueleu_ledger::LedgerError> {
//! use fueleu_ledger::{ComplianceLedger, LedgerConfig};
//! use fueleu_core::{CbScope, ShipId};
//! use fueleu_storage::memory::InMemoryFuelEuStorage;
//! use std::sync::Arc;
//!
//! let config = LedgerConfig::load(Some(std::path::Path::new("fueleu.toml")))?;
//! let ledger = ComplianceLedger::with_config(Arc::new(InMemoryFuelEuStorage::new()), config);
//! let ship = ShipId::new("SHIP001");
//! ledger.compute_cb(CbScope::Ship(ship.clone()), Some(2024)).await?;
//! ledger.bank_surplus(&ship, 2024, 1_000.0).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`FuelEuStorage`]: fueleu_storage::FuelEuStorage

#![deny(unsafe_code)]

mod config;
mod error;
mod ledger;
mod views;

pub use config::{ConfigError, LedgerConfig, PoolPolicy};
pub use error::{LedgerError, LedgerResult};
pub use ledger::ComplianceLedger;
pub use views::{AdjustedCb, CbSnapshot, PoolSummary};
