//! Storage contract for the compliance balance ledger.
//!
//! This crate defines what the ledger needs from its persistence
//! collaborator:
//! - route records with a per-year baseline flag
//! - the stored base compliance balance per (ship, year)
//! - signed bank entries per (ship, year)
//! - immutable pool records with their member allocations
//!
//! Writes that touch more than one record (bank transactions, baseline
//! toggles, pool creation) are single trait calls so that a backend can run
//! them in one transaction.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
mod model;
mod traits;

pub use error::{StorageError, StorageResult};
pub use model::{BankEntryRecord, BankTransaction, PoolRecord, RouteKey, RouteRecord, ShipComplianceRecord};
pub use traits::{BankStore, ComplianceStore, FuelEuStorage, PoolStore, RouteStore};
