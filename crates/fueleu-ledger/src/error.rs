use crate::config::ConfigError;
use fueleu_core::{BankingError, ShipId};
use fueleu_storage::StorageError;
use thiserror::Error;

/// Ledger errors.
///
/// `Banking` carries the core's own failure unchanged; the other domain
/// variants are preconditions the ledger checks before calling the core.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("no positive compliance balance available for {ship_id} in {year}")]
    NoPositiveBalance { ship_id: ShipId, year: i32 },

    #[error("no banked surplus available for {ship_id} in {year}")]
    NoBankedSurplus { ship_id: ShipId, year: i32 },

    #[error("no baseline route set for {year}")]
    NoBaseline { year: i32 },

    #[error(transparent)]
    Banking(#[from] BankingError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
