//! # fueleu-core
//!
//! Pure computation for the ship compliance balance (CB) scheme:
//!
//! - **Calculator**: converts route GHG intensity and fuel consumption into
//!   an energy-weighted CB in gCO2eq, and aggregates it over a ship-year
//! - **Banking**: deposit/withdraw arithmetic over a single available
//!   balance snapshot
//! - **Pooling**: deterministic greedy reallocation of CB from surplus to
//!   deficit members, conserving the pool total
//! - **Comparison**: percentage delta against a baseline route and the
//!   compliance verdict against the regulatory target
//!
//! Every function here is synchronous and side-effect free. Callers pass
//! snapshots by value and persist whatever comes back; nothing in this crate
//! owns storage, logs, or retries.
//!
//! ## Sign conventions
//!
//! - CB > 0 is a surplus (actual intensity below target), CB < 0 a deficit.
//! - Bank entries > 0 are deposits, < 0 are withdrawals.

#![deny(unsafe_code)]

pub mod banking;
pub mod calculator;
pub mod comparison;
pub mod error;
pub mod params;
pub mod pooling;
pub mod types;

pub use banking::{apply_banked, available_banked, bank_surplus};
pub use calculator::{aggregate_cb, aggregate_cb_with, compute_cb};
pub use comparison::{compare, compare_routes, compute_percent_diff, is_compliant};
pub use error::BankingError;
pub use params::{RegulatoryParams, ENERGY_PER_TONNE, TARGET_INTENSITY};
pub use pooling::{create_pool, pool_total_after, pool_total_before};
pub use types::{
    BankingOutcome, CbScope, ComparisonVerdict, PoolAllocation, PoolMemberInput, Route,
    RouteComparison, ShipId,
};
