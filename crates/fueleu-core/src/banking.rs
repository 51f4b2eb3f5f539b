use crate::error::BankingError;
use crate::types::BankingOutcome;

/// Bank `amount` out of an `available` surplus.
///
/// All or nothing: either the full amount is banked or the call fails.
/// The caller persists a `+applied` bank entry and stores `remaining` as the
/// new base CB.
pub fn bank_surplus(available: f64, amount: f64) -> Result<BankingOutcome, BankingError> {
    // NaN fails this comparison too.
    if !(amount >= 0.0) {
        return Err(BankingError::non_positive("amount"));
    }
    if amount > available {
        return Err(BankingError::InsufficientBalance {
            requested: amount,
            available,
        });
    }

    Ok(BankingOutcome {
        applied: amount,
        remaining: available - amount,
    })
}

/// Apply up to `to_apply` of an `available` banked surplus.
///
/// Over-requests cap at `available` instead of failing. The caller must
/// reject the request upstream when `available <= 0`, then persist a
/// `-applied` bank entry and raise the stored base CB by `applied`.
pub fn apply_banked(available: f64, to_apply: f64) -> Result<BankingOutcome, BankingError> {
    if !(to_apply >= 0.0) {
        return Err(BankingError::non_positive("toApply"));
    }

    let applied = available.min(to_apply);
    Ok(BankingOutcome {
        applied,
        remaining: available - applied,
    })
}

/// Net unconsumed banked surplus of a ship-year.
///
/// Entries are signed, so deposits minus withdrawals is their plain sum.
pub fn available_banked(entries: impl IntoIterator<Item = f64>) -> f64 {
    entries.into_iter().sum()
}
