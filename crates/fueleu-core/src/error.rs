use thiserror::Error;

/// Errors raised by the banking arithmetic.
///
/// No other core operation fails: the calculator, pooling allocator and
/// comparison evaluator are total over finite inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankingError {
    /// A numeric precondition was violated before any computation ran.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The value is valid but larger than the available balance.
    #[error("insufficient available: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },
}

impl BankingError {
    pub(crate) fn non_positive(field: &str) -> Self {
        Self::InvalidArgument(format!("{} must be positive", field))
    }
}
