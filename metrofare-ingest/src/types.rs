use thiserror::Error;

/// Why a classified line did not yield a record. Never fatal: the caller
/// logs it and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected at least {expected} tokens, found {found}")]
    TooFewTokens { expected: usize, found: usize },

    #[error("month marker '{0}' has no leading month digits")]
    NoMonthDigits(String),

    #[error("month index {0} is not a calendar month")]
    UnmappedMonth(u32),

    #[error("revenue amount '{0}' is not an integer")]
    InvalidAmount(String),

    #[error("percentage '{0}' is not a number")]
    InvalidPercent(String),
}
