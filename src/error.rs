//! Unified error types for the wager calculator.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the wager calculator.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Odds parsing/formatting error.
    #[error("odds error: {0}")]
    Odds(#[from] OddsError),

    /// Bet math error.
    #[error("wager error: {0}")]
    Wager(#[from] WagerError),

    /// Settlement aggregation error.
    #[error("settlement error: {0}")]
    Settlement(#[from] SettlementError),

    /// Pick ingestion error.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the error was caused by caller input rather than an internal fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Odds(_)
                | AppError::Wager(_)
                | AppError::Settlement(_)
                | AppError::Ingest(_)
                | AppError::Json(_)
        )
    }
}

/// Odds parsing and formatting errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OddsError {
    /// The quotation string could not be interpreted as American odds.
    #[error("invalid American odds format: {0:?}")]
    InvalidOddsFormat(String),

    /// Decimal odds below 1.0 have no American representation.
    #[error("decimal odds must be 1.0 or greater, got {0}")]
    InvalidMultiplier(Decimal),
}

/// Payout, stake, odds and fee calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WagerError {
    /// Stake must be strictly positive.
    #[error("stake must be greater than zero, got {0}")]
    InvalidStake(Decimal),

    /// Payout must be strictly positive.
    #[error("payout must be greater than zero, got {0}")]
    InvalidPayout(Decimal),

    /// A winning bet returns more than it risks.
    #[error("payout {payout} must be greater than stake {stake} for a winning bet")]
    InvalidPayoutRelation {
        /// Stake supplied.
        stake: Decimal,
        /// Payout supplied.
        payout: Decimal,
    },

    /// Fee must lie in [0, 1).
    #[error("fee must be in [0, 1), got {0}")]
    InvalidFee(Decimal),

    /// Underlying odds error.
    #[error(transparent)]
    Odds(#[from] OddsError),
}

/// Settlement aggregation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// No records to aggregate.
    #[error("settlement dataset is empty")]
    EmptyDataset,

    /// Result status is not one of Win, Loss, Push or Void.
    #[error("unknown result status: {0:?}")]
    UnknownResultStatus(String),

    /// Unit size must be strictly positive.
    #[error("record {index}: unit size must be greater than zero, got {unit_size}")]
    InvalidUnitSize {
        /// Position of the record in the batch.
        index: usize,
        /// Offending unit size.
        unit_size: Decimal,
    },

    /// Odds of zero have no payout.
    #[error("record {index}: odds must be non-zero")]
    InvalidOdds {
        /// Position of the record in the batch.
        index: usize,
    },

    /// A running total left the representable range.
    #[error("record {index}: settlement totals out of range")]
    Overflow {
        /// Position of the record in the batch.
        index: usize,
    },
}

/// Errors turning scraped pick payloads into settlement records.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The page did not contain the embedded JSON script block.
    #[error("no embedded JSON data found in page")]
    EmbeddedJsonNotFound,

    /// The embedded block was not valid JSON.
    #[error("failed to parse embedded JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The configured records path did not resolve to a non-empty array.
    #[error("no records found at {0:?}")]
    MissingRecords(String),

    /// A required field was absent from a record.
    #[error("record {index}: missing required field {field:?}")]
    MissingField {
        /// Position of the record.
        index: usize,
        /// Output key that was expected.
        field: String,
    },

    /// A field was present but had the wrong shape.
    #[error("record {index}: invalid field {field:?}: {reason}")]
    InvalidField {
        /// Position of the record.
        index: usize,
        /// Output key.
        field: String,
        /// Reason for rejection.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
