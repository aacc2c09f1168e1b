//! Settlement module for aggregating graded wagers.

pub mod aggregator;
pub mod types;

pub use aggregator::{compute_settlement, unit_profit};
pub use types::{ResultStatus, SettlementInput, SettlementRecord, SettlementResult};
