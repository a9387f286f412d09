use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One holding extracted from a free-text task description.
///
/// Ephemeral: lives only for the duration of a single report run and is
/// never persisted. The parser guarantees the invariants: `shares` and
/// `price` are strictly positive and `ticker` is uppercase. Candidates that
/// fail those checks are dropped at parse time, not constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoldingRecord {
    pub shares: u32,
    pub company_name: String,
    pub ticker: String,
    pub price: Decimal,
}
