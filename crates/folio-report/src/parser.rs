use folio_models::HoldingRecord;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::ReportError;

/// Holding mention with a dual-currency quote:
/// `23 Tesla (TSLA) shares @ €187.60 ($218.55)` — the USD amount is the price.
const DUAL_CURRENCY_PATTERN: &str =
    r"(\d+)\s+([A-Za-z\s]+)\s+\(([A-Z]+)\)\s+shares?\s+@\s+€[\d.]+\s+\(\$([\d.]+)\)";

/// Fallback with a single EUR quote: `23 Tesla (TSLA) shares @ €187.60`.
const SINGLE_CURRENCY_PATTERN: &str = r"(\d+)\s+([A-Za-z\s]+)\s+\(([A-Z]+)\)\s+shares?\s+@\s+€([\d.]+)";

/// Extract holding candidates from a free-text task description.
///
/// The dual-currency pattern is applied first; the fallback runs only when
/// it yields zero matches. That precedence is deliberate, not an error path.
/// The fallback uses the EUR amount as the price without conversion — a
/// currency conflation inherited from the task format and preserved as-is.
///
/// Candidates with zero shares, a non-positive price, or an empty company
/// name are dropped rather than admitted. Zero total matches is a valid
/// outcome; only a pattern failure is an error.
pub fn extract_holdings(task: &str) -> Result<Vec<HoldingRecord>, ReportError> {
    let dual = Regex::new(DUAL_CURRENCY_PATTERN)?;
    let mut records = collect(&dual, task);

    if records.is_empty() {
        let fallback = Regex::new(SINGLE_CURRENCY_PATTERN)?;
        records = collect(&fallback, task);
        if !records.is_empty() {
            warn!("USD prices not found, using EUR prices");
        }
    }

    Ok(records)
}

fn collect(pattern: &Regex, task: &str) -> Vec<HoldingRecord> {
    pattern
        .captures_iter(task)
        .filter_map(|caps| {
            let shares: u32 = caps[1].parse().ok()?;
            let company_name = caps[2].trim().to_string();
            let ticker = caps[3].to_string();
            let price: Decimal = caps[4].parse().ok()?;

            if shares == 0 || price <= Decimal::ZERO || company_name.is_empty() {
                warn!(
                    ticker = %ticker,
                    shares,
                    price = %price,
                    "Dropping invalid holding candidate"
                );
                return None;
            }

            Some(HoldingRecord {
                shares,
                company_name,
                ticker,
                price,
            })
        })
        .collect()
}
