use std::sync::Arc;

use chrono::Utc;
use folio_models::OpportunityQuery;
use folio_service::ServiceAdapter;
use tracing::{info, warn};

use crate::error::ReportError;
use crate::formatter;
use crate::parser::extract_holdings;

/// Drives the multi-stage report pipeline against the service adapter.
///
/// This is the only layer allowed to swallow errors: every stage after
/// holding extraction follows an isolate-and-continue policy, logging the
/// failure and moving on, so one bad ticker never blanks the whole report.
/// Stages run sequentially; the fragment order is the fixed stage order and
/// per-ticker sections follow the input ticker order.
pub struct ReportOrchestrator {
    adapter: Arc<ServiceAdapter>,
}

impl ReportOrchestrator {
    pub fn new(adapter: Arc<ServiceAdapter>) -> Self {
        Self { adapter }
    }

    /// Produce one consolidated markdown report from a free-text task
    /// description. Only a failure of the extraction stage itself is fatal;
    /// zero extracted holdings still yields the unconditional snapshot and
    /// summary sections.
    pub async fn run(&self, task: &str) -> Result<String, ReportError> {
        info!("Generating investment report");

        let mut fragments: Vec<String> = Vec::new();
        fragments.push("# Investment Portfolio Analysis Report\n".to_string());
        fragments.push(format!(
            "*Generated on {}*\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        ));

        let holdings = extract_holdings(task)
            .map_err(|e| ReportError::Execution(format!("holding extraction failed: {e}")))?;
        info!(count = holdings.len(), "Extracted holdings from task");

        // Stage 2: add each candidate. Results are logged, not reported.
        for record in &holdings {
            match self
                .adapter
                .add_holding(&record.ticker, f64::from(record.shares), Some(record.price))
                .await
            {
                Ok(added) => {
                    info!(ticker = %record.ticker, result = %formatter::format_added(&added), "Added holding");
                }
                Err(e) => {
                    warn!(ticker = %record.ticker, error = %e, "Failed to add holding");
                }
            }
        }

        // Stage 3: unconditional portfolio snapshot.
        match self.adapter.portfolio().await {
            Ok(snapshot) => {
                fragments.push("## Current Portfolio\n\n".to_string());
                fragments.push(formatter::format_portfolio(&snapshot));
                fragments.push("\n\n".to_string());
            }
            Err(e) => warn!(error = %e, "Failed to fetch portfolio snapshot"),
        }

        // Stages 4 and 5 iterate the originally extracted tickers, whether
        // or not their add succeeded.
        if !holdings.is_empty() {
            fragments.push("## Individual Stock Analysis\n\n".to_string());
            for record in &holdings {
                match self.adapter.analyze_stock(&record.ticker).await {
                    Ok(analysis) => {
                        fragments.push(formatter::format_analysis(&analysis));
                        fragments.push("\n\n".to_string());
                    }
                    Err(e) => {
                        warn!(ticker = %record.ticker, error = %e, "Failed to analyze ticker");
                    }
                }
            }

            fragments.push("## Sell Recommendations\n\n".to_string());
            for record in &holdings {
                match self.adapter.should_sell(&record.ticker).await {
                    Ok(sell) => {
                        fragments.push(format!(
                            "### {}\n{}\n\n",
                            record.ticker,
                            formatter::format_sell(&sell)
                        ));
                    }
                    Err(e) => {
                        warn!(ticker = %record.ticker, error = %e, "Failed to get sell recommendation");
                    }
                }
            }
        }

        // Stage 6: one batched opportunity scan; skipped wholesale on failure.
        match self
            .adapter
            .find_buy_opportunities(&OpportunityQuery::default())
            .await
        {
            Ok(opportunities) => {
                fragments.push("## Buy Opportunities\n\n".to_string());
                fragments.push(formatter::format_opportunities(&opportunities));
                fragments.push("\n\n".to_string());
            }
            Err(e) => warn!(error = %e, "Failed to find buy opportunities"),
        }

        // Stage 7: summary.
        match self.adapter.generate_report().await {
            Ok(report) => {
                fragments.push("## Portfolio Summary\n\n".to_string());
                fragments.push(formatter::format_summary(&report));
            }
            Err(e) => warn!(error = %e, "Failed to generate portfolio summary"),
        }

        let report = fragments.concat();
        info!(length = report.len(), "Report assembled");
        Ok(report)
    }
}
