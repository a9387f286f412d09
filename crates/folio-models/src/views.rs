//! Result shapes consumed from the analysis service.
//!
//! Numeric fields are `f64` because they arrive as JSON numbers from the
//! tool server; optional valuation metrics stay `Option` so the formatter
//! can render the `N/A` token instead of a fake number.

use serde::{Deserialize, Serialize};

/// Result of adding a stock to the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddedHolding {
    pub ticker: String,
    pub company_name: String,
    pub shares: f64,
    pub purchase_price: f64,
}

/// One portfolio entry with real-time valuation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldingView {
    pub ticker: String,
    pub company_name: String,
    pub shares: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub purchase_value: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,
}

/// Full stock analysis: price action, valuation, technicals, analyst data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisView {
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub industry: String,
    pub current_price: f64,
    pub price_52w_high: f64,
    pub price_52w_low: f64,
    pub change_1m_pct: f64,
    pub change_3m_pct: f64,
    pub market_cap: f64,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: f64,
    pub moving_avg_50d: Option<f64>,
    pub moving_avg_200d: Option<f64>,
    pub volatility: f64,
    pub beta: Option<f64>,
    pub analyst_recommendation: String,
    pub target_price: Option<f64>,
}

/// Sell recommendation for a single ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellView {
    pub ticker: String,
    pub recommendation: String,
    pub sell_score: u8,
    pub reasons: Vec<String>,
}

/// One candidate from a buy-opportunity scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpportunityView {
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub current_price: f64,
    pub buy_score: u8,
    pub reasons: Vec<String>,
}

/// Screening criteria for `find_buy_opportunities`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpportunityQuery {
    pub sectors: Option<Vec<String>>,
    pub min_market_cap: f64,
    pub max_pe: Option<f64>,
    pub min_dividend_yield: f64,
    pub limit: usize,
}

impl Default for OpportunityQuery {
    fn default() -> Self {
        Self {
            sectors: None,
            min_market_cap: 1e9,
            max_pe: Some(25.0),
            min_dividend_yield: 0.0,
            limit: 10,
        }
    }
}

/// Whole-portfolio summary report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportView {
    /// "ok" or "empty".
    pub status: String,
    /// Human-readable message when the portfolio is empty.
    pub message: Option<String>,
    pub holdings_count: usize,
    pub total_purchase_value: f64,
    pub total_current_value: f64,
    pub total_profit_loss: f64,
    pub total_profit_loss_pct: f64,
    pub sell_recommendations: Vec<SellView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_view_optional_metrics_from_null() {
        let json = serde_json::json!({
            "ticker": "TSLA",
            "company_name": "Tesla, Inc.",
            "sector": "Consumer Cyclical",
            "industry": "Auto Manufacturers",
            "current_price": 218.55,
            "price_52w_high": 299.29,
            "price_52w_low": 138.80,
            "change_1m_pct": -4.2,
            "change_3m_pct": 12.7,
            "market_cap": 690_000_000_000.0,
            "pe_ratio": null,
            "forward_pe": 58.3,
            "peg_ratio": null,
            "price_to_book": 9.1,
            "dividend_yield": 0.0,
            "moving_avg_50d": 210.12,
            "moving_avg_200d": null,
            "volatility": 48.5,
            "beta": 2.29,
            "analyst_recommendation": "hold",
            "target_price": null,
        });

        let view: AnalysisView = serde_json::from_value(json).unwrap();
        assert!(view.pe_ratio.is_none());
        assert!(view.target_price.is_none());
        assert_eq!(view.beta, Some(2.29));
    }

    #[test]
    fn opportunity_query_defaults() {
        let query = OpportunityQuery::default();
        assert_eq!(query.min_market_cap, 1e9);
        assert_eq!(query.max_pe, Some(25.0));
        assert_eq!(query.min_dividend_yield, 0.0);
        assert_eq!(query.limit, 10);
        assert!(query.sectors.is_none());
    }

    #[test]
    fn report_view_roundtrip() {
        let report = ReportView {
            status: "ok".to_string(),
            message: None,
            holdings_count: 2,
            total_purchase_value: 3000.0,
            total_current_value: 3000.0,
            total_profit_loss: 0.0,
            total_profit_loss_pct: 0.0,
            sell_recommendations: vec![SellView {
                ticker: "TSLA".to_string(),
                recommendation: "SELL".to_string(),
                sell_score: 7,
                reasons: vec!["Overvalued vs sector".to_string()],
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: ReportView = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deserialized);
    }
}
