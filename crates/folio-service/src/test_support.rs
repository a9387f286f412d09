//! Test support: a scripted in-memory analysis service.
//!
//! Implements the [`AnalysisService`] trait with deterministic data so the
//! adapter and report pipeline can be exercised without a tool server. The
//! shapes it returns match what the formatters consume; the numbers are
//! placeholders, not analysis.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use folio_models::{
    AddedHolding, AnalysisView, HoldingView, OpportunityQuery, OpportunityView, ReportView,
    SellView,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analysis::AnalysisService;
use crate::error::ServiceError;

pub struct ScenarioAnalysisService {
    portfolio: Mutex<Vec<HoldingView>>,
    /// Current market price overrides by ticker. Without an override the
    /// current price equals the purchase price.
    quotes: HashMap<String, f64>,
    /// Tickers for which every per-ticker operation fails.
    failing: HashSet<String>,
    /// Tickers whose analysis comes back with the optional metrics absent.
    missing_metrics: HashSet<String>,
    /// Scripted sell signals: ticker -> (score, recommendation).
    sell_signals: HashMap<String, (u8, String)>,
    opportunities: Vec<OpportunityView>,
}

impl ScenarioAnalysisService {
    pub fn new() -> Self {
        Self {
            portfolio: Mutex::new(Vec::new()),
            quotes: HashMap::new(),
            failing: HashSet::new(),
            missing_metrics: HashSet::new(),
            sell_signals: HashMap::new(),
            opportunities: Vec::new(),
        }
    }

    pub fn with_quote(mut self, ticker: &str, current_price: f64) -> Self {
        self.quotes.insert(ticker.to_string(), current_price);
        self
    }

    pub fn with_failing<I: IntoIterator<Item = &'static str>>(mut self, tickers: I) -> Self {
        self.failing
            .extend(tickers.into_iter().map(|t| t.to_string()));
        self
    }

    pub fn with_missing_metrics(mut self, ticker: &str) -> Self {
        self.missing_metrics.insert(ticker.to_string());
        self
    }

    pub fn with_sell_signal(mut self, ticker: &str, score: u8, recommendation: &str) -> Self {
        self.sell_signals
            .insert(ticker.to_string(), (score, recommendation.to_string()));
        self
    }

    pub fn with_opportunity(mut self, ticker: &str, company: &str, buy_score: u8) -> Self {
        self.opportunities.push(OpportunityView {
            ticker: ticker.to_string(),
            company_name: company.to_string(),
            sector: "Technology".to_string(),
            current_price: 100.0,
            buy_score,
            reasons: vec!["Trading below sector average P/E".to_string()],
        });
        self
    }

    fn check_ticker(&self, ticker: &str) -> Result<(), ServiceError> {
        if self.failing.contains(ticker) {
            return Err(ServiceError::Analysis(format!(
                "no data available for {ticker}"
            )));
        }
        Ok(())
    }

    fn lock_portfolio(&self) -> Result<std::sync::MutexGuard<'_, Vec<HoldingView>>, ServiceError> {
        self.portfolio
            .lock()
            .map_err(|e| ServiceError::Analysis(format!("portfolio mutex poisoned: {e}")))
    }
}

impl Default for ScenarioAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for ScenarioAnalysisService {
    async fn add_holding(
        &self,
        ticker: &str,
        shares: f64,
        price: Option<Decimal>,
    ) -> Result<AddedHolding, ServiceError> {
        self.check_ticker(ticker)?;

        let purchase_price = price.and_then(|p| p.to_f64()).unwrap_or(100.0);
        let current_price = self
            .quotes
            .get(ticker)
            .copied()
            .unwrap_or(purchase_price);

        let purchase_value = purchase_price * shares;
        let current_value = current_price * shares;
        let profit_loss = current_value - purchase_value;
        let profit_loss_pct = if purchase_value > 0.0 {
            profit_loss / purchase_value * 100.0
        } else {
            0.0
        };

        let company_name = format!("{ticker} Inc.");
        self.lock_portfolio()?.push(HoldingView {
            ticker: ticker.to_string(),
            company_name: company_name.clone(),
            shares,
            purchase_price,
            current_price,
            purchase_value,
            current_value,
            profit_loss,
            profit_loss_pct,
        });

        Ok(AddedHolding {
            ticker: ticker.to_string(),
            company_name,
            shares,
            purchase_price,
        })
    }

    async fn portfolio(&self) -> Result<Vec<HoldingView>, ServiceError> {
        Ok(self.lock_portfolio()?.clone())
    }

    async fn analyze_stock(&self, ticker: &str) -> Result<AnalysisView, ServiceError> {
        self.check_ticker(ticker)?;

        let current_price = self.quotes.get(ticker).copied().unwrap_or(100.0);
        let sparse = self.missing_metrics.contains(ticker);

        Ok(AnalysisView {
            ticker: ticker.to_string(),
            company_name: format!("{ticker} Inc."),
            sector: "Technology".to_string(),
            industry: "Software".to_string(),
            current_price,
            price_52w_high: current_price * 1.3,
            price_52w_low: current_price * 0.7,
            change_1m_pct: 2.5,
            change_3m_pct: -1.2,
            market_cap: 50_000_000_000.0,
            pe_ratio: (!sparse).then_some(24.5),
            forward_pe: (!sparse).then_some(21.0),
            peg_ratio: (!sparse).then_some(1.8),
            price_to_book: (!sparse).then_some(6.2),
            dividend_yield: 0.8,
            moving_avg_50d: (!sparse).then_some(current_price * 0.98),
            moving_avg_200d: (!sparse).then_some(current_price * 0.92),
            volatility: 28.0,
            beta: (!sparse).then_some(1.1),
            analyst_recommendation: "buy".to_string(),
            target_price: (!sparse).then_some(current_price * 1.15),
        })
    }

    async fn should_sell(&self, ticker: &str) -> Result<SellView, ServiceError> {
        self.check_ticker(ticker)?;

        let (sell_score, recommendation) = self
            .sell_signals
            .get(ticker)
            .cloned()
            .unwrap_or((3, "HOLD".to_string()));

        Ok(SellView {
            ticker: ticker.to_string(),
            recommendation,
            sell_score,
            reasons: vec!["No sell trigger conditions met".to_string()],
        })
    }

    async fn find_buy_opportunities(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Vec<OpportunityView>, ServiceError> {
        let mut matches = self.opportunities.clone();
        matches.truncate(query.limit);
        Ok(matches)
    }

    async fn generate_report(&self) -> Result<ReportView, ServiceError> {
        let holdings = self.lock_portfolio()?.clone();

        if holdings.is_empty() {
            return Ok(ReportView {
                status: "empty".to_string(),
                message: Some("Portfolio is empty.".to_string()),
                holdings_count: 0,
                total_purchase_value: 0.0,
                total_current_value: 0.0,
                total_profit_loss: 0.0,
                total_profit_loss_pct: 0.0,
                sell_recommendations: Vec::new(),
            });
        }

        let total_purchase_value: f64 = holdings.iter().map(|h| h.purchase_value).sum();
        let total_current_value: f64 = holdings.iter().map(|h| h.current_value).sum();
        let total_profit_loss = total_current_value - total_purchase_value;
        let total_profit_loss_pct = if total_purchase_value > 0.0 {
            total_profit_loss / total_purchase_value * 100.0
        } else {
            0.0
        };

        let mut sell_recommendations = Vec::new();
        for holding in &holdings {
            if let Some((score, rec)) = self.sell_signals.get(&holding.ticker) {
                if *score >= 6 {
                    sell_recommendations.push(SellView {
                        ticker: holding.ticker.clone(),
                        recommendation: rec.clone(),
                        sell_score: *score,
                        reasons: vec!["Scripted sell signal".to_string()],
                    });
                }
            }
        }

        Ok(ReportView {
            status: "ok".to_string(),
            message: None,
            holdings_count: holdings.len(),
            total_purchase_value,
            total_current_value,
            total_profit_loss,
            total_profit_loss_pct,
            sell_recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn add_then_report_totals() {
        let service = ScenarioAnalysisService::new().with_quote("TSLA", 120.0);
        service
            .add_holding("TSLA", 10.0, Some(dec!(100)))
            .await
            .unwrap();

        let report = service.generate_report().await.unwrap();
        assert_eq!(report.status, "ok");
        assert_eq!(report.holdings_count, 1);
        assert_eq!(report.total_purchase_value, 1000.0);
        assert_eq!(report.total_current_value, 1200.0);
        assert_eq!(report.total_profit_loss, 200.0);
    }

    #[tokio::test]
    async fn empty_report_has_empty_status() {
        let service = ScenarioAnalysisService::new();
        let report = service.generate_report().await.unwrap();
        assert_eq!(report.status, "empty");
        assert_eq!(report.message.as_deref(), Some("Portfolio is empty."));
    }

    #[tokio::test]
    async fn failing_ticker_errors_on_analysis() {
        let service = ScenarioAnalysisService::new().with_failing(["ZZZZ"]);
        assert!(service.analyze_stock("ZZZZ").await.is_err());
        assert!(service.should_sell("ZZZZ").await.is_err());
        assert!(service.add_holding("ZZZZ", 1.0, None).await.is_err());
    }

    #[tokio::test]
    async fn opportunity_limit_is_applied() {
        let service = ScenarioAnalysisService::new()
            .with_opportunity("MSFT", "Microsoft", 8)
            .with_opportunity("JNJ", "Johnson & Johnson", 7);

        let query = OpportunityQuery {
            limit: 0,
            ..OpportunityQuery::default()
        };
        assert!(service
            .find_buy_opportunities(&query)
            .await
            .unwrap()
            .is_empty());

        let query = OpportunityQuery::default();
        assert_eq!(service.find_buy_opportunities(&query).await.unwrap().len(), 2);
    }
}
