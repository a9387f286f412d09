use async_trait::async_trait;
use folio_models::{
    AddedHolding, AnalysisView, HoldingView, OpportunityQuery, OpportunityView, ReportView,
    SellView,
};
use rust_decimal::Decimal;

use crate::error::ServiceError;

/// The in-process analysis service collaborator.
///
/// This is the seam the adapter dispatches to in direct mode. The valuation
/// and recommendation logic behind it is owned elsewhere; this crate only
/// consumes the result shapes. Mockable for testing.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Add a holding. `price` is the purchase price; `None` means the
    /// service looks up the current market price.
    async fn add_holding(
        &self,
        ticker: &str,
        shares: f64,
        price: Option<Decimal>,
    ) -> Result<AddedHolding, ServiceError>;

    /// Current portfolio with real-time valuations.
    async fn portfolio(&self) -> Result<Vec<HoldingView>, ServiceError>;

    /// Comprehensive single-stock analysis.
    async fn analyze_stock(&self, ticker: &str) -> Result<AnalysisView, ServiceError>;

    /// Sell recommendation for one ticker.
    async fn should_sell(&self, ticker: &str) -> Result<SellView, ServiceError>;

    /// Screen for buy candidates matching the query.
    async fn find_buy_opportunities(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Vec<OpportunityView>, ServiceError>;

    /// Whole-portfolio summary report.
    async fn generate_report(&self) -> Result<ReportView, ServiceError>;
}
