use std::sync::Arc;

use folio_models::{
    builtin_tools, AddedHolding, AnalysisView, HoldingView, OpportunityQuery, OpportunityView,
    ReportView, SellView, ToolDescriptor,
};
use folio_transport::ToolClient;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::analysis::AnalysisService;
use crate::error::ServiceError;

/// Uniform façade over the two ways of reaching the analysis service.
///
/// The variant is chosen once at construction; callers never branch on
/// transport kind. Errors are propagated unchanged — isolating per-stage
/// failures is the report orchestrator's job, not the adapter's.
pub enum ServiceAdapter {
    /// Marshal operations over a connected [`ToolClient`].
    Transport(ToolClient),
    /// Dispatch directly to an in-process service.
    Direct(Arc<dyn AnalysisService>),
}

impl ServiceAdapter {
    pub async fn add_holding(
        &self,
        ticker: &str,
        shares: f64,
        price: Option<Decimal>,
    ) -> Result<AddedHolding, ServiceError> {
        match self {
            Self::Transport(client) => {
                let args = serde_json::json!({
                    "ticker": ticker,
                    "shares": shares,
                    "purchase_price": price.and_then(|p| p.to_f64()),
                });
                self.invoke(client, "add_to_portfolio", args).await
            }
            Self::Direct(service) => service.add_holding(ticker, shares, price).await,
        }
    }

    pub async fn portfolio(&self) -> Result<Vec<HoldingView>, ServiceError> {
        match self {
            Self::Transport(client) => {
                self.invoke(client, "get_portfolio", serde_json::json!({}))
                    .await
            }
            Self::Direct(service) => service.portfolio().await,
        }
    }

    pub async fn analyze_stock(&self, ticker: &str) -> Result<AnalysisView, ServiceError> {
        match self {
            Self::Transport(client) => {
                let args = serde_json::json!({ "ticker": ticker });
                self.invoke(client, "analyze_stock", args).await
            }
            Self::Direct(service) => service.analyze_stock(ticker).await,
        }
    }

    pub async fn should_sell(&self, ticker: &str) -> Result<SellView, ServiceError> {
        match self {
            Self::Transport(client) => {
                let args = serde_json::json!({ "ticker": ticker });
                self.invoke(client, "should_sell", args).await
            }
            Self::Direct(service) => service.should_sell(ticker).await,
        }
    }

    pub async fn find_buy_opportunities(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Vec<OpportunityView>, ServiceError> {
        match self {
            Self::Transport(client) => {
                let args = serde_json::to_value(query)?;
                self.invoke(client, "find_buy_opportunities", args).await
            }
            Self::Direct(service) => service.find_buy_opportunities(query).await,
        }
    }

    pub async fn generate_report(&self) -> Result<ReportView, ServiceError> {
        match self {
            Self::Transport(client) => {
                self.invoke(client, "generate_portfolio_report", serde_json::json!({}))
                    .await
            }
            Self::Direct(service) => service.generate_report().await,
        }
    }

    /// Operation descriptors: the transport's discovery result in transport
    /// mode, the compiled-in catalog in direct mode.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ServiceError> {
        match self {
            Self::Transport(client) => Ok(client.list_tools().await?),
            Self::Direct(_) => Ok(builtin_tools()),
        }
    }

    /// Tear down the underlying transport, if any.
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        match self {
            Self::Transport(client) => Ok(client.disconnect().await?),
            Self::Direct(_) => Ok(()),
        }
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        client: &ToolClient,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<T, ServiceError> {
        let value = client.call_tool(name, arguments).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScenarioAnalysisService;
    use folio_models::TransportConfig;
    use folio_transport::TransportError;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn direct_adapter_dispatches_to_the_service() {
        let service = Arc::new(ScenarioAnalysisService::new());
        let adapter = ServiceAdapter::Direct(service);

        let added = adapter
            .add_holding("TSLA", 23.0, Some(dec!(218.55)))
            .await
            .unwrap();
        assert_eq!(added.ticker, "TSLA");
        assert_eq!(added.shares, 23.0);

        let portfolio = adapter.portfolio().await.unwrap();
        assert_eq!(portfolio.len(), 1);
        assert_eq!(portfolio[0].ticker, "TSLA");
    }

    #[tokio::test]
    async fn direct_adapter_lists_builtin_tools() {
        let adapter = ServiceAdapter::Direct(Arc::new(ScenarioAnalysisService::new()));
        let tools = adapter.list_tools().await.unwrap();
        assert_eq!(tools.len(), 6);
    }

    #[tokio::test]
    async fn transport_adapter_propagates_not_connected() {
        // Client was never connected; the adapter must not swallow that.
        let adapter = ServiceAdapter::Transport(ToolClient::new(TransportConfig::default()));

        let result = adapter.portfolio().await;
        assert!(matches!(
            result,
            Err(ServiceError::Transport(TransportError::NotConnected))
        ));
    }

    #[tokio::test]
    async fn direct_adapter_propagates_service_failures() {
        let service = ScenarioAnalysisService::new().with_failing(["ZZZZ"]);
        let adapter = ServiceAdapter::Direct(Arc::new(service));

        let result = adapter.analyze_stock("ZZZZ").await;
        assert!(matches!(result, Err(ServiceError::Analysis(_))));
    }
}
