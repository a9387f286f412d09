use std::sync::Arc;

use folio_models::{builtin_tools, AdapterMode, FolioConfig, ToolDescriptor};
use folio_report::{ReportError, ReportOrchestrator};
use folio_service::{AnalysisService, ServiceAdapter, ServiceError};
use folio_transport::{ToolClient, TransportError};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("plugin configuration error: {0}")]
    Config(String),

    #[error("plugin has not been started")]
    NotStarted,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

/// Portfolio-monitoring plugin for an agent host.
///
/// Owns at most one live connection at a time: `start` builds the adapter
/// (connecting the tool client in transport mode), `stop` tears it down.
/// The mode is fixed at construction and never changes.
pub struct InvestmentPlugin {
    config: FolioConfig,
    service: Option<Arc<dyn AnalysisService>>,
    adapter: Option<Arc<ServiceAdapter>>,
}

impl InvestmentPlugin {
    /// Plugin for transport mode. Direct mode needs [`Self::with_service`].
    pub fn new(config: FolioConfig) -> Self {
        Self {
            config,
            service: None,
            adapter: None,
        }
    }

    /// Plugin with an embedded analysis service for direct mode.
    pub fn with_service(config: FolioConfig, service: Arc<dyn AnalysisService>) -> Self {
        Self {
            config,
            service: Some(service),
            adapter: None,
        }
    }

    pub fn name(&self) -> &'static str {
        "investment"
    }

    pub fn description(&self) -> &'static str {
        "Monitors investment portfolios, analyzes stocks, and provides buy/sell \
         recommendations. Tracks stock performance, valuation metrics, and \
         generates comprehensive reports."
    }

    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Called when the hosting agent starts.
    pub async fn start(&mut self) -> Result<(), PluginError> {
        if self.adapter.is_some() {
            return Err(PluginError::Config("plugin already started".to_string()));
        }

        let adapter = match self.config.mode {
            AdapterMode::Transport => {
                let client = ToolClient::new(self.config.transport.clone());
                client.connect().await?;
                info!(
                    port = self.config.transport.port,
                    "Investment tool client connected"
                );
                ServiceAdapter::Transport(client)
            }
            AdapterMode::Direct => {
                let service = self.service.clone().ok_or_else(|| {
                    PluginError::Config("direct mode requires an analysis service".to_string())
                })?;
                info!("Investment service attached (direct mode)");
                ServiceAdapter::Direct(service)
            }
        };

        self.adapter = Some(Arc::new(adapter));
        Ok(())
    }

    /// Called when the hosting agent stops. Safe when never started.
    pub async fn stop(&mut self) -> Result<(), PluginError> {
        if let Some(adapter) = self.adapter.take() {
            adapter.shutdown().await?;
            info!("Investment tool client disconnected");
        }
        Ok(())
    }

    /// Operation descriptors exposed to the host agent. Empty in transport
    /// mode, where tool discovery is delegated to the transport.
    pub fn tool_functions(&self) -> Vec<ToolDescriptor> {
        match self.config.mode {
            AdapterMode::Transport => Vec::new(),
            AdapterMode::Direct => builtin_tools(),
        }
    }

    pub fn adapter(&self) -> Result<Arc<ServiceAdapter>, PluginError> {
        self.adapter.clone().ok_or(PluginError::NotStarted)
    }

    /// Run the full report pipeline against the live adapter.
    pub async fn execute_task(&self, task: &str) -> Result<String, PluginError> {
        let adapter = self.adapter()?;
        Ok(ReportOrchestrator::new(adapter).run(task).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_service::test_support::ScenarioAnalysisService;

    fn direct_config() -> FolioConfig {
        FolioConfig {
            mode: AdapterMode::Direct,
            ..FolioConfig::default()
        }
    }

    #[tokio::test]
    async fn execute_before_start_fails() {
        let plugin = InvestmentPlugin::new(FolioConfig::default());
        let result = plugin.execute_task("anything").await;
        assert!(matches!(result, Err(PluginError::NotStarted)));
    }

    #[tokio::test]
    async fn direct_mode_without_service_fails_to_start() {
        let mut plugin = InvestmentPlugin::new(direct_config());
        let result = plugin.start().await;
        assert!(matches!(result, Err(PluginError::Config(_))));
    }

    #[tokio::test]
    async fn direct_mode_lifecycle() {
        let service = Arc::new(ScenarioAnalysisService::new());
        let mut plugin = InvestmentPlugin::with_service(direct_config(), service);

        plugin.start().await.unwrap();
        let report = plugin
            .execute_task("5 Tesla (TSLA) shares @ €187.60 ($218.55)")
            .await
            .unwrap();
        assert!(report.contains("## Current Portfolio"));

        plugin.stop().await.unwrap();
        assert!(matches!(
            plugin.execute_task("anything").await,
            Err(PluginError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn stop_is_safe_when_never_started() {
        let mut plugin = InvestmentPlugin::new(FolioConfig::default());
        plugin.stop().await.unwrap();
        plugin.stop().await.unwrap();
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let service = Arc::new(ScenarioAnalysisService::new());
        let mut plugin = InvestmentPlugin::with_service(direct_config(), service);

        plugin.start().await.unwrap();
        assert!(matches!(plugin.start().await, Err(PluginError::Config(_))));
        plugin.stop().await.unwrap();
    }

    #[tokio::test]
    async fn tool_exposure_depends_on_mode() {
        let transport_plugin = InvestmentPlugin::new(FolioConfig::default());
        assert!(transport_plugin.tool_functions().is_empty());

        let direct_plugin = InvestmentPlugin::with_service(
            direct_config(),
            Arc::new(ScenarioAnalysisService::new()),
        );
        assert_eq!(direct_plugin.tool_functions().len(), 6);
    }

    #[test]
    fn plugin_identity() {
        let plugin = InvestmentPlugin::new(FolioConfig::default());
        assert_eq!(plugin.name(), "investment");
        assert_eq!(plugin.version(), env!("CARGO_PKG_VERSION"));
    }
}
