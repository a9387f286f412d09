use std::time::Duration;

use folio_models::{ToolDescriptor, TransportConfig};
use tracing::debug;

use crate::error::TransportError;

/// An open HTTP session against the remote tool server.
///
/// Cheap to clone: `reqwest::Client` is internally reference-counted, so the
/// client can hand out copies without holding its state lock across a call.
#[derive(Clone)]
pub struct RemoteSession {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteSession {
    /// Build the session bound to `host:port`. The configured timeout applies
    /// to every subsequent call. No round trip happens here; the first
    /// request surfaces connectivity problems.
    pub fn open(config: &TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    /// Discovery request: `GET /tools` returning the server-declared
    /// descriptor list.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, TransportError> {
        let response = self
            .http
            .get(format!("{}/tools", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Invoke one tool: `POST /call-tool` with `{"name", "arguments"}`,
    /// returning the operation's JSON result. Non-2xx responses are terminal
    /// and never retried.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        debug!(tool = name, "Invoking remote tool");

        let response = self
            .http
            .post(format!("{}/call-tool", self.base_url))
            .json(&serde_json::json!({ "name": name, "arguments": arguments }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_binds_configured_endpoint() {
        let config = TransportConfig {
            host: "analysis.internal".to_string(),
            port: 9100,
            ..TransportConfig::default()
        };

        let session = RemoteSession::open(&config).unwrap();
        assert_eq!(session.base_url, "http://analysis.internal:9100");
    }
}
