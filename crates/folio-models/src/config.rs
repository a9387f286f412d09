use serde::{Deserialize, Serialize};

/// Top-level configuration for the folio plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolioConfig {
    /// How the service adapter reaches the analysis service.
    #[serde(default)]
    pub mode: AdapterMode,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            mode: AdapterMode::Transport,
            transport: TransportConfig::default(),
        }
    }
}

/// Selected once at plugin construction; never mutated afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AdapterMode {
    /// Marshal every operation over a `ToolClient`.
    #[default]
    Transport,
    /// Dispatch directly to an in-process analysis service.
    Direct,
}

/// Configuration for the tool transport layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub kind: TransportKind,
    /// Shell command that starts the tool server. Required for `LocalProcess`.
    pub start_command: Option<String>,
    /// Applied to every remote call.
    pub timeout_seconds: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8004,
            kind: TransportKind::Remote,
            start_command: None,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// HTTP request/response over a persistent session.
    Remote,
    /// Spawned subprocess with piped stdio.
    LocalProcess,
}

impl TransportConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
