use folio_models::{builtin_tools, ToolDescriptor, TransportConfig, TransportKind};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::TransportError;
use crate::local_process::ProcessSession;
use crate::remote::RemoteSession;

/// Lifecycle of the single connection a client owns.
///
/// Transitions are one-directional: `Idle → Connected → Closed`. There is no
/// reconnect-in-place; a caller that wants a fresh connection must discard
/// the client and build a new one.
enum ConnectionState {
    Idle,
    Connected(ConnectionHandle),
    Closed,
}

/// The live handle: an HTTP session or a spawned subprocess.
enum ConnectionHandle {
    Remote(RemoteSession),
    Process(ProcessSession),
}

/// Client for the portfolio tool server, polymorphic over the two transport
/// kinds. Exactly one connection handle exists per client instance.
pub struct ToolClient {
    config: TransportConfig,
    state: Mutex<ConnectionState>,
}

impl ToolClient {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ConnectionState::Idle),
        }
    }

    pub fn kind(&self) -> TransportKind {
        self.config.kind
    }

    /// Establish the connection: an HTTP session for `Remote`, a spawned
    /// subprocess for `LocalProcess`. Valid only once per client.
    pub async fn connect(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().await;

        match *state {
            ConnectionState::Idle => {}
            ConnectionState::Connected(_) => {
                return Err(TransportError::Config(
                    "transport already connected; disconnect first".to_string(),
                ));
            }
            ConnectionState::Closed => {
                return Err(TransportError::Config(
                    "transport was shut down; create a new client to reconnect".to_string(),
                ));
            }
        }

        let handle = match self.config.kind {
            TransportKind::Remote => ConnectionHandle::Remote(RemoteSession::open(&self.config)?),
            TransportKind::LocalProcess => {
                ConnectionHandle::Process(ProcessSession::spawn(&self.config)?)
            }
        };

        info!(
            kind = ?self.config.kind,
            host = %self.config.host,
            port = self.config.port,
            "Tool transport connected"
        );
        *state = ConnectionState::Connected(handle);
        Ok(())
    }

    /// Tear the connection down. Safe to call when never connected or
    /// already closed; for a subprocess this kills it and awaits its exit.
    pub async fn disconnect(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().await;

        match std::mem::replace(&mut *state, ConnectionState::Closed) {
            ConnectionState::Connected(ConnectionHandle::Process(session)) => {
                session.shutdown().await?;
                info!("Tool server process stopped");
            }
            ConnectionState::Connected(ConnectionHandle::Remote(_)) => {
                info!("Tool transport session closed");
            }
            ConnectionState::Idle | ConnectionState::Closed => {}
        }

        Ok(())
    }

    /// List the operations the server exposes. Remote issues a discovery
    /// request; local-process answers from the compiled-in catalog since its
    /// discovery framing is unimplemented.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, TransportError> {
        match self.remote_session().await? {
            Some(session) => session.list_tools().await,
            None => Ok(builtin_tools()),
        }
    }

    /// Invoke a named tool with JSON arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        match self.remote_session().await? {
            Some(session) => session.call_tool(name, arguments).await,
            None => Err(TransportError::Unsupported(
                "local-process transport has no invocation framing".to_string(),
            )),
        }
    }

    /// Resolve the current handle: `Some(session)` for a connected remote,
    /// `None` for a connected subprocess, `NotConnected` otherwise. Clones
    /// the session out so the state lock is not held across the request.
    async fn remote_session(&self) -> Result<Option<RemoteSession>, TransportError> {
        let state = self.state.lock().await;
        match &*state {
            ConnectionState::Connected(ConnectionHandle::Remote(session)) => {
                Ok(Some(session.clone()))
            }
            ConnectionState::Connected(ConnectionHandle::Process(_)) => Ok(None),
            ConnectionState::Idle | ConnectionState::Closed => Err(TransportError::NotConnected),
        }
    }
}
