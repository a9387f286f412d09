use std::process::Stdio;

use folio_models::TransportConfig;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::error::TransportError;

/// A spawned tool-server subprocess with piped stdio.
///
/// The process is started so a stdio framing protocol could speak to it, but
/// no invocation framing is defined yet: `call_tool` over this transport is
/// rejected as unsupported rather than silently dropped.
pub struct ProcessSession {
    child: Child,
}

impl ProcessSession {
    /// Spawn the configured start command through `sh -c` with independent
    /// stdin/stdout/stderr pipes.
    pub fn spawn(config: &TransportConfig) -> Result<Self, TransportError> {
        let command = config.start_command.as_deref().ok_or_else(|| {
            TransportError::Config(
                "start_command is required for the local-process transport".to_string(),
            )
        })?;

        debug!(command, "Spawning tool server process");

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        Ok(Self { child })
    }

    /// Terminate the subprocess and block until it has exited.
    pub async fn shutdown(mut self) -> Result<(), TransportError> {
        match self.child.start_kill() {
            Ok(()) => {}
            // InvalidInput means the child already exited on its own.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
                warn!("Tool server process exited before shutdown");
            }
            Err(e) => return Err(e.into()),
        }

        let status = self.child.wait().await?;
        debug!(%status, "Tool server process exited");
        Ok(())
    }
}
