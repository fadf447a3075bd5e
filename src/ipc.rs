//! swaymsg subprocess interface
//!
//! All traffic to the compositor goes through one synchronous subprocess
//! round-trip per call: `swaymsg -t get_inputs --raw` and
//! `swaymsg -t get_outputs --raw` for queries, `swaymsg input <id>
//! <setting> <value>` for writes. There is no timeout or retry; a hung
//! swaymsg hangs the caller.
//!
//! The [`CompositorIpc`] trait is the seam the registry talks through, so
//! tests can substitute canned documents and a recording command log.

use std::process::Command;

use serde_json::Value;

/// Default swaymsg executable name, resolved via PATH
pub const DEFAULT_SWAYMSG: &str = "swaymsg";

/// A swaymsg invocation that could not be completed.
#[derive(Debug)]
pub enum IpcError {
    /// The executable could not be spawned
    Spawn(std::io::Error),
    /// The process ran but exited non-zero
    CommandFailed {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Trimmed stderr for diagnostics
        stderr: String,
    },
    /// stdout was not the expected JSON array
    Parse(serde_json::Error),
}

impl std::fmt::Display for IpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpcError::Spawn(e) => write!(f, "failed to run swaymsg: {}", e),
            IpcError::CommandFailed { code, stderr } => match code {
                Some(code) => write!(f, "swaymsg exited with status {}: {}", code, stderr),
                None => write!(f, "swaymsg was terminated by a signal: {}", stderr),
            },
            IpcError::Parse(e) => write!(f, "unparseable swaymsg output: {}", e),
        }
    }
}

impl std::error::Error for IpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IpcError::Spawn(e) => Some(e),
            IpcError::CommandFailed { .. } => None,
            IpcError::Parse(e) => Some(e),
        }
    }
}

/// Contract between the device registry and the compositor.
pub trait CompositorIpc {
    /// Fetch the device-description documents (`get_inputs`).
    fn query_inputs(&self) -> Result<Vec<Value>, IpcError>;

    /// Fetch the output descriptions (`get_outputs`).
    fn query_outputs(&self) -> Result<Vec<Value>, IpcError>;

    /// Apply one setting to one device. `setting` uses the command
    /// spelling; `value` is already encoded.
    fn set_input(&self, device_id: &str, setting: &str, value: &str) -> Result<(), IpcError>;
}

/// The real swaymsg subprocess client.
pub struct Swaymsg {
    path: String,
}

impl Swaymsg {
    /// Create a client invoking the given executable (name or path).
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn query(&self, message_type: &str) -> Result<Vec<Value>, IpcError> {
        let output = Command::new(&self.path)
            .args(["-t", message_type, "--raw"])
            .output()
            .map_err(IpcError::Spawn)?;

        if !output.status.success() {
            return Err(IpcError::CommandFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(
            message_type,
            bytes = output.stdout.len(),
            "swaymsg query complete"
        );
        serde_json::from_slice(&output.stdout).map_err(IpcError::Parse)
    }
}

impl Default for Swaymsg {
    fn default() -> Self {
        Self::new(DEFAULT_SWAYMSG)
    }
}

impl CompositorIpc for Swaymsg {
    fn query_inputs(&self) -> Result<Vec<Value>, IpcError> {
        self.query("get_inputs")
    }

    fn query_outputs(&self) -> Result<Vec<Value>, IpcError> {
        self.query("get_outputs")
    }

    fn set_input(&self, device_id: &str, setting: &str, value: &str) -> Result<(), IpcError> {
        let output = Command::new(&self.path)
            .args(["input", device_id, setting, value])
            .output()
            .map_err(IpcError::Spawn)?;

        if !output.status.success() {
            return Err(IpcError::CommandFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(device_id, setting, value, "swaymsg input command sent");
        Ok(())
    }
}
