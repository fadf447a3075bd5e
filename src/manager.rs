//! Device registry
//!
//! [`DeviceManager`] owns the authoritative list of live device records
//! plus a backup snapshot taken right after discovery, and mediates every
//! operation: discovery, pushing a record's settings to the running
//! compositor, reverting to the snapshot, and rendering config blocks.
//!
//! The registry is synchronous and single-writer by construction: callers
//! must not re-run [`DeviceManager::discover`] while they iterate the live
//! list.

use tracing::{info, warn};

use crate::decode::decode_device;
use crate::device::{ClassSettings, Device, OUTPUT_WILDCARD};
use crate::ipc::{CompositorIpc, IpcError};
use crate::opt::Select;
use crate::render::{self, RenderError};

/// Registry operation failure.
#[derive(Debug)]
pub enum DeviceError {
    /// A discovery query could not be run or returned unparseable data.
    /// Fatal to the current session; retry discovery.
    Discovery(IpcError),
    /// Caller addressed a device index outside the list. A call-site bug;
    /// the registry fails loudly instead of silently doing nothing.
    IndexOutOfRange { index: usize, len: usize },
    /// A record held an enumerated setting with no selection. A
    /// construction bug, not a user-triggered condition.
    InvalidState(RenderError),
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::Discovery(e) => write!(f, "device discovery failed: {}", e),
            DeviceError::IndexOutOfRange { index, len } => {
                write!(f, "device index {} out of range (have {} devices)", index, len)
            }
            DeviceError::InvalidState(e) => write!(f, "invalid device record: {}", e),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::Discovery(e) => Some(e),
            DeviceError::IndexOutOfRange { .. } => None,
            DeviceError::InvalidState(e) => Some(e),
        }
    }
}

impl From<RenderError> for DeviceError {
    fn from(err: RenderError) -> Self {
        DeviceError::InvalidState(err)
    }
}

/// Owns the live device list and its backup snapshot.
pub struct DeviceManager {
    ipc: Box<dyn CompositorIpc>,
    devices: Vec<Device>,
    backup: Vec<Device>,
}

impl DeviceManager {
    /// Create an empty registry. Call [`DeviceManager::discover`] before
    /// anything else.
    pub fn new(ipc: Box<dyn CompositorIpc>) -> Self {
        Self {
            ipc,
            devices: Vec::new(),
            backup: Vec::new(),
        }
    }

    /// Query devices and outputs, decode and default the records, and
    /// replace both the live list and the backup snapshot.
    ///
    /// A malformed device document is skipped with a warning so one
    /// misbehaving device cannot hide the rest. Skip-set device types
    /// (unknown, switch, gesture) are never surfaced.
    pub fn discover(&mut self) -> Result<(), DeviceError> {
        let input_docs = self.ipc.query_inputs().map_err(DeviceError::Discovery)?;

        let mut devices = Vec::new();
        for doc in &input_docs {
            match decode_device(doc) {
                Ok(Some(device)) => {
                    tracing::debug!(id = %device.id, kind = %device.kind, "discovered input device");
                    devices.push(device);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "skipping malformed device document"),
            }
        }

        let output_docs = self.ipc.query_outputs().map_err(DeviceError::Discovery)?;
        let mut output_names: Vec<String> = Vec::new();
        for doc in &output_docs {
            match doc.get("name").and_then(|name| name.as_str()) {
                Some(name) => output_names.push(name.to_string()),
                None => warn!("skipping output description without a name"),
            }
        }
        output_names.push(OUTPUT_WILDCARD.to_string());
        let outputs = Select::with_selected(output_names, OUTPUT_WILDCARD);

        // Sway cannot report mapping or initial-lock state, so every
        // discovery pass seeds the same defaults (still disabled; the
        // user opts in).
        for device in &mut devices {
            match &mut device.class {
                ClassSettings::Keyboard(keyboard) => {
                    keyboard.xkb_capslock.set(false);
                    keyboard.xkb_numlock.set(false);
                }
                other => {
                    if let Some((map_to_output, map_to_region)) = other.mapping_mut() {
                        map_to_output.set(outputs.clone());
                        map_to_region.set(crate::device::Rect::default());
                    }
                }
            }
        }

        info!(
            devices = devices.len(),
            outputs = outputs.len() - 1,
            "device discovery complete"
        );
        self.devices = devices;
        self.backup = self.devices.clone();
        Ok(())
    }

    /// The live device list.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Mutable access to the live device list for caller edits.
    pub fn devices_mut(&mut self) -> &mut [Device] {
        &mut self.devices
    }

    pub fn get(&self, index: usize) -> Option<&Device> {
        self.devices.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Device> {
        self.devices.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Push a record's settings to the running compositor, one `swaymsg
    /// input` command per populated-and-enabled setting, `events` first.
    ///
    /// With `use_backup` the snapshot record is pushed instead, leaving
    /// caller edits in the live record untouched. The full command list is
    /// rendered before anything is executed, so an invalid record issues
    /// zero commands. A failing command is logged and does not stop the
    /// remaining commands.
    pub fn apply_changes(&self, index: usize, use_backup: bool) -> Result<(), DeviceError> {
        let list = if use_backup { &self.backup } else { &self.devices };
        let device = list.get(index).ok_or(DeviceError::IndexOutOfRange {
            index,
            len: list.len(),
        })?;

        let commands = render::command_list(device)?;
        for (key, value) in &commands {
            if let Err(e) = self.ipc.set_input(&device.id, key.command_name(), value) {
                warn!(
                    device = %device.id,
                    setting = key.command_name(),
                    error = %e,
                    "swaymsg input command failed"
                );
            }
        }

        info!(
            device = %device.id,
            commands = commands.len(),
            backup = use_backup,
            "applied device settings"
        );
        Ok(())
    }

    /// Re-push the backup snapshot's values to the compositor without
    /// touching the live record. Used for timed undo-if-not-confirmed
    /// workflows.
    pub fn revert_changes(&self, index: usize) -> Result<(), DeviceError> {
        self.apply_changes(index, true)
    }

    /// Revert the compositor to the snapshot and overwrite the live record
    /// with it, so in-memory and on-system state converge.
    pub fn restore_backup(&mut self, index: usize) -> Result<(), DeviceError> {
        self.apply_changes(index, true)?;
        // apply_changes validated the index against the backup list, and
        // both lists are replaced together in discover()
        self.devices[index] = self.backup[index].clone();
        Ok(())
    }

    /// Render a declarative sway config block for a live device,
    /// addressing it by identifier or (with `match_type`) by type. Pure;
    /// no compositor calls.
    pub fn generate_config(&self, index: usize, match_type: bool) -> Result<String, DeviceError> {
        let device = self.devices.get(index).ok_or(DeviceError::IndexOutOfRange {
            index,
            len: self.devices.len(),
        })?;
        Ok(render::config_block(device, match_type)?)
    }
}
