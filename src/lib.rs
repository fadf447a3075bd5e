//! swictl library
//!
//! Runtime configuration of sway input devices: discover devices through
//! `swaymsg`, edit their settings in memory, push edits back as `swaymsg
//! input` commands or render them as sway config blocks.

pub mod config;
pub mod decode;
pub mod device;
pub mod ipc;
pub mod manager;
pub mod opt;
pub mod render;

/// Re-export commonly used types
pub use config::{AppSettings, Config, ConfigError};
pub use decode::{decode_device, DecodeError};
pub use device::{
    ClassSettings, Device, DeviceType, KeyboardSettings, LibinputSettings, PointerSettings,
    Rect, SettingKey, TabletSettings, ToolMode, SKIP_TYPES,
};
pub use ipc::{CompositorIpc, IpcError, Swaymsg, DEFAULT_SWAYMSG};
pub use manager::{DeviceError, DeviceManager};
pub use opt::{NoSelection, Select, Setting};
pub use render::{bool_word, command_list, config_block, RenderError};
