//! Input device model
//!
//! Types describing one sway input device and everything that can be set
//! on it. Field sets are taken from `man sway-input` and sway's
//! `ipc-json.c`.
//!
//! ## Device classes
//! Which settings apply depends on the device type, so the type-specific
//! settings live in a [`ClassSettings`] variant (keyboard / pointer-like /
//! tablet) while the libinput block shared by all classes stays a single
//! struct. Invalid combinations (a keyboard with a scroll factor) are
//! unrepresentable.
//!
//! ## Setting names
//! Some settings have a different name when read from
//! `swaymsg -t get_inputs` than when written via `swaymsg input` or a
//! config file (`send_events` is read as `send_events` but set as
//! `events`). [`SettingKey`] carries both spellings.

use crate::opt::{Select, Setting};

/// Tap button map options (left-right-middle / left-middle-right)
pub const TAP_BUTTON_MAPS: &[&str] = &["lrm", "lmr"];

/// Scroll method options
pub const SCROLL_METHODS: &[&str] = &["none", "two_finger", "edge", "on_button_down"];

/// Click method options
pub const CLICK_METHODS: &[&str] = &["none", "button_areas", "clickfinger"];

/// Pointer acceleration profile options
pub const ACCEL_PROFILES: &[&str] = &["adaptive", "flat"];

/// Tablet tool kinds, `*` matching any tool
pub const TOOL_MODE_TOOLS: &[&str] = &["pen", "eraser", "brush", "pencil", "airbrush", "*"];

/// Tablet tool modes
pub const TOOL_MODE_MODES: &[&str] = &["absolute", "relative"];

/// map_to_output wildcard matching the whole desktop layout
pub const OUTPUT_WILDCARD: &str = "*";

/// Device types reported by sway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Keyboard,
    Pointer,
    Touchpad,
    TabletTool,
    TabletPad,
    Gesture,
    Switch,
    Unknown,
}

/// Device types the registry never surfaces (lid switches and the like
/// have nothing configurable through this tool).
pub const SKIP_TYPES: &[DeviceType] =
    &[DeviceType::Unknown, DeviceType::Switch, DeviceType::Gesture];

impl DeviceType {
    /// The type tag string sway uses for this device type.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Keyboard => "keyboard",
            DeviceType::Pointer => "pointer",
            DeviceType::Touchpad => "touchpad",
            DeviceType::TabletTool => "tablet_tool",
            DeviceType::TabletPad => "tablet_pad",
            DeviceType::Gesture => "gesture",
            DeviceType::Switch => "switch",
            DeviceType::Unknown => "unknown",
        }
    }

    /// Parse a sway type tag. Unrecognized tags return `None`; decoders
    /// fall back to [`DeviceType::Unknown`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keyboard" => Some(DeviceType::Keyboard),
            "pointer" => Some(DeviceType::Pointer),
            "touchpad" => Some(DeviceType::Touchpad),
            "tablet_tool" => Some(DeviceType::TabletTool),
            "tablet_pad" => Some(DeviceType::TabletPad),
            "gesture" => Some(DeviceType::Gesture),
            "switch" => Some(DeviceType::Switch),
            "unknown" => Some(DeviceType::Unknown),
            _ => None,
        }
    }

    /// Whether the registry skips devices of this type.
    pub fn is_skipped(self) -> bool {
        SKIP_TYPES.contains(&self)
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings a device can have, keyed independently of their two external
/// spellings. Taken from `man sway-input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    RepeatDelay,
    RepeatRate,
    ScrollFactor,
    ToolMode,
    MapToOutput,
    MapToRegion,
    SendEvents,
    TapToClick,
    TapAndDrag,
    TapDragLock,
    TapButtonMap,
    LeftHanded,
    NaturalScroll,
    MiddleEmulation,
    CalibrationMatrix,
    ScrollMethod,
    ScrollButton,
    Dwt,
    Dwtp,
    ClickMethod,
    AccelProfile,
    AccelSpeed,
}

impl SettingKey {
    /// Key name in `swaymsg -t get_inputs --raw` output.
    pub fn query_name(self) -> &'static str {
        match self {
            SettingKey::RepeatDelay => "repeat_delay",
            SettingKey::RepeatRate => "repeat_rate",
            SettingKey::ScrollFactor => "scroll_factor",
            SettingKey::ToolMode => "tool_mode",
            SettingKey::MapToOutput => "map_to_output",
            SettingKey::MapToRegion => "map_to_region",
            SettingKey::SendEvents => "send_events",
            SettingKey::TapToClick => "tap",
            SettingKey::TapAndDrag => "tap_drag",
            SettingKey::TapDragLock => "tap_drag_lock",
            SettingKey::TapButtonMap => "tap_button_map",
            SettingKey::LeftHanded => "left_handed",
            SettingKey::NaturalScroll => "natural_scroll",
            SettingKey::MiddleEmulation => "middle_emulation",
            SettingKey::CalibrationMatrix => "calibration_matrix",
            SettingKey::ScrollMethod => "scroll_method",
            SettingKey::ScrollButton => "scroll_button",
            SettingKey::Dwt => "dwt",
            SettingKey::Dwtp => "dwtp",
            SettingKey::ClickMethod => "click_method",
            SettingKey::AccelProfile => "accel_profile",
            SettingKey::AccelSpeed => "accel_speed",
        }
    }

    /// Setting name in `swaymsg input <id> ...` commands and sway config
    /// files. Differs from the query name for a handful of settings.
    pub fn command_name(self) -> &'static str {
        match self {
            SettingKey::SendEvents => "events",
            SettingKey::TapAndDrag => "drag",
            SettingKey::TapDragLock => "drag_lock",
            SettingKey::AccelSpeed => "pointer_accel",
            other => other.query_name(),
        }
    }

    /// Reverse lookup by query spelling.
    pub fn from_query_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.query_name() == name)
    }

    /// Reverse lookup by command/config spelling.
    pub fn from_command_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.command_name() == name)
    }

    /// Every setting key, in command emission order.
    pub const ALL: &'static [SettingKey] = &[
        SettingKey::RepeatDelay,
        SettingKey::RepeatRate,
        SettingKey::ScrollFactor,
        SettingKey::ToolMode,
        SettingKey::MapToOutput,
        SettingKey::MapToRegion,
        SettingKey::SendEvents,
        SettingKey::TapToClick,
        SettingKey::TapAndDrag,
        SettingKey::TapDragLock,
        SettingKey::TapButtonMap,
        SettingKey::LeftHanded,
        SettingKey::NaturalScroll,
        SettingKey::MiddleEmulation,
        SettingKey::CalibrationMatrix,
        SettingKey::ScrollMethod,
        SettingKey::ScrollButton,
        SettingKey::Dwt,
        SettingKey::Dwtp,
        SettingKey::ClickMethod,
        SettingKey::AccelProfile,
        SettingKey::AccelSpeed,
    ];
}

/// An axis-aligned screen region, `map_to_region` shaped: `x y w h`.
///
/// Also the data shape shared with the external region-picker helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Tablet tool mapping: which tool kind runs in which mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMode {
    /// Tool kind, wildcard `*` matching any tool
    pub tool: Select,
    /// absolute / relative
    pub mode: Select,
}

impl Default for ToolMode {
    fn default() -> Self {
        Self {
            tool: Select::with_selected(TOOL_MODE_TOOLS.iter().copied(), OUTPUT_WILDCARD),
            mode: Select::with_selected(TOOL_MODE_MODES.iter().copied(), "absolute"),
        }
    }
}

/// Keyboard-only settings.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardSettings {
    /// Milliseconds before key repeat starts
    pub repeat_delay: Setting<i32>,
    /// Repeated characters per second
    pub repeat_rate: Setting<i32>,
    /// Enable capslock at startup; config-only, sway cannot report it
    pub xkb_capslock: Setting<bool>,
    /// Enable numlock at startup; config-only, sway cannot report it
    pub xkb_numlock: Setting<bool>,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            repeat_delay: Setting::default(),
            repeat_rate: Setting::default(),
            xkb_capslock: Setting::disabled(),
            xkb_numlock: Setting::disabled(),
        }
    }
}

/// Settings for pointers and touchpads.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSettings {
    pub scroll_factor: Setting<f64>,
    /// Output to map the device to; config-only, sway cannot report it
    pub map_to_output: Setting<Select>,
    /// Region to map the device to; config-only, sway cannot report it
    pub map_to_region: Setting<Rect>,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            scroll_factor: Setting::default(),
            map_to_output: Setting::disabled(),
            map_to_region: Setting::disabled(),
        }
    }
}

/// Settings for tablet tools and pads.
#[derive(Debug, Clone, PartialEq)]
pub struct TabletSettings {
    /// Per-tool absolute/relative mapping; config-only
    pub tool_mode: Setting<ToolMode>,
    /// Output to map the device to; config-only
    pub map_to_output: Setting<Select>,
    /// Region to map the device to; config-only
    pub map_to_region: Setting<Rect>,
}

impl Default for TabletSettings {
    fn default() -> Self {
        Self {
            tool_mode: Setting::disabled(),
            map_to_output: Setting::disabled(),
            map_to_region: Setting::disabled(),
        }
    }
}

/// Type-specific settings of a device.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassSettings {
    Keyboard(KeyboardSettings),
    /// Pointers and touchpads
    Pointer(PointerSettings),
    /// Tablet tools and pads
    Tablet(TabletSettings),
}

impl ClassSettings {
    /// Empty class settings for a surfaced device type, `None` for
    /// skip-set types.
    pub fn for_type(kind: DeviceType) -> Option<Self> {
        match kind {
            DeviceType::Keyboard => Some(ClassSettings::Keyboard(KeyboardSettings::default())),
            DeviceType::Pointer | DeviceType::Touchpad => {
                Some(ClassSettings::Pointer(PointerSettings::default()))
            }
            DeviceType::TabletTool | DeviceType::TabletPad => {
                Some(ClassSettings::Tablet(TabletSettings::default()))
            }
            DeviceType::Gesture | DeviceType::Switch | DeviceType::Unknown => None,
        }
    }

    /// The output/region mapping settings, for classes that have them.
    pub fn mapping_mut(&mut self) -> Option<(&mut Setting<Select>, &mut Setting<Rect>)> {
        match self {
            ClassSettings::Pointer(pointer) => {
                Some((&mut pointer.map_to_output, &mut pointer.map_to_region))
            }
            ClassSettings::Tablet(tablet) => {
                Some((&mut tablet.map_to_output, &mut tablet.map_to_region))
            }
            ClassSettings::Keyboard(_) => None,
        }
    }
}

/// Libinput settings shared across device classes. A field is populated
/// only when sway reported it for the device.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibinputSettings {
    /// Whether the device sends events at all. Always reported by sway,
    /// so not optional.
    pub send_events: bool,
    pub tap_to_click: Setting<bool>,
    pub tap_and_drag: Setting<bool>,
    pub tap_drag_lock: Setting<bool>,
    /// lrm / lmr
    pub tap_button_map: Setting<Select>,
    pub left_handed: Setting<bool>,
    pub natural_scroll: Setting<bool>,
    /// Middle-click emulation
    pub middle_emulation: Setting<bool>,
    /// 2x3 affine calibration transform
    pub calibration_matrix: Setting<[f64; 6]>,
    pub scroll_method: Setting<Select>,
    pub scroll_button: Setting<i32>,
    /// Disable while typing
    pub dwt: Setting<bool>,
    /// Disable while trackpointing
    pub dwtp: Setting<bool>,
    pub click_method: Setting<Select>,
    pub accel_profile: Setting<Select>,
    /// Roughly in [-1, 1]
    pub accel_speed: Setting<f64>,
}

/// One input device: identity plus every settable property relevant to
/// its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Identifier passed to `swaymsg input <id> ...`
    pub id: String,
    /// Human-readable device name
    pub name: String,
    pub kind: DeviceType,
    pub class: ClassSettings,
    pub libinput: LibinputSettings,
}

impl Device {
    pub fn keyboard(&self) -> Option<&KeyboardSettings> {
        match &self.class {
            ClassSettings::Keyboard(keyboard) => Some(keyboard),
            _ => None,
        }
    }

    pub fn keyboard_mut(&mut self) -> Option<&mut KeyboardSettings> {
        match &mut self.class {
            ClassSettings::Keyboard(keyboard) => Some(keyboard),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<&PointerSettings> {
        match &self.class {
            ClassSettings::Pointer(pointer) => Some(pointer),
            _ => None,
        }
    }

    pub fn pointer_mut(&mut self) -> Option<&mut PointerSettings> {
        match &mut self.class {
            ClassSettings::Pointer(pointer) => Some(pointer),
            _ => None,
        }
    }

    pub fn tablet(&self) -> Option<&TabletSettings> {
        match &self.class {
            ClassSettings::Tablet(tablet) => Some(tablet),
            _ => None,
        }
    }

    pub fn tablet_mut(&mut self) -> Option<&mut TabletSettings> {
        match &mut self.class {
            ClassSettings::Tablet(tablet) => Some(tablet),
            _ => None,
        }
    }
}
