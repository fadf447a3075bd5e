//! Encoding device records into swaymsg commands and sway config text
//!
//! Both writers share one rule set: a setting is emitted only when it is
//! populated and enabled, the mandatory `events` setting always comes
//! first, and the remaining settings follow a fixed order so generated
//! output stays stable between calls.
//!
//! Value encodings must stay bit-exact for sway compatibility:
//! booleans are `enabled`/`disabled` (never `true`/`false`), enumerated
//! settings are the selected option string, the calibration matrix is six
//! space-separated decimals, a region is `x y w h`, and tool_mode is
//! `<tool> <mode>`.

use std::fmt::Display;

use crate::device::{ClassSettings, Device, Rect, SettingKey, ToolMode};
use crate::opt::{Select, Setting};

/// A `Select`-valued setting was populated and enabled but has no
/// selection. Discovery always selects a default, so this indicates the
/// record was constructed by hand and never selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderError {
    /// The setting that could not be rendered
    pub setting: SettingKey,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "setting '{}' has no selected option",
            self.setting.command_name()
        )
    }
}

impl std::error::Error for RenderError {}

/// The enabled/disabled word sway expects for booleans.
pub fn bool_word(value: bool) -> &'static str {
    if value {
        "enabled"
    } else {
        "disabled"
    }
}

fn rect_str(rect: &Rect) -> String {
    format!("{} {} {} {}", rect.x, rect.y, rect.w, rect.h)
}

fn matrix_str(matrix: &[f64; 6]) -> String {
    matrix
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn select_str(key: SettingKey, select: &Select) -> Result<String, RenderError> {
    select
        .current()
        .map(str::to_string)
        .map_err(|_| RenderError { setting: key })
}

fn tool_mode_str(key: SettingKey, tool_mode: &ToolMode) -> Result<String, RenderError> {
    // man sway-input: tool_mode <tool> <absolute|relative>
    Ok(format!(
        "{} {}",
        select_str(key, &tool_mode.tool)?,
        select_str(key, &tool_mode.mode)?
    ))
}

type Commands = Vec<(SettingKey, String)>;

fn push_value<T: Display>(out: &mut Commands, key: SettingKey, setting: &Setting<T>) {
    if setting.is_active() {
        if let Some(value) = setting.get() {
            out.push((key, value.to_string()));
        }
    }
}

fn push_bool(out: &mut Commands, key: SettingKey, setting: &Setting<bool>) {
    if setting.is_active() {
        if let Some(value) = setting.get() {
            out.push((key, bool_word(*value).to_string()));
        }
    }
}

fn push_select(
    out: &mut Commands,
    key: SettingKey,
    setting: &Setting<Select>,
) -> Result<(), RenderError> {
    if setting.is_active() {
        if let Some(select) = setting.get() {
            out.push((key, select_str(key, select)?));
        }
    }
    Ok(())
}

/// Render the full command list for a device: the setting key (command
/// spelling applies) and its encoded value, in the fixed emission order.
///
/// Pure; executing or printing the commands is the registry's business.
pub fn command_list(device: &Device) -> Result<Commands, RenderError> {
    let mut out = Commands::new();

    // send_events is mandatory and always leads
    out.push((
        SettingKey::SendEvents,
        bool_word(device.libinput.send_events).to_string(),
    ));

    match &device.class {
        ClassSettings::Keyboard(keyboard) => {
            push_value(&mut out, SettingKey::RepeatDelay, &keyboard.repeat_delay);
            push_value(&mut out, SettingKey::RepeatRate, &keyboard.repeat_rate);
        }
        ClassSettings::Pointer(pointer) => {
            push_value(&mut out, SettingKey::ScrollFactor, &pointer.scroll_factor);
            push_select(&mut out, SettingKey::MapToOutput, &pointer.map_to_output)?;
            if pointer.map_to_region.is_active() {
                if let Some(region) = pointer.map_to_region.get() {
                    out.push((SettingKey::MapToRegion, rect_str(region)));
                }
            }
        }
        ClassSettings::Tablet(tablet) => {
            if tablet.tool_mode.is_active() {
                if let Some(tool_mode) = tablet.tool_mode.get() {
                    out.push((
                        SettingKey::ToolMode,
                        tool_mode_str(SettingKey::ToolMode, tool_mode)?,
                    ));
                }
            }
            push_select(&mut out, SettingKey::MapToOutput, &tablet.map_to_output)?;
            if tablet.map_to_region.is_active() {
                if let Some(region) = tablet.map_to_region.get() {
                    out.push((SettingKey::MapToRegion, rect_str(region)));
                }
            }
        }
    }

    let li = &device.libinput;
    push_bool(&mut out, SettingKey::TapToClick, &li.tap_to_click);
    push_bool(&mut out, SettingKey::TapAndDrag, &li.tap_and_drag);
    push_bool(&mut out, SettingKey::TapDragLock, &li.tap_drag_lock);
    push_select(&mut out, SettingKey::TapButtonMap, &li.tap_button_map)?;
    push_bool(&mut out, SettingKey::LeftHanded, &li.left_handed);
    push_bool(&mut out, SettingKey::NaturalScroll, &li.natural_scroll);
    push_bool(&mut out, SettingKey::MiddleEmulation, &li.middle_emulation);
    if li.calibration_matrix.is_active() {
        if let Some(matrix) = li.calibration_matrix.get() {
            out.push((SettingKey::CalibrationMatrix, matrix_str(matrix)));
        }
    }
    push_select(&mut out, SettingKey::ScrollMethod, &li.scroll_method)?;
    push_value(&mut out, SettingKey::ScrollButton, &li.scroll_button);
    push_bool(&mut out, SettingKey::Dwt, &li.dwt);
    push_bool(&mut out, SettingKey::Dwtp, &li.dwtp);
    push_select(&mut out, SettingKey::ClickMethod, &li.click_method)?;
    push_select(&mut out, SettingKey::AccelProfile, &li.accel_profile)?;
    push_value(&mut out, SettingKey::AccelSpeed, &li.accel_speed);

    Ok(out)
}

/// Render a declarative sway config block for a device.
///
/// The header addresses the device by identifier, or by type when
/// `match_type` is set. Keyboard xkb_capslock/xkb_numlock exist only in
/// config files, so they are appended here and never appear in
/// [`command_list`].
pub fn config_block(device: &Device, match_type: bool) -> Result<String, RenderError> {
    let mut block = if match_type {
        format!("input type:{} {{\n", device.kind)
    } else {
        format!("input {} {{\n", device.id)
    };

    for (key, value) in command_list(device)? {
        block.push_str(&format!("    {} {}\n", key.command_name(), value));
    }

    if let ClassSettings::Keyboard(keyboard) = &device.class {
        if keyboard.xkb_capslock.is_active() {
            if let Some(value) = keyboard.xkb_capslock.get() {
                block.push_str(&format!("    xkb_capslock {}\n", bool_word(*value)));
            }
        }
        if keyboard.xkb_numlock.is_active() {
            if let Some(value) = keyboard.xkb_numlock.get() {
                block.push_str(&format!("    xkb_numlock {}\n", bool_word(*value)));
            }
        }
    }

    block.push('}');
    Ok(block)
}
