//! Decoding of `swaymsg -t get_inputs` device documents
//!
//! Maps one heterogeneous, capability-dependent JSON document to a
//! [`Device`] record. Key names come from the query-spelling side of
//! [`SettingKey`]. A missing key means "sway did not report this setting
//! for this device" and leaves the field unpopulated; a key that is
//! present with an unexpected shape makes the whole document malformed
//! (the registry skips it and keeps going).

use serde_json::Value;

use crate::device::{
    ClassSettings, Device, DeviceType, SettingKey, ToolMode, ACCEL_PROFILES, CLICK_METHODS,
    SCROLL_METHODS, TAP_BUTTON_MAPS,
};
use crate::opt::{Select, Setting};

/// A device document that could not be decoded.
#[derive(Debug)]
pub enum DecodeError {
    /// A required key (`type`, `name`, `identifier`, `libinput`,
    /// `send_events`) is absent
    MissingField(&'static str),
    /// A key is present but its value has an unexpected shape
    BadValue(&'static str),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MissingField(field) => write!(f, "missing field '{}'", field),
            DecodeError::BadValue(field) => {
                write!(f, "field '{}' has an unexpected value", field)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// `"enabled"` / `"disabled"` as reported by sway. Anything that is not
/// exactly `"enabled"` (e.g. `disabled_on_external_mouse`) counts as off.
fn parse_bool(word: &str) -> bool {
    word == "enabled"
}

fn require_str<'a>(doc: &'a Value, field: &'static str) -> Result<&'a str, DecodeError> {
    doc.get(field)
        .ok_or(DecodeError::MissingField(field))?
        .as_str()
        .ok_or(DecodeError::BadValue(field))
}

fn opt_int(doc: &Value, key: SettingKey) -> Result<Option<i32>, DecodeError> {
    match doc.get(key.query_name()) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(|n| Some(n as i32))
            .ok_or(DecodeError::BadValue(key.query_name())),
    }
}

fn opt_float(doc: &Value, key: SettingKey) -> Result<Option<f64>, DecodeError> {
    match doc.get(key.query_name()) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(DecodeError::BadValue(key.query_name())),
    }
}

fn opt_str<'a>(doc: &'a Value, key: SettingKey) -> Result<Option<&'a str>, DecodeError> {
    match doc.get(key.query_name()) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or(DecodeError::BadValue(key.query_name())),
    }
}

/// Decode a boolean reported as an enabled/disabled word.
fn opt_bool(doc: &Value, key: SettingKey) -> Result<Option<bool>, DecodeError> {
    Ok(opt_str(doc, key)?.map(parse_bool))
}

/// Decode an enumerated setting into a [`Select`] over `options`.
///
/// A reported value outside `options` leaves the field unpopulated rather
/// than producing a record that can never be rendered.
fn opt_select(
    doc: &Value,
    key: SettingKey,
    options: &[&str],
) -> Result<Option<Select>, DecodeError> {
    let Some(reported) = opt_str(doc, key)? else {
        return Ok(None);
    };
    let mut select = Select::new(options.iter().copied());
    if !select.select(reported) {
        tracing::debug!(
            setting = key.query_name(),
            value = reported,
            "sway reported a value outside the known options, skipping"
        );
        return Ok(None);
    }
    Ok(Some(select))
}

fn opt_matrix(doc: &Value, key: SettingKey) -> Result<Option<[f64; 6]>, DecodeError> {
    let Some(value) = doc.get(key.query_name()) else {
        return Ok(None);
    };
    let entries = value
        .as_array()
        .ok_or(DecodeError::BadValue(key.query_name()))?;
    if entries.len() != 6 {
        return Err(DecodeError::BadValue(key.query_name()));
    }
    let mut matrix = [0.0; 6];
    for (slot, entry) in matrix.iter_mut().zip(entries) {
        *slot = entry
            .as_f64()
            .ok_or(DecodeError::BadValue(key.query_name()))?;
    }
    Ok(Some(matrix))
}

fn set_if_present<T>(setting: &mut Setting<T>, value: Option<T>) {
    if let Some(value) = value {
        setting.set(value);
    }
}

/// Decode one device document.
///
/// Returns `Ok(None)` for skip-set device types (unknown, switch,
/// gesture); an unrecognized type tag maps to [`DeviceType::Unknown`] and
/// is therefore skipped too.
pub fn decode_device(doc: &Value) -> Result<Option<Device>, DecodeError> {
    let kind = DeviceType::from_name(require_str(doc, "type")?).unwrap_or(DeviceType::Unknown);
    let Some(mut class) = ClassSettings::for_type(kind) else {
        return Ok(None);
    };

    let name = require_str(doc, "name")?.to_string();
    let id = require_str(doc, "identifier")?.to_string();

    match &mut class {
        ClassSettings::Keyboard(keyboard) => {
            set_if_present(
                &mut keyboard.repeat_delay,
                opt_int(doc, SettingKey::RepeatDelay)?,
            );
            set_if_present(
                &mut keyboard.repeat_rate,
                opt_int(doc, SettingKey::RepeatRate)?,
            );
        }
        ClassSettings::Pointer(pointer) => {
            set_if_present(
                &mut pointer.scroll_factor,
                opt_float(doc, SettingKey::ScrollFactor)?,
            );
        }
        ClassSettings::Tablet(tablet) => {
            // sway cannot report the live tool_mode, so tablets start from
            // the defaults (any tool, absolute) with the setting disabled.
            tablet.tool_mode.set(ToolMode::default());
        }
    }

    let libinput_doc = doc.get("libinput").ok_or(DecodeError::MissingField("libinput"))?;
    let send_events = opt_str(libinput_doc, SettingKey::SendEvents)?
        .ok_or(DecodeError::MissingField("send_events"))?;

    let mut libinput = crate::device::LibinputSettings {
        send_events: parse_bool(send_events),
        ..Default::default()
    };

    set_if_present(
        &mut libinput.tap_to_click,
        opt_bool(libinput_doc, SettingKey::TapToClick)?,
    );
    set_if_present(
        &mut libinput.tap_and_drag,
        opt_bool(libinput_doc, SettingKey::TapAndDrag)?,
    );
    set_if_present(
        &mut libinput.tap_drag_lock,
        opt_bool(libinput_doc, SettingKey::TapDragLock)?,
    );
    set_if_present(
        &mut libinput.tap_button_map,
        opt_select(libinput_doc, SettingKey::TapButtonMap, TAP_BUTTON_MAPS)?,
    );
    set_if_present(
        &mut libinput.left_handed,
        opt_bool(libinput_doc, SettingKey::LeftHanded)?,
    );
    set_if_present(
        &mut libinput.natural_scroll,
        opt_bool(libinput_doc, SettingKey::NaturalScroll)?,
    );
    set_if_present(
        &mut libinput.middle_emulation,
        opt_bool(libinput_doc, SettingKey::MiddleEmulation)?,
    );
    set_if_present(
        &mut libinput.calibration_matrix,
        opt_matrix(libinput_doc, SettingKey::CalibrationMatrix)?,
    );
    set_if_present(
        &mut libinput.scroll_method,
        opt_select(libinput_doc, SettingKey::ScrollMethod, SCROLL_METHODS)?,
    );
    set_if_present(
        &mut libinput.scroll_button,
        opt_int(libinput_doc, SettingKey::ScrollButton)?,
    );
    set_if_present(&mut libinput.dwt, opt_bool(libinput_doc, SettingKey::Dwt)?);
    set_if_present(&mut libinput.dwtp, opt_bool(libinput_doc, SettingKey::Dwtp)?);
    set_if_present(
        &mut libinput.click_method,
        opt_select(libinput_doc, SettingKey::ClickMethod, CLICK_METHODS)?,
    );
    set_if_present(
        &mut libinput.accel_profile,
        opt_select(libinput_doc, SettingKey::AccelProfile, ACCEL_PROFILES)?,
    );
    set_if_present(
        &mut libinput.accel_speed,
        opt_float(libinput_doc, SettingKey::AccelSpeed)?,
    );

    Ok(Some(Device {
        id,
        name,
        kind,
        class,
        libinput,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyboard_doc() -> Value {
        json!({
            "identifier": "1:1:AT_Translated_Set_2_keyboard",
            "name": "AT Translated Set 2 keyboard",
            "type": "keyboard",
            "repeat_delay": 600,
            "repeat_rate": 40,
            "libinput": { "send_events": "enabled" }
        })
    }

    fn touchpad_doc() -> Value {
        json!({
            "identifier": "1267:12624:ELAN1200:00_04F3:3150_Touchpad",
            "name": "ELAN1200:00 04F3:3150 Touchpad",
            "type": "touchpad",
            "scroll_factor": 1.0,
            "libinput": {
                "send_events": "enabled",
                "tap": "enabled",
                "tap_button_map": "lrm",
                "tap_drag": "enabled",
                "tap_drag_lock": "disabled",
                "dwt": "enabled",
                "dwtp": "enabled",
                "natural_scroll": "disabled",
                "left_handed": "disabled",
                "middle_emulation": "disabled",
                "scroll_method": "two_finger",
                "click_method": "clickfinger",
                "accel_profile": "adaptive",
                "accel_speed": 0.5
            }
        })
    }

    #[test]
    fn test_decode_keyboard() {
        let device = decode_device(&keyboard_doc()).unwrap().unwrap();
        assert_eq!(device.kind, DeviceType::Keyboard);
        assert_eq!(device.id, "1:1:AT_Translated_Set_2_keyboard");
        assert_eq!(device.name, "AT Translated Set 2 keyboard");
        assert!(device.libinput.send_events);

        let keyboard = device.keyboard().unwrap();
        assert_eq!(keyboard.repeat_delay.get(), Some(&600));
        assert_eq!(keyboard.repeat_rate.get(), Some(&40));
        // No xkb query exists; stays unpopulated and disabled
        assert!(!keyboard.xkb_capslock.is_set());
        assert!(!keyboard.xkb_capslock.enabled);
        assert!(!keyboard.xkb_numlock.is_set());
        assert!(!keyboard.xkb_numlock.enabled);
    }

    #[test]
    fn test_decode_touchpad_libinput_block() {
        let device = decode_device(&touchpad_doc()).unwrap().unwrap();
        assert_eq!(device.kind, DeviceType::Touchpad);

        let pointer = device.pointer().unwrap();
        assert_eq!(pointer.scroll_factor.get(), Some(&1.0));

        let li = &device.libinput;
        assert_eq!(li.tap_to_click.get(), Some(&true));
        assert_eq!(li.tap_and_drag.get(), Some(&true));
        assert_eq!(li.tap_drag_lock.get(), Some(&false));
        assert_eq!(li.tap_button_map.get().unwrap().current(), Ok("lrm"));
        assert_eq!(li.scroll_method.get().unwrap().current(), Ok("two_finger"));
        assert_eq!(li.click_method.get().unwrap().current(), Ok("clickfinger"));
        assert_eq!(li.accel_profile.get().unwrap().current(), Ok("adaptive"));
        assert_eq!(li.accel_speed.get(), Some(&0.5));
        assert_eq!(li.dwt.get(), Some(&true));
        assert_eq!(li.dwtp.get(), Some(&true));
        assert_eq!(li.natural_scroll.get(), Some(&false));
        // Never reported, never synthesized
        assert!(!li.scroll_button.is_set());
        assert!(!li.calibration_matrix.is_set());
    }

    #[test]
    fn test_decode_skips_switch_devices() {
        let doc = json!({
            "identifier": "0:5:Lid_Switch",
            "name": "Lid Switch",
            "type": "switch",
            "libinput": { "send_events": "enabled" }
        });
        assert!(decode_device(&doc).unwrap().is_none());
    }

    #[test]
    fn test_decode_maps_unrecognized_type_to_unknown() {
        let doc = json!({
            "identifier": "9:9:Oddball",
            "name": "Oddball",
            "type": "holo_projector",
            "libinput": { "send_events": "enabled" }
        });
        // unknown is in the skip set
        assert!(decode_device(&doc).unwrap().is_none());
    }

    #[test]
    fn test_decode_tablet_gets_tool_mode_defaults() {
        let doc = json!({
            "identifier": "1386:890:Wacom_One_by_Wacom_S_Pen",
            "name": "Wacom One by Wacom S Pen",
            "type": "tablet_tool",
            "libinput": { "send_events": "enabled" }
        });
        let device = decode_device(&doc).unwrap().unwrap();
        let tablet = device.tablet().unwrap();
        let tool_mode = tablet.tool_mode.get().unwrap();
        assert_eq!(tool_mode.tool.current(), Ok("*"));
        assert_eq!(tool_mode.mode.current(), Ok("absolute"));
        assert!(!tablet.tool_mode.enabled);
    }

    #[test]
    fn test_decode_missing_identifier_is_an_error() {
        let doc = json!({
            "name": "Nameless",
            "type": "pointer",
            "libinput": { "send_events": "enabled" }
        });
        assert!(matches!(
            decode_device(&doc),
            Err(DecodeError::MissingField("identifier"))
        ));
    }

    #[test]
    fn test_decode_missing_libinput_is_an_error() {
        let doc = json!({
            "identifier": "2:7:Mouse",
            "name": "Mouse",
            "type": "pointer"
        });
        assert!(matches!(
            decode_device(&doc),
            Err(DecodeError::MissingField("libinput"))
        ));
    }

    #[test]
    fn test_decode_bad_repeat_delay_is_an_error() {
        let mut doc = keyboard_doc();
        doc["repeat_delay"] = json!("soon");
        assert!(matches!(
            decode_device(&doc),
            Err(DecodeError::BadValue("repeat_delay"))
        ));
    }

    #[test]
    fn test_decode_send_events_words() {
        let mut doc = touchpad_doc();
        doc["libinput"]["send_events"] = json!("disabled_on_external_mouse");
        let device = decode_device(&doc).unwrap().unwrap();
        assert!(!device.libinput.send_events);
    }

    #[test]
    fn test_decode_unknown_enum_value_leaves_field_unpopulated() {
        let mut doc = touchpad_doc();
        doc["libinput"]["click_method"] = json!("triple_tap");
        let device = decode_device(&doc).unwrap().unwrap();
        assert!(!device.libinput.click_method.is_set());
    }

    #[test]
    fn test_decode_calibration_matrix() {
        let doc = json!({
            "identifier": "3:3:Touchscreen",
            "name": "Touchscreen",
            "type": "pointer",
            "libinput": {
                "send_events": "enabled",
                "calibration_matrix": [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
            }
        });
        let device = decode_device(&doc).unwrap().unwrap();
        assert_eq!(
            device.libinput.calibration_matrix.get(),
            Some(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
        );
    }

    #[test]
    fn test_decode_short_calibration_matrix_is_an_error() {
        let doc = json!({
            "identifier": "3:3:Touchscreen",
            "name": "Touchscreen",
            "type": "pointer",
            "libinput": {
                "send_events": "enabled",
                "calibration_matrix": [1.0, 0.0]
            }
        });
        assert!(matches!(
            decode_device(&doc),
            Err(DecodeError::BadValue("calibration_matrix"))
        ));
    }
}
