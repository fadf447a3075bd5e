//! Optional-setting primitives for device records
//!
//! Sway reports a setting only when a device actually supports it, and a
//! user may switch a supported setting off without losing the value they
//! typed in. Both states are modeled here:
//!
//! - [`Setting`]: an optional value with an independent enabled flag
//!   (absent / present-but-off / present-and-on)
//! - [`Select`]: an ordered list of mutually exclusive string options with
//!   at most one selection

/// A device setting that may be absent and, independently, toggled off.
///
/// `enabled` does not imply a value is present. Encoders must only emit a
/// setting when [`Setting::is_active`] holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting<T> {
    value: Option<T>,
    /// Whether the user wants this setting applied / written to config
    pub enabled: bool,
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Self {
            value: None,
            enabled: true,
        }
    }
}

impl<T> Setting<T> {
    /// Create an empty setting that starts disabled.
    ///
    /// Used for config-only settings sway cannot report (tool_mode,
    /// map_to_output, map_to_region, xkb_capslock, xkb_numlock): the user
    /// has to opt in before they are emitted anywhere.
    pub fn disabled() -> Self {
        Self {
            value: None,
            enabled: false,
        }
    }

    /// Create an enabled setting holding `value`.
    pub fn with(value: T) -> Self {
        Self {
            value: Some(value),
            enabled: true,
        }
    }

    /// Store a value. Leaves the enabled flag untouched.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Drop the stored value. Leaves the enabled flag untouched.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Borrow the stored value, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutably borrow the stored value, if any.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Whether a value is present (regardless of the enabled flag).
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Whether this setting should be emitted: value present and enabled.
    pub fn is_active(&self) -> bool {
        self.enabled && self.value.is_some()
    }
}

impl<T: Clone> Setting<T> {
    /// The stored value, or `default` if none is present.
    pub fn value_or(&self, default: T) -> T {
        self.value.clone().unwrap_or(default)
    }
}

/// Rendering a [`Select`] with no valid selection.
///
/// This is a recoverable "nothing selected" state callers must guard
/// against, not a crash: a record constructed through discovery always has
/// a default selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSelection;

impl std::fmt::Display for NoSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no option is selected")
    }
}

impl std::error::Error for NoSelection {}

/// An ordered set of mutually exclusive string options with at most one
/// current selection.
///
/// Used for every enumerated libinput setting (click method, scroll
/// method, tap button map, ...) and to enumerate available outputs for
/// device-to-output mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    /// Available options, in presentation order
    pub options: Vec<String>,
    /// Index of the current selection into `options`, if any
    pub selected: Option<usize>,
}

impl Select {
    /// Create a selection over `options` with nothing selected.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
        }
    }

    /// Create a selection over `options` with `name` preselected.
    ///
    /// If `name` is not among the options nothing is selected.
    pub fn with_selected<I>(options: I, name: &str) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut select = Self::new(options);
        select.select(name);
        select
    }

    /// Select the option matching `name` (case-sensitive exact match).
    ///
    /// Returns whether a match was found; the selection only changes on a
    /// match.
    pub fn select(&mut self, name: &str) -> bool {
        match self.options.iter().position(|opt| opt == name) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    /// The currently selected option string.
    pub fn current(&self) -> Result<&str, NoSelection> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
            .ok_or(NoSelection)
    }

    /// Number of selectable options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether there are no options at all.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_default_is_empty_and_enabled() {
        let setting: Setting<i32> = Setting::default();
        assert!(setting.enabled);
        assert!(!setting.is_set());
        assert!(!setting.is_active());
    }

    #[test]
    fn test_setting_disabled_is_empty_and_disabled() {
        let setting: Setting<bool> = Setting::disabled();
        assert!(!setting.enabled);
        assert!(!setting.is_set());
        assert!(!setting.is_active());
    }

    #[test]
    fn test_setting_enabled_without_value_is_not_active() {
        let setting: Setting<f64> = Setting::default();
        assert!(setting.enabled);
        assert!(!setting.is_active());
    }

    #[test]
    fn test_setting_set_keeps_enabled_flag() {
        let mut setting: Setting<bool> = Setting::disabled();
        setting.set(true);
        assert!(setting.is_set());
        assert!(!setting.enabled);
        assert!(!setting.is_active());
    }

    #[test]
    fn test_setting_toggle_retains_value() {
        let mut setting = Setting::with(600);
        setting.enabled = false;
        assert!(!setting.is_active());
        setting.enabled = true;
        assert!(setting.is_active());
        assert_eq!(setting.get(), Some(&600));
    }

    #[test]
    fn test_setting_clear() {
        let mut setting = Setting::with(1.5);
        setting.clear();
        assert!(!setting.is_set());
        assert!(setting.enabled);
    }

    #[test]
    fn test_setting_value_or() {
        let setting = Setting::with(40);
        assert_eq!(setting.value_or(25), 40);

        let empty: Setting<i32> = Setting::default();
        assert_eq!(empty.value_or(25), 25);
    }

    #[test]
    fn test_select_by_name() {
        let mut select = Select::new(["adaptive", "flat"]);
        assert!(select.select("flat"));
        assert_eq!(select.current(), Ok("flat"));
    }

    #[test]
    fn test_select_miss_keeps_selection() {
        let mut select = Select::with_selected(["lrm", "lmr"], "lrm");
        assert!(!select.select("rml"));
        assert_eq!(select.current(), Ok("lrm"));
    }

    #[test]
    fn test_select_is_case_sensitive() {
        let mut select = Select::new(["none", "edge"]);
        assert!(!select.select("Edge"));
        assert_eq!(select.current(), Err(NoSelection));
    }

    #[test]
    fn test_select_current_without_selection() {
        let select = Select::new(["pen", "eraser"]);
        assert_eq!(select.current(), Err(NoSelection));
    }

    #[test]
    fn test_select_current_out_of_bounds() {
        // options may be edited in place; a stale index must not panic
        let mut select = Select::with_selected(["a", "b", "c"], "c");
        select.options.truncate(1);
        assert_eq!(select.current(), Err(NoSelection));
    }

    #[test]
    fn test_with_selected_unknown_name() {
        let select = Select::with_selected(["absolute", "relative"], "asolute");
        assert_eq!(select.current(), Err(NoSelection));
    }
}
