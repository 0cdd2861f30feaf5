// Application settings
//
// Four independent typed namespaces (bool, int, float, string), each keyed
// by setting name. The same name may exist in more than one namespace at
// once; those are separate settings with no link between them.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

static GLOBAL: Lazy<Mutex<Settings>> = Lazy::new(|| Mutex::new(Settings::new()));

/// In-memory settings store.
///
/// Values set from the command line (Debug, Windowed, ConfigDirectory, ...)
/// live here alongside persisted ones; the io crate decides which names are
/// written out.
#[derive(Debug, Clone)]
pub struct Settings {
    bools: HashMap<String, bool>,
    ints: HashMap<String, i32>,
    floats: HashMap<String, f32>,
    strings: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create a store with the default values installed.
    pub fn new() -> Self {
        let mut settings = Self {
            bools: HashMap::new(),
            ints: HashMap::new(),
            floats: HashMap::new(),
            strings: HashMap::new(),
        };
        settings.set_defaults();
        settings
    }

    /// The process-wide instance, created with defaults on first access.
    ///
    /// All access goes through the mutex; callers that keep settings on a
    /// single thread can also construct their own `Settings` and pass it
    /// around instead.
    pub fn global() -> &'static Mutex<Settings> {
        &GLOBAL
    }

    /// Reset the named defaults.
    ///
    /// Clears the bool and int maps entirely, then reinstalls their
    /// defaults. String defaults are overwritten in place (caller-added
    /// string keys survive), and the float map is left alone entirely.
    pub fn set_defaults(&mut self) {
        self.bools.clear();
        self.ints.clear();

        self.bools.insert("BackgroundJoystickInput".into(), false);
        self.bools.insert("ParseGamelistOnly".into(), false);
        self.bools.insert("DrawFramerate".into(), false);
        self.bools.insert("ShowExit".into(), true);
        self.bools.insert("Windowed".into(), false);
        self.bools.insert("SplashScreen".into(), true);
        self.bools.insert("ShowHiddenFiles".into(), false);

        // The Pi already has trouble holding 60fps in some menus, so vsync
        // stays off by default there
        self.bools.insert("VSync".into(), !cfg!(feature = "rpi"));

        self.bools.insert("EnableSounds".into(), true);
        self.bools.insert("ShowHelpPrompts".into(), true);
        self.bools.insert("ScrapeRatings".into(), true);
        self.bools.insert("IgnoreGamelist".into(), false);
        self.bools.insert("HideConsole".into(), true);
        self.bools.insert("QuickSystemSelect".into(), true);
        self.bools.insert("SaveGamelistsOnExit".into(), true);

        self.bools.insert("Debug".into(), false);
        self.bools.insert("DebugGrid".into(), false);
        self.bools.insert("DebugText".into(), false);

        self.ints.insert("ScreenSaverTime".into(), 5 * 60 * 1000); // 5 minutes
        self.ints.insert("ScraperResizeWidth".into(), 400);
        self.ints.insert("ScraperResizeHeight".into(), 0);
        self.ints.insert("DisplayNumber".into(), 0);

        self.strings.insert("TransitionStyle".into(), "fade".into());
        self.strings.insert("ThemeSet".into(), String::new());
        self.strings.insert("ScreenSaverBehavior".into(), "dim".into());
        self.strings.insert("Scraper".into(), "TheGamesDB".into());
        self.strings.insert("ConfigDirectory".into(), String::new());
    }

    pub fn get_bool(&self, name: &str) -> bool {
        match self.bools.get(name) {
            Some(value) => *value,
            None => {
                log::error!("Tried to use unset setting {}!", name);
                false
            }
        }
    }

    pub fn get_int(&self, name: &str) -> i32 {
        match self.ints.get(name) {
            Some(value) => *value,
            None => {
                log::error!("Tried to use unset setting {}!", name);
                0
            }
        }
    }

    pub fn get_float(&self, name: &str) -> f32 {
        match self.floats.get(name) {
            Some(value) => *value,
            None => {
                log::error!("Tried to use unset setting {}!", name);
                0.0
            }
        }
    }

    pub fn get_string(&self, name: &str) -> &str {
        match self.strings.get(name) {
            Some(value) => value.as_str(),
            None => {
                log::error!("Tried to use unset setting {}!", name);
                ""
            }
        }
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.bools.insert(name.into(), value);
    }

    pub fn set_int(&mut self, name: impl Into<String>, value: i32) {
        self.ints.insert(name.into(), value);
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) {
        self.floats.insert(name.into(), value);
    }

    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }

    /// All bool settings, for serialization.
    pub fn bools(&self) -> &HashMap<String, bool> {
        &self.bools
    }

    /// All int settings, for serialization.
    pub fn ints(&self) -> &HashMap<String, i32> {
        &self.ints
    }

    /// All float settings, for serialization.
    pub fn floats(&self) -> &HashMap<String, f32> {
        &self.floats
    }

    /// All string settings, for serialization.
    pub fn strings(&self) -> &HashMap<String, String> {
        &self.strings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trips() {
        let mut settings = Settings::new();

        settings.set_bool("SplashScreen", false);
        settings.set_int("ScreenSaverTime", 60_000);
        settings.set_float("UIScale", 1.5);
        settings.set_string("ThemeSet", "carbon");

        assert!(!settings.get_bool("SplashScreen"));
        assert_eq!(settings.get_int("ScreenSaverTime"), 60_000);
        assert_eq!(settings.get_float("UIScale"), 1.5);
        assert_eq!(settings.get_string("ThemeSet"), "carbon");
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::new();

        assert!(settings.get_bool("ShowExit"));
        assert!(!settings.get_bool("Debug"));
        assert_eq!(settings.get_int("ScreenSaverTime"), 300_000);
        assert_eq!(settings.get_int("ScraperResizeWidth"), 400);
        assert_eq!(settings.get_string("Scraper"), "TheGamesDB");
        assert_eq!(settings.get_string("TransitionStyle"), "fade");
        assert_eq!(settings.get_string("ThemeSet"), "");
    }

    #[test]
    fn test_unset_names_return_zero_defaults() {
        let settings = Settings::new();

        assert!(!settings.get_bool("NoSuchSetting"));
        assert_eq!(settings.get_int("NoSuchSetting"), 0);
        assert_eq!(settings.get_float("NoSuchSetting"), 0.0);
        assert_eq!(settings.get_string("NoSuchSetting"), "");

        // Reads must not materialize the key
        assert!(!settings.bools().contains_key("NoSuchSetting"));
        assert!(!settings.ints().contains_key("NoSuchSetting"));
        assert!(!settings.floats().contains_key("NoSuchSetting"));
        assert!(!settings.strings().contains_key("NoSuchSetting"));
    }

    #[test]
    fn test_same_name_different_kinds_are_independent() {
        let mut settings = Settings::new();

        settings.set_bool("Scraper", true);
        assert!(settings.get_bool("Scraper"));
        // The string setting of the same name is untouched
        assert_eq!(settings.get_string("Scraper"), "TheGamesDB");
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let mut settings = Settings::new();

        settings.set_int("DisplayNumber", 1);
        settings.set_int("DisplayNumber", 2);
        assert_eq!(settings.get_int("DisplayNumber"), 2);
    }

    #[test]
    fn test_reset_clears_bools_and_ints() {
        let mut settings = Settings::new();

        settings.set_bool("MyCustomFlag", true);
        settings.set_int("MyCustomNumber", 7);
        settings.set_int("ScreenSaverTime", 1);
        settings.set_defaults();

        assert!(!settings.bools().contains_key("MyCustomFlag"));
        assert!(!settings.ints().contains_key("MyCustomNumber"));
        assert_eq!(settings.get_int("ScreenSaverTime"), 300_000);
    }

    #[test]
    fn test_reset_keeps_caller_floats_and_strings() {
        // Float and string maps are not cleared on reset: floats are left
        // alone entirely, string defaults are overwritten in place.
        let mut settings = Settings::new();

        settings.set_float("UIScale", 2.0);
        settings.set_string("MyCustomText", "kept");
        settings.set_string("Scraper", "ScreenScraper");
        settings.set_defaults();

        assert_eq!(settings.get_float("UIScale"), 2.0);
        assert_eq!(settings.get_string("MyCustomText"), "kept");
        // Default-bearing string keys do get their defaults back
        assert_eq!(settings.get_string("Scraper"), "TheGamesDB");
    }

    #[test]
    fn test_global_instance_is_shared() {
        {
            let mut settings = Settings::global().lock().unwrap();
            settings.set_int("DisplayNumber", 3);
        }
        let settings = Settings::global().lock().unwrap();
        assert_eq!(settings.get_int("DisplayNumber"), 3);
    }

    #[cfg(not(feature = "rpi"))]
    #[test]
    fn test_vsync_defaults_on() {
        assert!(Settings::new().get_bool("VSync"));
    }

    #[cfg(feature = "rpi")]
    #[test]
    fn test_vsync_defaults_off_on_pi() {
        assert!(!Settings::new().get_bool("VSync"));
    }
}
