//! crates/logger/src/settings.rs
//! Declarative logger settings loaded from the environment or deserialised
//! from a configuration file.

use std::env;
use std::ffi::OsStr;

use crate::config::ConfigUpdate;
use crate::error::ParseLevelError;
use crate::levels::{Level, code_of};

/// Environment variable holding the threshold label.
pub const LEVEL_ENV: &str = "LOG_LEVEL";
/// Environment variable holding the verbose flag.
pub const VERBOSE_ENV: &str = "LOG_VERBOSE";

/// Threshold and verbose flag in their serialisable form.
///
/// Absent fields leave the corresponding configuration untouched when the
/// settings are applied.
///
/// # Examples
///
/// ```
/// use logger::{Level, Logger, Settings};
///
/// let settings = Settings::from_vars([("LOG_LEVEL", "debug"), ("LOG_VERBOSE", "yes")]);
/// let logger = Logger::new();
/// logger.configure(settings.to_update().unwrap()).unwrap();
///
/// assert_eq!(logger.effective_level(), Level::Debug);
/// assert!(logger.verbose_enabled());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Settings {
    /// Threshold label such as `"WARN"`; matched case-insensitively.
    pub level: Option<String>,
    /// Whether `verbose` calls are emitted.
    pub verbose: Option<bool>,
}

impl Settings {
    /// Reads [`LEVEL_ENV`] and [`VERBOSE_ENV`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            level: environment_value(LEVEL_ENV),
            verbose: environment_value(VERBOSE_ENV).as_deref().and_then(parse_flag),
        }
    }

    /// Builds settings from explicit `(name, value)` pairs using the same
    /// variable names as [`Settings::from_env`]. Later pairs win.
    ///
    /// Empty values and unrecognised flags are treated as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let mut settings = Self::default();
        for (name, value) in vars {
            let Some(value) = non_empty(value.as_ref()) else {
                continue;
            };
            let name = name.as_ref();
            if name == LEVEL_ENV {
                settings.level = Some(value);
            } else if name == VERBOSE_ENV {
                settings.verbose = parse_flag(&value);
            }
        }
        settings
    }

    /// Returns the parsed threshold, if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ParseLevelError`] when the label names no standard level.
    pub fn parsed_level(&self) -> Result<Option<Level>, ParseLevelError> {
        self.level
            .as_deref()
            .map(|label| code_of(label).ok_or_else(|| ParseLevelError::new(label)))
            .transpose()
    }

    /// Converts the settings into a partial configuration update.
    ///
    /// # Errors
    ///
    /// Returns [`ParseLevelError`] when the level label is not recognised.
    pub fn to_update(&self) -> Result<ConfigUpdate, ParseLevelError> {
        let mut update = ConfigUpdate::new();
        if let Some(level) = self.parsed_level()? {
            update = update.level(level);
        }
        if let Some(verbose) = self.verbose {
            update = update.verbose(verbose);
        }
        Ok(update)
    }
}

fn environment_value(name: &'static str) -> Option<String> {
    let value = env::var_os(name)?;
    non_empty(&value)
}

fn non_empty(value: &OsStr) -> Option<String> {
    let value = value.to_string_lossy();
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if ["1", "true", "yes", "on"]
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
    {
        Some(true)
    } else if ["0", "false", "no", "off"]
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
    {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    /// Scoped environment mutation, restored when dropped.
    struct EnvGuard {
        entries: Vec<(&'static str, Option<OsString>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                entries: Vec::new(),
                _lock: env_lock().lock().unwrap_or_else(std::sync::PoisonError::into_inner),
            }
        }

        #[allow(unsafe_code)]
        fn set(&mut self, key: &'static str, value: &str) {
            self.entries.push((key, env::var_os(key)));
            // SAFETY: mutations are serialised by the lock and undone on drop.
            unsafe { env::set_var(key, value) };
        }

        #[allow(unsafe_code)]
        fn remove(&mut self, key: &'static str) {
            self.entries.push((key, env::var_os(key)));
            // SAFETY: mutations are serialised by the lock and undone on drop.
            unsafe { env::remove_var(key) };
        }
    }

    impl Drop for EnvGuard {
        #[allow(unsafe_code)]
        fn drop(&mut self) {
            for (key, previous) in self.entries.drain(..).rev() {
                match previous {
                    Some(value) => unsafe { env::set_var(key, value) },
                    None => unsafe { env::remove_var(key) },
                }
            }
        }
    }

    #[test]
    fn from_env_reads_process_variables() {
        let mut guard = EnvGuard::new();
        guard.set(LEVEL_ENV, "debug");
        guard.set(VERBOSE_ENV, "yes");

        let settings = Settings::from_env();
        assert_eq!(settings.level.as_deref(), Some("debug"));
        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.parsed_level(), Ok(Some(Level::Debug)));
    }

    #[test]
    fn from_env_treats_missing_and_blank_as_unset() {
        let mut guard = EnvGuard::new();
        guard.remove(LEVEL_ENV);
        guard.set(VERBOSE_ENV, "  ");

        assert_eq!(Settings::from_env(), Settings::default());
    }

    #[test]
    fn empty_vars_yield_empty_settings() {
        let settings = Settings::from_vars(Vec::<(&str, &str)>::new());
        assert_eq!(settings, Settings::default());
        assert!(settings.to_update().unwrap().is_empty());
    }

    #[test]
    fn reads_level_and_flag() {
        let settings = Settings::from_vars([("LOG_LEVEL", " Warn "), ("LOG_VERBOSE", "ON")]);
        assert_eq!(settings.level.as_deref(), Some("Warn"));
        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.parsed_level(), Ok(Some(Level::Warn)));
    }

    #[test]
    fn flag_spellings() {
        for truthy in ["1", "true", "YES", "On"] {
            assert_eq!(parse_flag(truthy), Some(true), "{truthy}");
        }
        for falsy in ["0", "False", "no", "OFF"] {
            assert_eq!(parse_flag(falsy), Some(false), "{falsy}");
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn ignores_unrelated_and_empty_vars() {
        let settings = Settings::from_vars([
            ("PATH", "/usr/bin"),
            ("LOG_LEVEL", "   "),
            ("LOG_VERBOSE", "sometimes"),
        ]);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn later_pairs_win() {
        let settings = Settings::from_vars([("LOG_LEVEL", "error"), ("LOG_LEVEL", "trace")]);
        assert_eq!(settings.parsed_level(), Ok(Some(Level::Trace)));
    }

    #[test]
    fn unknown_label_is_an_error() {
        let settings = Settings {
            level: Some("LOUD".to_owned()),
            verbose: Some(true),
        };
        let err = settings.to_update().unwrap_err();
        assert_eq!(err.label(), "LOUD");
    }

    #[test]
    fn update_carries_supplied_fields_only() {
        let settings = Settings {
            level: None,
            verbose: Some(false),
        };
        let update = settings.to_update().unwrap();
        assert!(update.requested_level().is_none());
        assert!(!update.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialises_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"level":"debug"}"#).unwrap();
        assert_eq!(settings.level.as_deref(), Some("debug"));
        assert_eq!(settings.verbose, None);

        assert!(serde_json::from_str::<Settings>(r#"{"colour":true}"#).is_err());
    }
}
