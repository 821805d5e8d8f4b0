//! crates/logger/src/levels.rs
//! Severity scale, call-time pseudo-levels and the label/code mapping.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseLevelError;
use crate::value::{Arg, Primitive};

/// Uppercase labels indexed by standard level code.
const LABELS: [&str; Level::COUNT] = ["OFF", "FATAL", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

/// Standard severity levels, ordered from most to least severe.
///
/// Lower codes are more severe. [`Level::Off`] is the bottom of the scale and
/// never emits; it only makes sense as a filter threshold.
#[repr(i8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Never emit.
    Off = 0,
    /// Unrecoverable failure.
    Fatal = 1,
    /// Operation failed.
    Error = 2,
    /// Something unexpected that did not fail the operation.
    Warn = 3,
    /// Routine progress information.
    Info = 4,
    /// Developer diagnostics.
    Debug = 5,
    /// Very fine-grained diagnostics.
    Trace = 6,
}

impl Level {
    /// Number of standard levels.
    pub const COUNT: usize = 7;

    /// Every standard level in code order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Off,
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Threshold applied while the configuration still holds the `DEFAULT`
    /// pseudo-level, and the level a `DEFAULT` call-time selector logs at.
    pub const DEFAULT: Self = Self::Info;

    /// Returns the numeric code of the level.
    ///
    /// # Examples
    ///
    /// ```
    /// use logger::Level;
    ///
    /// assert_eq!(Level::Off.code(), 0);
    /// assert_eq!(Level::Trace.code(), 6);
    /// ```
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Returns the uppercase label of the level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        LABELS[self as usize]
    }

    /// Looks up a standard level by numeric code.
    ///
    /// Pseudo-level codes and out-of-range values yield `None`.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        if code < 0 || code >= Self::COUNT as i64 {
            return None;
        }
        Some(Self::ALL[code as usize])
    }

    /// Reports whether this is the [`Level::Off`] threshold.
    #[must_use]
    pub const fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }

    /// Applies the gate rule with `self` as the configured threshold.
    ///
    /// A call at `level` passes when neither side is [`Level::Off`] and the
    /// call is at least as severe as the threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use logger::Level;
    ///
    /// assert!(Level::Warn.permits(Level::Error));
    /// assert!(Level::Warn.permits(Level::Warn));
    /// assert!(!Level::Warn.permits(Level::Info));
    /// assert!(!Level::Off.permits(Level::Fatal));
    /// ```
    #[must_use]
    pub const fn permits(self, level: Self) -> bool {
        !self.is_off() && !level.is_off() && level.code() <= self.code()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        code_of(input).ok_or_else(|| ParseLevelError::new(input))
    }
}

impl TryFrom<i64> for Level {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, i64> {
        Self::from_code(code).ok_or(code)
    }
}

impl TryFrom<&Arg> for Level {
    type Error = ();

    /// Accepts integers and integral floats inside the standard range.
    ///
    /// Negative zero normalises to [`Level::Off`]. Strings, booleans, `NaN`,
    /// fractional values and every structured value are rejected.
    fn try_from(value: &Arg) -> Result<Self, ()> {
        match value {
            Arg::Primitive(Primitive::Int(code)) => Self::from_code(*code).ok_or(()),
            Arg::Primitive(Primitive::Float(code)) => {
                if code.is_finite() && code.fract() == 0.0 && code.abs() < Self::COUNT as f64 {
                    Self::from_code(*code as i64).ok_or(())
                } else {
                    Err(())
                }
            }
            _ => Err(()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Call-time selectors that bypass or default the level gate.
///
/// None of these is a legal filter threshold.
#[repr(i8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PseudoLevel {
    /// Emitted only while the verbose flag is set, whatever the threshold.
    Verbose = -1,
    /// Forced output; ignores the threshold entirely.
    Log = -2,
    /// Logs at [`Level::DEFAULT`].
    Default = -3,
}

impl PseudoLevel {
    /// Returns the numeric code of the pseudo-level.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Returns the uppercase name of the pseudo-level.
    ///
    /// Unlike [`Level::label`], this is not part of the label mapping:
    /// [`label_of`] yields `""` for every pseudo-level code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verbose => "VERBOSE",
            Self::Log => "LOG",
            Self::Default => "DEFAULT",
        }
    }
}

/// Selector passed when emitting: a standard level or a pseudo-level.
///
/// Severities also key the per-level sink routing table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A standard level.
    Standard(Level),
    /// A call-time pseudo-level.
    Pseudo(PseudoLevel),
}

impl Severity {
    /// `FATAL` calls.
    pub const FATAL: Self = Self::Standard(Level::Fatal);
    /// `ERROR` calls.
    pub const ERROR: Self = Self::Standard(Level::Error);
    /// `WARN` calls.
    pub const WARN: Self = Self::Standard(Level::Warn);
    /// `INFO` calls.
    pub const INFO: Self = Self::Standard(Level::Info);
    /// `DEBUG` calls.
    pub const DEBUG: Self = Self::Standard(Level::Debug);
    /// `TRACE` calls.
    pub const TRACE: Self = Self::Standard(Level::Trace);
    /// Forced-output calls.
    pub const LOG: Self = Self::Pseudo(PseudoLevel::Log);
    /// Verbose-only calls.
    pub const VERBOSE: Self = Self::Pseudo(PseudoLevel::Verbose);
    /// Calls at the library default level.
    pub const DEFAULT: Self = Self::Pseudo(PseudoLevel::Default);

    /// Number of distinct sink routing slots.
    pub(crate) const SLOTS: usize = Level::COUNT + 2;

    /// Returns the numeric code of the severity.
    #[must_use]
    pub const fn code(self) -> i8 {
        match self {
            Self::Standard(level) => level.code(),
            Self::Pseudo(pseudo) => pseudo.code(),
        }
    }

    /// Returns the label from the standard mapping, `""` for pseudo-levels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard(level) => level.label(),
            Self::Pseudo(_) => "",
        }
    }

    /// Returns a display name for every severity, pseudo-levels included.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard(level) => level.label(),
            Self::Pseudo(pseudo) => pseudo.name(),
        }
    }

    /// Replaces the `DEFAULT` selector with the level it stands for.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Pseudo(PseudoLevel::Default) => Self::Standard(Level::DEFAULT),
            other => other,
        }
    }

    /// Index into the sink routing table.
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Standard(level) => level as usize,
            Self::Pseudo(PseudoLevel::Verbose) => Level::COUNT,
            Self::Pseudo(PseudoLevel::Log) => Level::COUNT + 1,
            Self::Pseudo(PseudoLevel::Default) => Level::DEFAULT as usize,
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        Self::Standard(level)
    }
}

impl From<PseudoLevel> for Severity {
    fn from(pseudo: PseudoLevel) -> Self {
        Self::Pseudo(pseudo)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the label of a standard level code, or `""`.
///
/// # Examples
///
/// ```
/// use logger::label_of;
///
/// assert_eq!(label_of(2), "ERROR");
/// assert_eq!(label_of(-1), "");
/// assert_eq!(label_of(7), "");
/// ```
#[must_use]
pub fn label_of(code: i64) -> &'static str {
    Level::from_code(code).map_or("", Level::label)
}

/// Returns the label for an arbitrary dynamic value, or `""`.
///
/// Never fails: non-numeric values, fractional numbers, `NaN` and
/// out-of-range codes all map to the empty label.
#[must_use]
pub fn label_of_value(value: &Arg) -> &'static str {
    Level::try_from(value).map_or("", Level::label)
}

/// Looks up a standard level by label.
///
/// Matching ignores ASCII case and surrounding whitespace. Pseudo-level names,
/// numeric strings and near-misses yield `None`.
///
/// # Examples
///
/// ```
/// use logger::{Level, code_of};
///
/// assert_eq!(code_of("  warn "), Some(Level::Warn));
/// assert_eq!(code_of("WARNING"), None);
/// assert_eq!(code_of("3"), None);
/// ```
#[must_use]
pub fn code_of(label: &str) -> Option<Level> {
    let label = label.trim();
    let mut upper = [0u8; 5];
    if label.len() > upper.len() {
        return None;
    }
    for (dst, src) in upper.iter_mut().zip(label.bytes()) {
        *dst = src.to_ascii_uppercase();
    }

    match &upper[..label.len()] {
        b"OFF" => Some(Level::Off),
        b"FATAL" => Some(Level::Fatal),
        b"ERROR" => Some(Level::Error),
        b"WARN" => Some(Level::Warn),
        b"INFO" => Some(Level::Info),
        b"DEBUG" => Some(Level::Debug),
        b"TRACE" => Some(Level::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod level_tests {
        use super::*;

        #[test]
        fn codes_follow_severity_order() {
            for (index, level) in Level::ALL.iter().enumerate() {
                assert_eq!(level.code() as usize, index);
            }
            assert!(Level::Off < Level::Fatal);
            assert!(Level::Fatal < Level::Error);
            assert!(Level::Debug < Level::Trace);
        }

        #[test]
        fn labels_are_unique_and_uppercase() {
            for (i, a) in Level::ALL.iter().enumerate() {
                assert_eq!(a.label(), a.label().to_ascii_uppercase());
                for b in &Level::ALL[i + 1..] {
                    assert_ne!(a.label(), b.label());
                }
            }
        }

        #[test]
        fn from_code_rejects_out_of_range() {
            assert_eq!(Level::from_code(0), Some(Level::Off));
            assert_eq!(Level::from_code(6), Some(Level::Trace));
            assert_eq!(Level::from_code(7), None);
            assert_eq!(Level::from_code(-1), None);
            assert_eq!(Level::from_code(i64::MIN), None);
            assert_eq!(Level::from_code(i64::MAX), None);
        }

        #[test]
        fn permits_applies_gate_rule() {
            assert!(Level::Trace.permits(Level::Fatal));
            assert!(Level::Fatal.permits(Level::Fatal));
            assert!(!Level::Fatal.permits(Level::Error));
            assert!(!Level::Off.permits(Level::Fatal));
            assert!(!Level::Trace.permits(Level::Off));
        }

        #[test]
        fn display_uses_label() {
            assert_eq!(Level::Warn.to_string(), "WARN");
            assert_eq!(format!("{}", Level::Off), "OFF");
        }

        #[test]
        fn from_str_parses_labels() {
            assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
            assert_eq!(" Trace\t".parse::<Level>(), Ok(Level::Trace));
            let err = "verbose".parse::<Level>().unwrap_err();
            assert_eq!(err.label(), "verbose");
        }

        #[test]
        fn try_from_code_returns_rejected_code() {
            let parsed: Result<Level, i64> = Level::try_from(4_i64);
            assert_eq!(parsed, Ok(Level::Info));
            assert_eq!(Level::try_from(-2_i64), Err(-2));
            assert_eq!(Level::try_from(7_i64), Err(7));
        }

        #[test]
        fn try_from_arg_accepts_integral_numbers_only() {
            assert_eq!(Level::try_from(&Arg::from(3)), Ok(Level::Warn));
            assert_eq!(Level::try_from(&Arg::from(5.0)), Ok(Level::Debug));
            assert_eq!(Level::try_from(&Arg::from(-0.0)), Ok(Level::Off));
            assert!(Level::try_from(&Arg::from(2.5)).is_err());
            assert!(Level::try_from(&Arg::from(f64::NAN)).is_err());
            assert!(Level::try_from(&Arg::from(f64::INFINITY)).is_err());
            assert!(Level::try_from(&Arg::from(-1)).is_err());
            assert!(Level::try_from(&Arg::from(999)).is_err());
            assert!(Level::try_from(&Arg::from("3")).is_err());
            assert!(Level::try_from(&Arg::from(true)).is_err());
            assert!(Level::try_from(&Arg::null()).is_err());
        }
    }

    mod severity_tests {
        use super::*;

        #[test]
        fn pseudo_levels_have_no_label() {
            assert_eq!(Severity::LOG.label(), "");
            assert_eq!(Severity::VERBOSE.label(), "");
            assert_eq!(Severity::DEFAULT.label(), "");
            assert_eq!(Severity::LOG.name(), "LOG");
            assert_eq!(Severity::ERROR.label(), "ERROR");
        }

        #[test]
        fn default_resolves_to_library_default() {
            assert_eq!(Severity::DEFAULT.resolve(), Severity::INFO);
            assert_eq!(Severity::LOG.resolve(), Severity::LOG);
            assert_eq!(Severity::TRACE.resolve(), Severity::TRACE);
        }

        #[test]
        fn slots_are_distinct_for_routable_severities() {
            let severities = [
                Severity::Standard(Level::Off),
                Severity::FATAL,
                Severity::ERROR,
                Severity::WARN,
                Severity::INFO,
                Severity::DEBUG,
                Severity::TRACE,
                Severity::VERBOSE,
                Severity::LOG,
            ];
            let mut seen = [false; Severity::SLOTS];
            for severity in severities {
                assert!(!seen[severity.slot()]);
                seen[severity.slot()] = true;
            }
            assert_eq!(Severity::DEFAULT.slot(), Severity::INFO.slot());
        }

        #[test]
        fn codes_are_disjoint() {
            assert_eq!(Severity::VERBOSE.code(), -1);
            assert_eq!(Severity::LOG.code(), -2);
            assert_eq!(Severity::DEFAULT.code(), -3);
            assert_eq!(Severity::FATAL.code(), 1);
        }
    }

    mod mapping_tests {
        use super::*;

        #[test]
        fn label_of_covers_every_standard_code() {
            let expected = ["OFF", "FATAL", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];
            for (code, label) in expected.iter().enumerate() {
                assert_eq!(label_of(code as i64), *label);
            }
        }

        #[test]
        fn label_of_rejects_pseudo_and_out_of_range() {
            assert_eq!(label_of(-1), "");
            assert_eq!(label_of(-2), "");
            assert_eq!(label_of(-3), "");
            assert_eq!(label_of(7), "");
            assert_eq!(label_of(999), "");
        }

        #[test]
        fn label_of_value_handles_any_shape() {
            assert_eq!(label_of_value(&Arg::from(-0.0)), "OFF");
            assert_eq!(label_of_value(&Arg::from(0.0)), "OFF");
            assert_eq!(label_of_value(&Arg::from(4.0)), "INFO");
            assert_eq!(label_of_value(&Arg::from(4.5)), "");
            assert_eq!(label_of_value(&Arg::from(f64::NAN)), "");
            assert_eq!(label_of_value(&Arg::from("INFO")), "");
            assert_eq!(label_of_value(&Arg::undefined()), "");
            assert_eq!(label_of_value(&Arg::from(serde_json::json!({"level": 1}))), "");
        }

        #[test]
        fn code_of_round_trips_labels() {
            for level in Level::ALL {
                assert_eq!(code_of(level.label()), Some(level));
                assert_eq!(label_of(i64::from(level.code())), level.label());
            }
        }

        #[test]
        fn code_of_is_case_insensitive_and_trims() {
            assert_eq!(code_of("error"), Some(Level::Error));
            assert_eq!(code_of("ErRoR"), Some(Level::Error));
            assert_eq!(code_of("\n fatal \t"), Some(Level::Fatal));
        }

        #[test]
        fn code_of_rejects_unknown_labels() {
            assert_eq!(code_of("INVALID"), None);
            assert_eq!(code_of(""), None);
            assert_eq!(code_of("   "), None);
            assert_eq!(code_of("WARNING"), None);
            assert_eq!(code_of("inf"), None);
            assert_eq!(code_of("2"), None);
            assert_eq!(code_of("LOG"), None);
            assert_eq!(code_of("VERBOSE"), None);
            assert_eq!(code_of("DEFAULT"), None);
            assert_eq!(code_of("ÉRROR"), None);
        }
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn level_serializes_as_label() {
            let json = serde_json::to_string(&Level::Warn).unwrap();
            assert_eq!(json, "\"WARN\"");
            let decoded: Level = serde_json::from_str("\"debug\"").unwrap();
            assert_eq!(decoded, Level::Debug);
            assert!(serde_json::from_str::<Level>("\"loud\"").is_err());
        }
    }
}
