//! Typed conversion between environment strings and Rust values.

use std::fmt::Write as _;
use std::time::Duration;

/// Error produced when a string cannot be converted to a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {value:?} as {expected}")]
pub struct ConversionError {
    pub value: String,
    pub expected: &'static str,
}

impl ConversionError {
    fn new(value: &str, expected: &'static str) -> Self {
        Self {
            value: value.to_owned(),
            expected,
        }
    }
}

/// A value that can be read from and written to an environment variable.
pub trait EnvValue: Sized {
    /// Parse the raw variable text.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError` if `raw` is not a valid representation.
    fn from_env(raw: &str) -> Result<Self, ConversionError>;

    /// Render the value as variable text.
    fn to_env(&self) -> String;
}

impl EnvValue for String {
    fn from_env(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_owned())
    }

    fn to_env(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_env_value_from_str {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn from_env(raw: &str) -> Result<Self, ConversionError> {
                    raw.parse().map_err(|_| ConversionError::new(raw, $name))
                }

                fn to_env(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_env_value_from_str! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

impl EnvValue for bool {
    /// Accepts `true`, `false`, `1`, `0`, `yes`, `no`, `on`, `off` in any case.
    fn from_env(raw: &str) -> Result<Self, ConversionError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConversionError::new(raw, "bool")),
        }
    }

    fn to_env(&self) -> String {
        self.to_string()
    }
}

impl EnvValue for Vec<String> {
    fn from_env(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.split(',').map(|item| item.trim().to_owned()).collect())
    }

    fn to_env(&self) -> String {
        self.join(",")
    }
}

impl EnvValue for Duration {
    fn from_env(raw: &str) -> Result<Self, ConversionError> {
        parse_duration(raw)
    }

    fn to_env(&self) -> String {
        format_duration(*self)
    }
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a compound duration such as `1h30m`, `1.5s`, or `300ms`.
///
/// A bare `0` is accepted. Negative durations are rejected.
///
/// # Errors
///
/// Returns `ConversionError` on malformed input or unknown units.
pub fn parse_duration(raw: &str) -> Result<Duration, ConversionError> {
    let err = || ConversionError::new(raw, "duration");

    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(err());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_num) = after_int.strip_prefix('.').map_or(("", after_int), |s| {
            let frac_len = s.bytes().take_while(u8::is_ascii_digit).count();
            s.split_at(frac_len)
        });
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }

        let unit_len = after_num
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit() || *ch == '.')
            .map_or(after_num.len(), |(idx, _)| idx);
        let (unit, tail) = after_num.split_at(unit_len);
        let scale = unit_nanos(unit).ok_or_else(err)?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| err())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(err)?;

        let mut place = scale;
        for digit in frac_part.bytes() {
            place /= 10;
            if place == 0 {
                break;
            }
            nanos += u128::from(digit - b'0') * place;
        }

        total = total.checked_add(nanos).ok_or_else(err)?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| err())?;
    let sub = u32::try_from(total % NANOS_PER_SEC).map_err(|_| err())?;
    Ok(Duration::new(secs, sub))
}

/// Render a duration in the form accepted by [`parse_duration`].
///
/// Durations under one second use the largest fitting sub-second unit
/// (`300ms`, `1.5us`); longer ones are written as hours, minutes, and
/// seconds (`1h30m0s`, `1.5s`).
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_nanos();
    if total == 0 {
        return "0s".to_owned();
    }

    if total < NANOS_PER_SEC {
        let (scale, unit) = if total < NANOS_PER_MICRO {
            (1, "ns")
        } else if total < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "us")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        return format!("{}{unit}", decimal(total, scale));
    }

    let mut out = String::new();
    let hours = total / NANOS_PER_HOUR;
    let minutes = (total % NANOS_PER_HOUR) / NANOS_PER_MIN;
    let seconds = total % NANOS_PER_MIN;
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{}s", decimal(seconds, NANOS_PER_SEC));
    out
}

fn decimal(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(i32::from_env("-42"), Ok(-42));
        assert_eq!(u8::from_env("255"), Ok(255));
        assert!(u8::from_env("256").is_err());
        assert!(u32::from_env("-1").is_err());
        assert!(i64::from_env("12abc").is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(f64::from_env("3.5"), Ok(3.5));
        assert!(f32::from_env("pi").is_err());
        assert_eq!(2.25_f64.to_env(), "2.25");
    }

    #[test]
    fn bool_literals() {
        for raw in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(bool::from_env(raw), Ok(true), "{raw}");
        }
        for raw in ["false", "False", "0", "NO", "off"] {
            assert_eq!(bool::from_env(raw), Ok(false), "{raw}");
        }
        let err = bool::from_env("maybe").unwrap_err();
        assert_eq!(err.expected, "bool");
        assert_eq!(err.to_string(), "cannot parse \"maybe\" as bool");
    }

    #[test]
    fn string_list() {
        assert_eq!(
            Vec::<String>::from_env("a, b ,c"),
            Ok(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
        assert_eq!(vec!["x".to_owned(), "y".to_owned()].to_env(), "x,y");
    }

    #[test]
    fn duration_units() {
        assert_eq!(parse_duration("300ms"), Ok(Duration::from_millis(300)));
        assert_eq!(parse_duration("2us"), Ok(Duration::from_micros(2)));
        assert_eq!(parse_duration("2\u{b5}s"), Ok(Duration::from_micros(2)));
        assert_eq!(parse_duration("7ns"), Ok(Duration::from_nanos(7)));
        assert_eq!(parse_duration("45s"), Ok(Duration::from_secs(45)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("+5m"), Ok(Duration::from_secs(300)));
    }

    #[test]
    fn duration_fractions() {
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration(".5h"), Ok(Duration::from_secs(1800)));
        assert_eq!(parse_duration("1.h"), Ok(Duration::from_secs(3600)));
    }

    #[test]
    fn duration_rejects_malformed() {
        for raw in ["", "5", "-1s", "1x", "h", ".s", "1.5", "1h 30m"] {
            assert!(parse_duration(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn duration_rendering() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_millis(300)), "300ms");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.5us");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");
        assert_eq!(format_duration(Duration::from_secs(61)), "1m1s");
    }

    #[test]
    fn duration_render_reparses() {
        for d in [
            Duration::from_nanos(1),
            Duration::from_micros(1234),
            Duration::from_millis(98_765),
            Duration::from_secs(90_061),
        ] {
            assert_eq!(parse_duration(&format_duration(d)), Ok(d));
        }
    }
}
