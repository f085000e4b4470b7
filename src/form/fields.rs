use std::sync::LazyLock;

use regex::Regex;

pub const NAME: &str = "name";
pub const PREPARATION_TIME: &str = "preparation_time";
pub const TYPE: &str = "type";
pub const NO_OF_SLICES: &str = "no_of_slices";
pub const DIAMETER: &str = "diameter";
pub const SPICINESS_SCALE: &str = "spiciness_scale";
pub const SLICES_OF_BREAD: &str = "slices_of_bread";

/// Every field the form registers.
pub const ALL: [&str; 7] = [
    NAME,
    PREPARATION_TIME,
    TYPE,
    NO_OF_SLICES,
    DIAMETER,
    SPICINESS_SCALE,
    SLICES_OF_BREAD,
];

pub const PREPARATION_TIME_PATTERN: &str = r"^([0-9][0-9]):([0-5][0-9]):([0-5][0-9])$";

pub const MIN_SLICES: i64 = 1;
pub const MIN_DIAMETER: f64 = 20.0;
pub const DIAMETER_STEP: f64 = 0.1;
pub const MIN_SPICINESS: i64 = 1;
pub const MAX_SPICINESS: i64 = 10;
pub const MIN_BREAD_SLICES: i64 = 2;

static PREPARATION_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PREPARATION_TIME_PATTERN).unwrap());

pub fn is_preparation_time(value: &str) -> bool {
    PREPARATION_TIME_RE.is_match(value)
}

/// Parse an optional whole-number input.
///
/// Empty input and `0` both mean "not given". Any other value must fall
/// within `min..=max` and fit in `T`.
pub fn optional_integer<T: TryFrom<i64>>(
    raw: &str,
    min: i64,
    max: Option<i64>,
) -> Result<Option<T>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: i64 = raw
        .parse()
        .map_err(|_| "Must be a whole number".to_string())?;
    if value == 0 {
        return Ok(None);
    }

    match max {
        Some(max) if value < min || value > max => {
            return Err(format!("Must be between {min} and {max}"));
        }
        None if value < min => return Err(format!("Must be at least {min}")),
        _ => {}
    }

    T::try_from(value)
        .map(Some)
        .map_err(|_| "Value is too large".to_string())
}

/// Parse an optional decimal input counted in `step` increments from `min`,
/// the way a number input with `min` and `step` attributes accepts it.
pub fn optional_decimal(raw: &str, min: f64, step: f64) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| "Must be a number".to_string())?;
    if value == 0.0 {
        return Ok(None);
    }

    if value < min {
        return Err(format!("Must be at least {min}"));
    }

    let steps = (value - min) / step;
    if (steps - steps.round()).abs() > 1e-6 {
        return Err(format!("Must be in steps of {step}"));
    }

    Ok(Some(value))
}
