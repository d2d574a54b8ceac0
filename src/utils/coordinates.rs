use crate::error::{Result, TrackerError};

/// Convert a DMS (Degrees-Minutes-Seconds) angle string to signed decimal degrees.
///
/// The upstream listing formats coordinates loosely, so the grammar is
/// deliberately permissive: `D[°[M['[S["]]]][H]` where the degree value is the
/// only mandatory component and `H` is an optional trailing hemisphere letter.
/// Any run of non-digit characters (straight or curly quotes, degree signs,
/// whatever the page emits this week) separates the numeric components;
/// whitespace is stripped before tokenizing.
///
/// A `S` or `W` anywhere in the string makes the result negative. Any other
/// hemisphere letter, or none at all, leaves it positive.
///
/// # Examples
/// ```
/// use iceberg_tracker::utils::parse_dms;
///
/// let decimal = parse_dms("48°53'10.18\"N").unwrap();
/// assert!((decimal - (48.0 + 53.0 / 60.0 + 10.18 / 3600.0)).abs() < 1e-9);
/// ```
pub fn parse_dms(dms: &str) -> Result<f64> {
    let stripped: String = dms.chars().filter(|c| !c.is_whitespace()).collect();

    let sign = if stripped.chars().any(|c| matches!(c, 's' | 'S' | 'w' | 'W')) {
        -1.0
    } else {
        1.0
    };

    // Degree, minute, second, fractional-second. Anything past the fourth
    // numeric run is ignored.
    let tokens: Vec<&str> = stripped
        .split(|c: char| !c.is_ascii_digit())
        .filter(|t| !t.is_empty())
        .take(4)
        .collect();

    let degree_token = tokens.first().ok_or_else(|| {
        TrackerError::InvalidCoordinateFormat(format!("no numeric components in '{}'", dms))
    })?;
    let minute_token = tokens.get(1).copied().unwrap_or("0");
    let second_token = tokens.get(2).copied().unwrap_or("0");
    let fraction_token = tokens.get(3).copied().unwrap_or("0");

    let degrees = degree_token.parse::<i64>().map_err(|_| {
        TrackerError::NumericConversion(format!("invalid degrees value: '{}'", degree_token))
    })?;

    let minutes = minute_token.parse::<f64>().map_err(|_| {
        TrackerError::NumericConversion(format!("invalid minutes value: '{}'", minute_token))
    })?;

    // Seconds and their fraction arrive as separate digit runs; rejoin them
    // textually so "10" + "18" parses as 10.18 rather than two values.
    let composed_seconds = format!("{}.{}", second_token, fraction_token);
    let seconds = composed_seconds.parse::<f64>().map_err(|_| {
        TrackerError::NumericConversion(format!("invalid seconds value: '{}'", composed_seconds))
    })?;

    Ok(sign * (degrees as f64 + minutes / 60.0 + seconds / 3600.0))
}
