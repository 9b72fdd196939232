//! Number formatting utilities for benchmark results.
//!
//! All functions are pure. They return `FormatError` for inputs that have no
//! sensible rendering (NaN, negative durations, sizes past GB) so that callers
//! can decide on a placeholder instead of printing garbage.

use crate::error::FormatError;

/// Byte units in ascending powers of 1024. Nothing past GB is rendered.
const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

fn ensure_finite(value: f64) -> Result<f64, FormatError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::NonFinite(value))
    }
}

fn ensure_non_negative(value: f64) -> Result<f64, FormatError> {
    let value = ensure_finite(value)?;
    if value < 0.0 {
        Err(FormatError::Negative(value))
    } else {
        Ok(value)
    }
}

/// Round to two decimals, ties away from zero.
///
/// `{:.2}` alone rounds exact ties to even, so 1125 ns would render as
/// "1.12 μs" instead of "1.13 μs".
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Insert `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a count with en-US thousands grouping and no fractional digits.
/// - 500000 -> "500,000"
/// - 1234.5 -> "1,235" (half away from zero)
///
/// The integer digits are printed exactly, so large counts keep their magnitude.
pub fn format_count(value: f64) -> Result<String, FormatError> {
    let rounded = ensure_finite(value)?.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        Ok(format!("-{}", grouped))
    } else {
        Ok(grouped)
    }
}

/// Format a duration given in nanoseconds with tiered scaling.
/// - < 1000ns: "XXX ns"
/// - < 1ms: "X.XX μs"
/// - < 1s: "X.XX ms"
/// - otherwise: "X.XX s"
pub fn format_duration(ns: f64) -> Result<String, FormatError> {
    let ns = ensure_non_negative(ns)?;

    let formatted = if ns < 1_000.0 {
        format!("{:.0} ns", ns.round())
    } else if ns < 1_000_000.0 {
        format!("{:.2} μs", round_hundredths(ns / 1_000.0))
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", round_hundredths(ns / 1_000_000.0))
    } else {
        format!("{:.2} s", round_hundredths(ns / 1_000_000_000.0))
    };
    Ok(formatted)
}

/// Format a byte count with binary units (B, KB, MB, GB) and two decimals.
///
/// `0` renders as `"0 B"`. Sizes of 1024 GB or more return
/// `FormatError::OutOfRange`.
pub fn format_bytes(bytes: f64) -> Result<String, FormatError> {
    let bytes = ensure_non_negative(bytes)?;
    if bytes == 0.0 {
        return Ok("0 B".to_string());
    }

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1_024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1_024.0;
        unit += 1;
    }

    if value >= 1_024.0 {
        return Err(FormatError::OutOfRange(bytes));
    }

    Ok(format!("{:.2} {}", round_hundredths(value), BYTE_UNITS[unit]))
}

/// Axis label for the latency chart, which is always in microseconds.
pub fn format_micros(us: f64) -> String {
    format!("{:.2} μs", round_hundredths(us))
}
