//! # Result Formatting
//!
//! Every computed value that goes back into the entry buffer passes through
//! [`format_result`] (or [`format_rounded`] for helpers that work in cents or
//! recipe units), so results always look the same no matter which button
//! produced them.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::format::{format_result, format_rounded};
//!
//! assert_eq!(format_result(5.0), "5");
//! assert_eq!(format_result(2.5), "2.5");
//! assert_eq!(format_result(1.0 / 3.0), "0.3333333333");
//! assert_eq!(format_rounded(10.804, 2), "10.8");
//! ```

/// Decimal places kept for arithmetic results.
pub const RESULT_PRECISION: usize = 10;

/// Format a result for the entry buffer.
///
/// Integral values render as plain integers (`8`, `-2`). Anything else is
/// rounded to ten decimal places with trailing zeros and a bare trailing
/// point removed.
pub fn format_result(value: f64) -> String {
    format_rounded(value, RESULT_PRECISION)
}

/// Same rule as [`format_result`], rounding to `places` decimals instead.
///
/// The rounded text is read back into the nearest double and printed in its
/// shortest form, so digits past the precision of an `f64` never show up.
pub fn format_rounded(value: f64, places: usize) -> String {
    if value.fract() == 0.0 {
        return integer_text(value);
    }

    let rounded = format!("{:.*}", places, value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded.fract() == 0.0 {
        // also turns a rounded "-0" into "0"
        return integer_text(rounded);
    }
    format!("{}", rounded)
}

/// Fixed-point text with exactly `places` decimals, as used in hint strings.
pub fn format_fixed(value: f64, places: usize) -> String {
    let text = format!("{:.*}", places, value);
    // "-0.00" reads badly on a receipt
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

fn integer_text(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    // f64 Display never switches to exponent notation, so integral values
    // print as their full digit string.
    format!("{}", value)
}
