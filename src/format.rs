//! Rendering of numbers for display.
//!
//! Two renderings live here: the canonical form returned by the evaluator
//! (14 significant digits, no trailing zeros) and the display form produced
//! by [`format_number`] (thousand separators, optional fixed precision,
//! scientific notation for very large magnitudes).

use crate::error::CalcError;
use crate::ERROR;

/// Significant digits kept by the evaluator's output. Enough to hide the
/// last-bit noise of trigonometric results (`tan(45°) = 0.9999999999999999`).
const SIGNIFICANT_DIGITS: usize = 14;

/// Magnitudes from here on are displayed in scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e16;

/// Decimal exponents outside `[MIN_POSITIONAL, MAX_POSITIONAL)` are written
/// in exponential form by [`canonical`]: `0.000001` stays positional, `1e-7`
/// and `1e+21` do not.
const MIN_POSITIONAL: i32 = -6;
const MAX_POSITIONAL: i32 = 21;

/// Every finite `f64` has at most this many digits after the decimal point,
/// so formatting with this precision is exact.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Render a finite value with 14 significant digits and no insignificant
/// trailing zeros, e.g. `3.1415926535898`, `-1`, `1.5e+25`.
pub fn canonical(value: f64) -> String {
    if !value.is_finite() {
        return ERROR.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return value.to_string(),
        },
        None => return value.to_string(),
    };

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');

    if exponent < MIN_POSITIONAL || exponent >= MAX_POSITIONAL {
        let mantissa = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits.to_owned()
        };
        return format!("{}{}", sign, with_exponent(&mantissa, exponent));
    }

    let positional = if exponent >= 0 {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    } else {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    };
    format!("{}{}", sign, positional)
}

fn with_exponent(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{}", mantissa, sign, exponent.abs())
}

/// Format a numeric string for display.
///
/// Unparsable or non-finite input yields `"Error"`. Magnitudes of at least
/// `1e16` use the shortest scientific notation (`1.23e+16`). Otherwise the
/// value is rounded to `precision` decimal places when given, trailing zeros
/// are dropped and the integer part is grouped with commas.
///
/// ```
/// use keypad::format_number;
///
/// assert_eq!(format_number("1234.56", None), "1,234.56");
/// assert_eq!(format_number("1.12345678901", Some(6)), "1.123457");
/// assert_eq!(format_number("Infinity", None), "Error");
/// ```
pub fn format_number(value: &str, precision: Option<usize>) -> String {
    match parse_number(value) {
        Ok(number) => display(number, precision),
        Err(err) => {
            log::debug!("cannot format {:?}: {}", value, err);
            ERROR.to_owned()
        }
    }
}

/// Commas in the input are group separators and are ignored, so formatted
/// output can be formatted again.
fn parse_number(value: &str) -> Result<f64, CalcError> {
    let cleaned: String = value.trim().chars().filter(|&c| c != ',').collect();
    let number: f64 = cleaned.parse()?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(CalcError::InvalidNumber(value.to_owned()))
    }
}

fn display(number: f64, precision: Option<usize>) -> String {
    if number.abs() >= SCIENTIFIC_THRESHOLD {
        return scientific(number);
    }

    let mut fixed = match precision {
        Some(places) => to_fixed(number, places),
        None => number.to_string(),
    };
    if fixed.contains('.') {
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.').len();
        fixed.truncate(trimmed);
    }
    if fixed == "-0" {
        fixed = "0".to_owned();
    }
    group_thousands(&fixed)
}

/// Round to `places` decimals from the exact binary value, with halves going
/// away from zero (`2.5` → `3`, `0.125` → `0.13`, but `1.005` → `1.00`).
fn to_fixed(number: f64, places: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, number.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<char> = int_part.chars().collect();
    digits.extend(frac_part.chars().chain(std::iter::repeat('0')).take(places));
    let mut int_len = int_part.len();

    if frac_part.chars().nth(places).map_or(false, |d| d >= '5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == '9' {
                *d = '0';
            } else {
                *d = (*d as u8 + 1) as char;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, '1');
            int_len += 1;
        }
    }

    let mut fixed = String::with_capacity(digits.len() + 2);
    if number < 0.0 {
        fixed.push('-');
    }
    fixed.extend(&digits[..int_len]);
    if places > 0 {
        fixed.push('.');
        fixed.extend(&digits[int_len..]);
    }
    fixed
}

fn scientific(number: f64) -> String {
    let shortest = format!("{:e}", number);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(magnitude) => format!("{}e-{}", mantissa, magnitude),
            None => format!("{}e+{}", mantissa, exponent),
        },
        None => shortest,
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}{}", sign, grouped, frac_part)
}
