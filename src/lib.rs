//! The computational core of a pocket calculator.
//!
//! - [`is_valid_append`] gates every keystroke so the expression being typed
//!   stays well formed;
//! - [`evaluate`] parses and computes a finished expression;
//! - [`format_number`] renders a result for display.
//!
//! All three are pure functions. [`session`] ties them together as an
//! immutable calculator state with a transition function.

mod angle;
mod error;
mod format;
mod parse;
pub mod session;
mod token;
mod validate;

#[cfg(test)]
mod tests;

pub use crate::angle::AngleMode;
pub use crate::error::{CalcError, PartialComp};
pub use crate::format::{canonical, format_number};
pub use crate::parse::{DefaultEnvironment, Environment, IntermediateResult};
pub use crate::validate::is_valid_append;

/// The string returned in place of a result whenever anything goes wrong.
pub const ERROR: &str = "Error";

/// Evaluate `input`, applying `angle_mode` to trigonometric functions.
pub fn eval(input: &str, angle_mode: AngleMode) -> Result<f64, CalcError> {
    let mut env = DefaultEnvironment::new(angle_mode);
    eval_with_env(input, &mut env)
}

pub fn eval_with_env<E>(input: &str, env: &mut E) -> Result<f64, CalcError>
where
    E: Environment,
{
    token::tokenize(input).and_then(|x| parse::parse(&x, env))
}

/// Evaluate `input` and render the result canonically (14 significant
/// digits), or return `"Error"` for any parse or arithmetic failure.
///
/// ```
/// use keypad::{evaluate, AngleMode};
///
/// assert_eq!(evaluate("(2 + 3) * 4", AngleMode::Degrees), "20");
/// assert_eq!(evaluate("sin(pi/2)", AngleMode::Radians), "1");
/// assert_eq!(evaluate("1 / 0", AngleMode::Degrees), "Error");
/// ```
pub fn evaluate(input: &str, angle_mode: AngleMode) -> String {
    match eval(input, angle_mode) {
        Ok(value) if value.is_finite() => canonical(value),
        Ok(value) => {
            log::debug!("{:?} evaluated to non-finite {}", input, value);
            ERROR.to_owned()
        }
        Err(err) => {
            log::debug!("{:?} failed to evaluate: {}", input, err);
            ERROR.to_owned()
        }
    }
}
