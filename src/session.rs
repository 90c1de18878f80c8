//! Calculator state as an immutable snapshot plus a pure transition
//! function. A front end owns one `State`, feeds every user action through
//! [`State::reduce`] and keeps the returned value.

use crate::angle::AngleMode;
use crate::format::format_number;
use crate::validate::is_valid_append;
use crate::{evaluate, ERROR};

/// Function keys that open an argument list when pressed.
const FUNCTIONS: [&str; 4] = ["sin", "cos", "tan", "sqrt"];

/// Something the user did.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A digit or a decimal point.
    InputNumber(String),
    /// One of `+ - * /` or `^`.
    InputOperator(String),
    /// A function key (`sin`, `cos`, `tan`, `sqrt`), a constant (`pi`, `e`)
    /// or a parenthesis.
    InputFunction(String),
    Calculate,
    Clear,
    Backspace,
    ToggleMode,
    SetError(Option<String>),
    /// Replace the expression, e.g. when recalling an earlier entry.
    LoadExpression(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub expression: String,
    pub result: String,
    pub angle_mode: AngleMode,
    pub error: Option<String>,
    /// Set after a calculation; the next number or function key starts a new
    /// expression while an operator continues from the result.
    pub is_new_calculation: bool,
}

impl State {
    pub fn new(angle_mode: AngleMode) -> Self {
        State { angle_mode, ..State::default() }
    }

    /// Text for the main display.
    pub fn display(&self) -> &str {
        if self.expression.is_empty() {
            "0"
        } else {
            &self.expression
        }
    }

    /// The last result run through the display formatter, if there is one.
    pub fn formatted_result(&self, precision: Option<usize>) -> Option<String> {
        if self.result.is_empty() || self.result == ERROR {
            None
        } else {
            Some(format_number(&self.result, precision))
        }
    }

    pub fn reduce(self, action: Action) -> State {
        match action {
            Action::InputNumber(digits) => {
                let state = self.fresh_if_new();
                state.append(&digits)
            }
            Action::InputOperator(op) => {
                let mut state = self;
                if state.is_new_calculation && state.error.is_some() {
                    state = State::new(state.angle_mode);
                }
                state.is_new_calculation = false;
                state.append(&op)
            }
            Action::InputFunction(name) => {
                let state = self.fresh_if_new();
                if FUNCTIONS.contains(&name.as_str()) {
                    let token = format!("{}(", name);
                    state.append(&token)
                } else {
                    state.append(&name)
                }
            }
            Action::Calculate => {
                if self.expression.is_empty() {
                    return self;
                }
                let result = evaluate(&self.expression, self.angle_mode);
                let error = if result == ERROR { Some(ERROR.to_owned()) } else { None };
                State {
                    expression: result.clone(),
                    result,
                    error,
                    is_new_calculation: true,
                    ..self
                }
            }
            Action::Clear => State::new(self.angle_mode),
            Action::Backspace => {
                let mut state = self;
                let cut = FUNCTIONS
                    .iter()
                    .map(|f| format!("{}(", f))
                    .find(|token| state.expression.ends_with(token.as_str()))
                    .map(|token| token.len())
                    .unwrap_or_else(|| {
                        state.expression.chars().last().map(char::len_utf8).unwrap_or(0)
                    });
                let keep = state.expression.len() - cut;
                state.expression.truncate(keep);
                state.is_new_calculation = false;
                state
            }
            Action::ToggleMode => State { angle_mode: self.angle_mode.toggle(), ..self },
            Action::SetError(error) => State { error, ..self },
            Action::LoadExpression(expression) => State {
                expression,
                result: String::new(),
                error: None,
                is_new_calculation: false,
                ..self
            },
        }
    }

    fn fresh_if_new(self) -> State {
        if self.is_new_calculation {
            State::new(self.angle_mode)
        } else {
            self
        }
    }

    fn append(mut self, input: &str) -> State {
        if is_valid_append(&self.expression, input) {
            self.expression.push_str(input);
        } else {
            log::debug!("rejected {:?} after {:?}", input, self.expression);
        }
        self
    }
}
