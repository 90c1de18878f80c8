use std::error::Error;
use std::fmt;

use std::num::ParseFloatError;

/// Represents a partial computation that can be captured as part of an
/// error message.
#[derive(Debug, PartialEq)]
pub enum PartialComp {
    Unary { op: String, arg: String },
    Binary { op: String, lhs: String, rhs: String },
}

impl PartialComp {
    pub fn unary<T, U>(op: T, arg: U) -> Self
    where
        T: ToString,
        U: ToString,
    {
        PartialComp::Unary { op: op.to_string(), arg: arg.to_string() }
    }

    pub fn binary<T, U, V>(op: T, lhs: U, rhs: V) -> Self
    where
        T: ToString,
        U: ToString,
        V: ToString,
    {
        PartialComp::Binary {
            op: op.to_string(),
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }
}

impl fmt::Display for PartialComp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PartialComp::Unary { ref op, ref arg } => write!(f, "{}({})", op, arg),
            PartialComp::Binary { ref op, ref lhs, ref rhs } => {
                write!(f, "{} {} {}", lhs, op, rhs)
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CalcError {
    DivideByZero,
    InvalidNumber(String),
    InvalidOperator(char),
    NestingTooDeep,
    NoFunctionArgument(String),
    Undefined(PartialComp),
    UnexpectedEndOfInput,
    UnexpectedToken(String, &'static str),
    UnknownAtom(String),
    UnmatchedParenthesis,
    UnrecognizedToken(String),
    WouldOverflow(PartialComp),
}

use self::CalcError::*;

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DivideByZero => write!(f, "attempted to divide by zero"),
            InvalidNumber(ref number) => write!(f, "invalid number: {}", number),
            InvalidOperator(ref c) => write!(f, "invalid operator: {}", c),
            NestingTooDeep => write!(f, "expression is nested too deeply"),
            NoFunctionArgument(ref func) => {
                write!(f, "no bracketed argument for function '{}'", func)
            }
            Undefined(ref comp) => write!(f, "expression '{}' is undefined", comp),
            UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            UnexpectedToken(ref token, ref kind) => {
                write!(f, "expected {} token, got {} instead", kind, token)
            }
            UnknownAtom(ref atom) => {
                write!(f, "unknown constant or function '{}'", atom)
            }
            UnmatchedParenthesis => write!(f, "unmatched parenthesis"),
            UnrecognizedToken(ref token) => {
                write!(f, "unrecognized token: {}", token)
            }
            WouldOverflow(ref comp) => {
                write!(f, "expression '{}' would overflow", comp)
            }
        }
    }
}

impl Error for CalcError {}

impl From<ParseFloatError> for CalcError {
    fn from(data: ParseFloatError) -> CalcError {
        CalcError::InvalidNumber(data.to_string())
    }
}
