use std::fmt;
use std::iter::Peekable;

use crate::error::CalcError;
use crate::error::CalcError::*;

/// Tokens used for parsing an arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Plus,
    Minus,
    Divide,
    Multiply,
    Exponent,
    OpenParen,
    CloseParen,
    Number(f64),
    Atom(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Plus => write!(f, "Plus"),
            Token::Minus => write!(f, "Minus"),
            Token::Divide => write!(f, "Divide"),
            Token::Multiply => write!(f, "Multiply"),
            Token::Exponent => write!(f, "Exponent"),
            Token::OpenParen => write!(f, "OpenParen"),
            Token::CloseParen => write!(f, "CloseParen"),
            Token::Number(ref n) => write!(f, "'{}'", n),
            Token::Atom(ref s) => write!(f, "'{}'", s),
        }
    }
}

enum OperatorState {
    PotentiallyIncomplete,
    Complete,
    NotAnOperator,
}

trait IsOperator {
    fn is_operator(self) -> bool;
}

impl IsOperator for char {
    fn is_operator(self) -> bool {
        match self {
            '+' | '-' | '/' | '^' | '(' | ')' | '*' => true,
            _ => false,
        }
    }
}

trait CheckOperator {
    fn check_operator(self) -> OperatorState;
}

impl CheckOperator for char {
    fn check_operator(self) -> OperatorState {
        match self {
            '+' | '-' | '/' | '^' | '(' | ')' => OperatorState::Complete,
            '*' => OperatorState::PotentiallyIncomplete,
            _ => OperatorState::NotAnOperator,
        }
    }
}

trait OperatorMatch {
    fn operator_type(self) -> Option<Token>;
}

impl OperatorMatch for [char; 2] {
    fn operator_type(self) -> Option<Token> {
        if self == ['*', '*'] {
            Some(Token::Exponent)
        } else {
            None
        }
    }
}

impl OperatorMatch for char {
    fn operator_type(self) -> Option<Token> {
        match self {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '/' => Some(Token::Divide),
            '*' => Some(Token::Multiply),
            '^' => Some(Token::Exponent),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            _ => None,
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_alphabetic() {
            tokens.push(Token::Atom(consume_atom(&mut chars)));
        } else if c.is_ascii_digit() || c == '.' {
            tokens.push(consume_number(&mut chars)?);
        } else {
            match c.check_operator() {
                OperatorState::Complete => {
                    tokens.push(c.operator_type().ok_or(InvalidOperator(c))?);
                    chars.next();
                }
                OperatorState::PotentiallyIncomplete => {
                    chars.next();
                    match chars.peek() {
                        Some(&next_char) if next_char == c => {
                            tokens.push(
                                [c, next_char]
                                    .operator_type()
                                    .ok_or(InvalidOperator(c))?,
                            );
                            chars.next();
                        }
                        _ => {
                            tokens.push(c.operator_type().ok_or(InvalidOperator(c))?);
                        }
                    }
                }
                OperatorState::NotAnOperator => {
                    if c.is_whitespace() {
                        chars.next();
                    } else {
                        let token_string = consume_until_new_token(&mut chars);
                        return Err(UnrecognizedToken(token_string));
                    }
                }
            }
        }
    }
    log::trace!("tokenized {:?} into {:?}", input, tokens);
    Ok(tokens)
}

fn digits<I>(input: &mut Peekable<I>) -> String
where
    I: Iterator<Item = char>,
{
    let mut number = String::new();
    while let Some(&c) = input.peek() {
        if c.is_ascii_digit() {
            number.push(c);
        } else {
            break;
        }
        input.next();
    }
    number
}

/// Consume a decimal literal: `12`, `1.5`, `.5`, `5.` with an optional
/// exponent such as `e+16`. An `e` that does not start a well formed
/// exponent is left in place to be read as an atom.
fn consume_number<I>(input: &mut Peekable<I>) -> Result<Token, CalcError>
where
    I: Iterator<Item = char> + Clone,
{
    let mut number = digits(input);
    if let Some(&'.') = input.peek() {
        input.next();
        number.push('.');
        number.push_str(&digits(input));
    }
    if number == "." {
        return Err(InvalidNumber(number));
    }

    if let Some(&e) = input.peek() {
        if e == 'e' || e == 'E' {
            let mut ahead = input.clone();
            ahead.next();
            let mut exponent = String::from("e");
            if let Some(&sign) = ahead.peek() {
                if sign == '+' || sign == '-' {
                    exponent.push(sign);
                    ahead.next();
                }
            }
            let exp_digits = digits(&mut ahead);
            if !exp_digits.is_empty() {
                exponent.push_str(&exp_digits);
                number.push_str(&exponent);
                *input = ahead;
            }
        }
    }

    let value: f64 = number.parse()?;
    if value.is_finite() {
        Ok(Token::Number(value))
    } else {
        Err(InvalidNumber(number))
    }
}

/// Consume a valid atom. An atom is defined by:
/// - Starting with an alphabetic character
/// - Consisting of alphanumeric characters or underscores
fn consume_atom<I: Iterator<Item = char>>(input: &mut Peekable<I>) -> String {
    let mut atom = String::new();
    while let Some(&c) = input.peek() {
        if c.is_alphanumeric() || c == '_' {
            atom.push(c);
            input.next();
        } else {
            break;
        }
    }
    atom
}

fn consume_until_new_token<I: Iterator<Item = char>>(input: &mut I) -> String {
    input
        .take_while(|c| !(c.is_whitespace() || c.is_operator() || c.is_ascii_digit()))
        .collect()
}
