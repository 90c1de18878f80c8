use crate::angle::AngleMode;
use crate::error::{CalcError, PartialComp};
use crate::token::*;

/// Parentheses, signs and exponents each add a level of recursion; inputs
/// nested deeper than this are rejected.
const MAX_NESTING: usize = 64;

#[derive(Clone, Debug)]
pub struct IntermediateResult {
    pub value: f64,
    pub tokens_read: usize,
}

impl IntermediateResult {
    pub fn new(value: f64, tokens_read: usize) -> Self {
        IntermediateResult { value, tokens_read }
    }
}

/// Represents an environment for evaluating a mathematical expression
pub trait Environment {
    /// Look up the arity of an atom:
    /// - Constants have an arity of zero
    /// - Every argument of a function is a bracketed expression, so
    ///   `f(1)(2)` supplies two arguments to a function of arity two
    /// - If a symbol is not defined, return None
    fn arity(&self, atom: &str) -> Option<usize>;

    /// Resolve an atom given the name of the atom and some number of
    /// arguments
    /// Precondition: `args.len() == self.arity(atom)`
    fn resolve(
        &mut self,
        atom: &str,
        args: &[IntermediateResult],
    ) -> Result<f64, CalcError>;
}

fn descend(depth: usize) -> Result<usize, CalcError> {
    if depth >= MAX_NESTING {
        Err(CalcError::NestingTooDeep)
    } else {
        Ok(depth + 1)
    }
}

/// Reject results that left the finite range. Operands are always finite,
/// so an infinity means overflow and a NaN means the operation has no
/// real answer.
fn checked(op: &str, lhs: f64, rhs: f64, value: f64) -> Result<f64, CalcError> {
    if value.is_nan() {
        Err(CalcError::Undefined(PartialComp::binary(op, lhs, rhs)))
    } else if value.is_infinite() {
        Err(CalcError::WouldOverflow(PartialComp::binary(op, lhs, rhs)))
    } else {
        Ok(value)
    }
}

// Addition and subtraction
fn e_expr<E>(
    token_list: &[Token],
    env: &mut E,
    depth: usize,
) -> Result<IntermediateResult, CalcError>
where
    E: Environment,
{
    let mut t1 = t_expr(token_list, env, depth)?;
    let mut index = t1.tokens_read;

    while index < token_list.len() {
        match token_list[index] {
            Token::Plus => {
                let t2 = t_expr(&token_list[index + 1..], env, depth)?;
                t1.value = checked("+", t1.value, t2.value, t1.value + t2.value)?;
                t1.tokens_read += t2.tokens_read + 1;
            }
            Token::Minus => {
                let t2 = t_expr(&token_list[index + 1..], env, depth)?;
                t1.value = checked("-", t1.value, t2.value, t1.value - t2.value)?;
                t1.tokens_read += t2.tokens_read + 1;
            }
            Token::Number(n) => {
                return Err(CalcError::UnexpectedToken(n.to_string(), "operator"))
            }
            _ => break,
        };
        index = t1.tokens_read;
    }
    Ok(t1)
}

// Multiplication and division, including the implicit product of a factor
// followed by an atom or a parenthesized group (`2pi`, `3(4)`)
fn t_expr<E>(
    token_list: &[Token],
    env: &mut E,
    depth: usize,
) -> Result<IntermediateResult, CalcError>
where
    E: Environment,
{
    let mut f1 = u_expr(token_list, env, depth)?;
    let mut index = f1.tokens_read;

    while index < token_list.len() {
        match token_list[index] {
            Token::Multiply => {
                let f2 = u_expr(&token_list[index + 1..], env, depth)?;
                f1.value = checked("*", f1.value, f2.value, f1.value * f2.value)?;
                f1.tokens_read += f2.tokens_read + 1;
            }
            Token::Divide => {
                let f2 = u_expr(&token_list[index + 1..], env, depth)?;
                if f2.value == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                f1.value = checked("/", f1.value, f2.value, f1.value / f2.value)?;
                f1.tokens_read += f2.tokens_read + 1;
            }
            Token::Atom(_) | Token::OpenParen => {
                let f2 = f_expr(&token_list[index..], env, depth)?;
                f1.value = checked("*", f1.value, f2.value, f1.value * f2.value)?;
                f1.tokens_read += f2.tokens_read;
            }
            Token::Number(n) => {
                return Err(CalcError::UnexpectedToken(n.to_string(), "operator"));
            }
            _ => break,
        }
        index = f1.tokens_read;
    }
    Ok(f1)
}

// Sign prefixes: looser than exponentiation, tighter than multiplication
fn u_expr<E>(
    token_list: &[Token],
    env: &mut E,
    depth: usize,
) -> Result<IntermediateResult, CalcError>
where
    E: Environment,
{
    match token_list.first() {
        Some(Token::Minus) => {
            let mut ir = u_expr(&token_list[1..], env, descend(depth)?)?;
            ir.value = -ir.value;
            ir.tokens_read += 1;
            Ok(ir)
        }
        Some(Token::Plus) => {
            let mut ir = u_expr(&token_list[1..], env, descend(depth)?)?;
            ir.tokens_read += 1;
            Ok(ir)
        }
        _ => f_expr(token_list, env, depth),
    }
}

// Exponentiation, right associative; the exponent may carry a sign
fn f_expr<E>(
    token_list: &[Token],
    env: &mut E,
    depth: usize,
) -> Result<IntermediateResult, CalcError>
where
    E: Environment,
{
    let mut g1 = g_expr(token_list, env, depth)?;
    let index = g1.tokens_read;

    if let Some(Token::Exponent) = token_list.get(index) {
        let f = u_expr(&token_list[index + 1..], env, descend(depth)?)?;
        if g1.value == 0.0 && f.value < 0.0 {
            return Err(CalcError::DivideByZero);
        }
        g1.value = checked("^", g1.value, f.value, g1.value.powf(f.value))?;
        g1.tokens_read += f.tokens_read + 1;
    }
    Ok(g1)
}

// Numbers, parenthesized expressions, and atoms
fn g_expr<E>(
    token_list: &[Token],
    env: &mut E,
    depth: usize,
) -> Result<IntermediateResult, CalcError>
where
    E: Environment,
{
    if token_list.is_empty() {
        return Err(CalcError::UnexpectedEndOfInput);
    }
    match token_list[0] {
        Token::Number(n) => Ok(IntermediateResult::new(n, 1)),
        Token::Atom(ref s) => {
            let nargs = env.arity(s).ok_or_else(|| CalcError::UnknownAtom(s.clone()))?;
            let mut args = Vec::with_capacity(nargs);
            let mut start = 1;
            for _ in 0..nargs {
                match (token_list.get(start), token_list.get(start + 1)) {
                    (Some(Token::OpenParen), Some(Token::CloseParen))
                    | (Some(Token::OpenParen), None) => {
                        return Err(CalcError::NoFunctionArgument(s.clone()))
                    }
                    (Some(Token::OpenParen), _) => (),
                    _ => return Err(CalcError::NoFunctionArgument(s.clone())),
                }
                let ir = g_expr(&token_list[start..], env, descend(depth)?)?;
                start += ir.tokens_read;
                args.push(ir);
            }
            let res = env.resolve(s, &args)?;
            Ok(IntermediateResult::new(res, start))
        }
        Token::OpenParen => {
            let ir = e_expr(&token_list[1..], env, descend(depth)?)?;
            let close_paren = ir.tokens_read + 1;
            match token_list.get(close_paren) {
                Some(Token::CloseParen) => {
                    Ok(IntermediateResult::new(ir.value, close_paren + 1))
                }
                Some(other) => Err(CalcError::UnexpectedToken(other.to_string(), ")")),
                None => Err(CalcError::UnmatchedParenthesis),
            }
        }
        _ => Err(CalcError::UnexpectedToken(token_list[0].to_string(), "number")),
    }
}

/// The calculator's own identifiers: `pi` and `e`, and the one-argument
/// functions `sin`, `cos`, `tan` (honouring the angle mode) and `sqrt`.
pub struct DefaultEnvironment {
    pub angle_mode: AngleMode,
}

impl DefaultEnvironment {
    pub fn new(angle_mode: AngleMode) -> Self {
        DefaultEnvironment { angle_mode }
    }
}

impl Environment for DefaultEnvironment {
    fn arity(&self, atom: &str) -> Option<usize> {
        match atom {
            "pi" | "π" | "e" => Some(0),
            "sin" | "cos" | "tan" | "sqrt" => Some(1),
            _ => None,
        }
    }

    fn resolve(
        &mut self,
        atom: &str,
        args: &[IntermediateResult],
    ) -> Result<f64, CalcError> {
        let value = match atom {
            "pi" | "π" => ::std::f64::consts::PI,
            "e" => ::std::f64::consts::E,
            "sin" => self.angle_mode.to_radians(args[0].value).sin(),
            "cos" => self.angle_mode.to_radians(args[0].value).cos(),
            "tan" => self.angle_mode.to_radians(args[0].value).tan(),
            "sqrt" => args[0].value.sqrt(),
            _ => return Err(CalcError::UnknownAtom(atom.to_owned())),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            let arg = args.first().map(|a| a.value.to_string()).unwrap_or_default();
            Err(CalcError::Undefined(PartialComp::unary(atom, arg)))
        }
    }
}

pub fn parse<E>(tokens: &[Token], env: &mut E) -> Result<f64, CalcError>
where
    E: Environment,
{
    let answer = e_expr(tokens, env, 0)?;
    match tokens.get(answer.tokens_read) {
        None => Ok(answer.value),
        Some(Token::CloseParen) => Err(CalcError::UnmatchedParenthesis),
        Some(other) => Err(CalcError::UnexpectedToken(other.to_string(), "operator")),
    }
}
