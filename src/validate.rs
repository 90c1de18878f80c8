//! Keystroke validation for an expression that is still being typed.

const BINARY_OPERATORS: [char; 4] = ['+', '-', '*', '/'];

fn is_binary_operator(c: char) -> bool {
    BINARY_OPERATORS.contains(&c)
}

/// Decide whether `candidate` may be appended to `current`.
///
/// Only decimal points and the four binary operators are policed:
/// - a `.` is rejected when the number being typed (the text after the last
///   operator) already has one;
/// - an expression may only start with `-`;
/// - after `+`, `*` or `/` only a `-` (negative operand) may follow;
/// - nothing may follow a `-`.
///
/// Everything else is accepted.
pub fn is_valid_append(current: &str, candidate: &str) -> bool {
    if candidate == "." {
        let segment = current.rsplit(is_binary_operator).next().unwrap_or("");
        return !segment.contains('.');
    }

    let mut candidate_chars = candidate.chars();
    let operator = match (candidate_chars.next(), candidate_chars.next()) {
        (Some(c), None) if is_binary_operator(c) => c,
        _ => return true,
    };

    match current.chars().last() {
        None => operator == '-',
        Some('+') | Some('*') | Some('/') => operator == '-',
        Some('-') => false,
        Some(_) => true,
    }
}
