use super::*;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const ALPHABET: [&str; 16] = [
    "0", "1", "5", "9", ".", "+", "-", "*", "/", "(", ")", "sin(", "pi", "^", "e", " ",
];

fn random_expression(rng: &mut StdRng) -> String {
    let len: usize = rng.gen_range(0, 12);
    (0..len)
        .map(|_| *ALPHABET.choose(rng).unwrap_or(&"1"))
        .collect()
}

/// Builds only through the validator, the way a keypad would.
fn typed_expression(rng: &mut StdRng) -> String {
    let keys = ["1", "2", "7", "0", ".", "+", "-", "*", "/"];
    let mut expression = String::new();
    for _ in 0..rng.gen_range(1usize, 16) {
        let key = keys.choose(rng).unwrap_or(&"1");
        if is_valid_append(&expression, key) {
            expression.push_str(key);
        }
    }
    expression
}

/// For some string input, compare `evaluate(_)` against the expected output
fn compare(input: &str, mode: AngleMode, expected: &str) {
    assert_eq!(evaluate(input, mode), expected, "{}", input);
}

#[test]
fn basics() {
    let cases = vec![
        ("2 + 3", "5"),
        ("10 - 5", "5"),
        ("3 * 4", "12"),
        ("8 / 2", "4"),
        ("1.5 + 2.5", "4"),
        ("(2 + 3) * 4", "20"),
        ("sqrt(9)", "3"),
        ("1 / 3", "0.33333333333333"),
        ("2 ^ 0.5", "1.4142135623731"),
        ("1e300 * 10", "1e+301"),
        ("5+-3", "2"),
    ];
    for (input, expected) in cases {
        compare(input, AngleMode::Degrees, expected);
    }
}

#[test]
fn trigonometry() {
    compare("sin(90)", AngleMode::Degrees, "1");
    compare("cos(0)", AngleMode::Degrees, "1");
    compare("tan(45)", AngleMode::Degrees, "1");
    compare("sin(pi/2)", AngleMode::Radians, "1");
    compare("cos(pi)", AngleMode::Radians, "-1");
    assert!(evaluate("pi", AngleMode::Degrees).starts_with("3.14159"));
    assert!(evaluate("e", AngleMode::Degrees).starts_with("2.71828"));
}

#[test]
fn errors() {
    let cases = vec![
        "1 / 0",
        "10 ^ 1000",
        "sin(abc)",
        "sin()",
        "(1 + 2",
        "1 + 2)",
        "2 +* 2",
        "sqrt(-1)",
        "",
        "foo",
    ];
    for input in cases {
        compare(input, AngleMode::Degrees, ERROR);
    }
}

#[test]
fn typed_errors() {
    assert_eq!(eval("1 / 0", AngleMode::Degrees), Err(CalcError::DivideByZero));
    assert_eq!(
        eval("sin(abc)", AngleMode::Degrees),
        Err(CalcError::UnknownAtom("abc".into()))
    );
}

#[test]
fn custom_environment() {
    struct Doubler;

    impl Environment for Doubler {
        fn arity(&self, atom: &str) -> Option<usize> {
            match atom {
                "double" => Some(1),
                "answer" => Some(0),
                _ => None,
            }
        }

        fn resolve(
            &mut self,
            atom: &str,
            args: &[IntermediateResult],
        ) -> Result<f64, CalcError> {
            match atom {
                "double" => Ok(args[0].value * 2.0),
                "answer" => Ok(42.0),
                _ => Err(CalcError::UnknownAtom(atom.into())),
            }
        }
    }

    assert_eq!(eval_with_env("double(answer) + 1", &mut Doubler), Ok(85.0));
    assert_eq!(
        eval_with_env("sin(1)", &mut Doubler),
        Err(CalcError::UnknownAtom("sin".into()))
    );
}

#[test]
fn formatting_examples() {
    assert_eq!(format_number("1234.56", None), "1,234.56");
    assert_eq!(format_number("1000000", None), "1,000,000");
    assert_eq!(format_number("1.12345678901", Some(6)), "1.123457");
    assert_eq!(format_number("1.500000", None), "1.5");
    assert_eq!(format_number("Infinity", None), ERROR);
    assert_eq!(format_number("1.23e+16", None), "1.23e+16");
    assert!(format_number("10000000000000000", None).contains('e'));
}

#[test]
fn validator_examples() {
    assert!(!is_valid_append("", "+"));
    assert!(!is_valid_append("", "*"));
    assert!(!is_valid_append("", "/"));
    assert!(is_valid_append("", "-"));
    assert!(is_valid_append("1+", "-"));
    assert!(!is_valid_append("1--", "-"));
    assert!(!is_valid_append("12+", "+"));
}

#[test]
fn digits_are_always_appendable() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let expression = random_expression(&mut rng);
        let digit = rng.gen_range(0u8, 10).to_string();
        assert!(is_valid_append(&expression, &digit), "{:?}", expression);
    }
}

#[test]
fn decimal_point_follows_last_segment() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let expression = random_expression(&mut rng);
        let segment = match expression.rfind(|c: char| "+-*/".contains(c)) {
            Some(i) => &expression[i + 1..],
            None => &expression[..],
        };
        assert_eq!(
            is_valid_append(&expression, "."),
            !segment.contains('.'),
            "{:?}",
            expression
        );
    }
}

#[test]
fn typed_expressions_never_repeat_operators() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..500 {
        let expression = typed_expression(&mut rng);
        assert!(!expression.starts_with(|c: char| "+*/".contains(c)), "{:?}", expression);
        assert!(!expression.contains("--"), "{:?}", expression);
        for pair in ["++", "+*", "+/", "*+", "**", "*/", "/+", "/*", "//"].iter() {
            assert!(!expression.contains(pair), "{:?}", expression);
        }
    }
}

fn assert_formattable(expression: &str, mode: AngleMode) {
    let result = evaluate(expression, mode);
    if result != ERROR {
        assert_ne!(format_number(&result, None), ERROR, "{:?} = {}", expression, result);
        assert_ne!(format_number(&result, Some(6)), ERROR, "{:?} = {}", expression, result);
    }
}

#[test]
fn results_are_always_formattable() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..500 {
        assert_formattable(&typed_expression(&mut rng), AngleMode::Degrees);
    }
    for _ in 0..2000 {
        let expression = random_expression(&mut rng);
        assert_formattable(&expression, AngleMode::Degrees);
        assert_formattable(&expression, AngleMode::Radians);
    }
}

#[test]
fn large_and_small_results_are_formattable() {
    let cases = vec![
        ("1e300*10", AngleMode::Degrees),
        ("tan(90)", AngleMode::Degrees),
        ("sin(pi)", AngleMode::Radians),
        ("2^53+1", AngleMode::Degrees),
        ("2^60", AngleMode::Degrees),
        ("10^16", AngleMode::Degrees),
        ("10^20", AngleMode::Degrees),
        ("10^21", AngleMode::Degrees),
        ("1/10^7", AngleMode::Degrees),
        ("-1e-300/10", AngleMode::Degrees),
    ];
    for (expression, mode) in cases {
        assert_ne!(evaluate(expression, mode), ERROR, "{}", expression);
        assert_formattable(expression, mode);
    }
    assert_eq!(format_number(&evaluate("2^60", AngleMode::Degrees), None), "1.1529215046068e+18");
    assert_eq!(format_number(&evaluate("10^20", AngleMode::Degrees), None), "1e+20");
    assert_eq!(format_number(&evaluate("1/10^7", AngleMode::Degrees), Some(6)), "0");
}

#[test]
fn binary_operations_match_floating_point() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..200 {
        let a: i64 = rng.gen_range(-1000, 1000);
        let b: i64 = rng.gen_range(1, 1000);
        let cases = vec![
            (format!("{} + {}", a, b), (a + b) as f64),
            (format!("{} - {}", a, b), (a - b) as f64),
            (format!("{} * {}", a, b), (a * b) as f64),
            (format!("{} / {}", a, b), a as f64 / b as f64),
        ];
        for (input, expected) in cases {
            assert_eq!(eval(&input, AngleMode::Degrees), Ok(expected), "{}", input);
        }
    }
}

#[test]
fn formatting_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..500 {
        let value = rng.gen::<f64>() * 10f64.powi(rng.gen_range(-8, 20));
        let once = format_number(&value.to_string(), None);
        assert_eq!(format_number(&once, None), once, "{}", value);
    }
}
