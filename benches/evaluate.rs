//! Timing of the evaluator and formatter on small and medium expressions.
//!
//! Run with: cargo bench --bench evaluate

use std::time::Instant;

use keypad::{evaluate, format_number, AngleMode};

const ITERATIONS: u32 = 10_000;

const SEXPR: &str = "4 ^ (88 * 9 / (59 - 3))";
const MEXPR: &str = "((((87))) - 73) + (97 + (((15 / 55 * ((31)) + 35))) + (15 - (9)) - (39 / 26) / 20 / 91 + 27 / (33 * 26 + 28 - (7) / 10 + 66 * 6) + 60 / 35 - ((29) - (69) / 44 / (92)) / (89) + 2 + 87 / 47 * ((2)) * 83 / 98 * 42 / (((67)) * ((97))) / (34 / 89 + 77) - 29 + 70 * (20)) + ((((((92))) + 23 * (98) / (95) + (((99) * (41))) + (5 + 41) + 10) - (36) / (6 + 80 * 52 + (90))))";
const TEXPR: &str = "sin(30) * cos(60) + tan(45) ^ 2 - sqrt(2) * pi / e";

fn bench<F: Fn() -> String>(name: &str, f: F) {
    let start = Instant::now();
    let mut last = f();
    for _ in 1..ITERATIONS {
        last = f();
    }
    let elapsed = start.elapsed();
    println!(
        "{:<14} {:>10.3} µs/iter  (last result {})",
        name,
        elapsed.as_secs_f64() * 1e6 / f64::from(ITERATIONS),
        last
    );
}

fn main() {
    bench("small_expr", || evaluate(SEXPR, AngleMode::Degrees));
    bench("medium_expr", || evaluate(MEXPR, AngleMode::Degrees));
    bench("trig_expr", || evaluate(TEXPR, AngleMode::Radians));
    bench("format", || format_number("-12345678.987654321", Some(6)));
}
