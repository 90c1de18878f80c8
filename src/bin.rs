use std::fmt;
use std::io::{self, stdin, stdout, BufRead, Write};
use std::mem;
use std::process::exit;

use clap::{App, AppSettings, Arg, ArgMatches};
use liner::{Completer, Context, Prompt};
use log::LevelFilter;

use keypad::session::{Action, State};
use keypad::{evaluate, format_number, AngleMode, ERROR};

const PROMPT: &str = "[]> ";

/// Decimal places shown when `--precision` is not given.
const DEFAULT_PRECISION: usize = 6;

#[derive(Debug)]
pub enum RuntimeError {
    IO(io::Error),
    Config(String),
}

impl From<io::Error> for RuntimeError {
    fn from(data: io::Error) -> RuntimeError {
        RuntimeError::IO(data)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RuntimeError::IO(ref e) => write!(f, "keypad: {}", e),
            RuntimeError::Config(ref s) => write!(f, "keypad: {}", s),
        }
    }
}

/// The prompt offers no tab completion.
struct EmptyCompleter;

impl Completer for EmptyCompleter {
    fn completions(&mut self, _start: &str) -> Vec<String> {
        Vec::new()
    }
}

struct Settings {
    angle_mode: AngleMode,
    precision: usize,
    raw: bool,
}

impl Settings {
    fn from_matches(matches: &ArgMatches) -> Result<Settings, RuntimeError> {
        let precision: usize = match matches.value_of("precision") {
            Some(places) => places
                .parse()
                .map_err(|_| RuntimeError::Config(format!("invalid precision '{}'", places)))?,
            None => DEFAULT_PRECISION,
        };
        let angle_mode = if matches.is_present("radians") {
            AngleMode::Radians
        } else {
            AngleMode::Degrees
        };
        Ok(Settings { angle_mode, precision, raw: matches.is_present("raw") })
    }

    fn render(&self, result: &str) -> String {
        if self.raw {
            result.to_owned()
        } else {
            format_number(result, Some(self.precision))
        }
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("keypad")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluate calculator expressions")
        .setting(AppSettings::TrailingVarArg)
        .arg(
            Arg::with_name("radians")
                .short("r")
                .long("radians")
                .help("Interpret trigonometric arguments as radians instead of degrees"),
        )
        .arg(
            Arg::with_name("precision")
                .short("p")
                .long("precision")
                .takes_value(true)
                .value_name("PLACES")
                .validator(|v| v.parse::<usize>().map(|_| ()).map_err(|e| e.to_string()))
                .help("Decimal places shown in results (default 6)"),
        )
        .arg(
            Arg::with_name("raw")
                .long("raw")
                .help("Print results without thousand separators or rounding"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more detail to stderr; repeat for more"),
        )
        .arg(
            Arg::with_name("expression")
                .multiple(true)
                .allow_hyphen_values(true)
                .help("Expression to evaluate; reads from stdin when omitted"),
        )
}

fn init_logging(verbosity: u64) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbosity {
        0 => (),
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Apply one line of input to the session. Returns `false` when the user
/// asked to leave.
fn handle_line<W: Write>(
    line: &str,
    state: &mut State,
    settings: &Settings,
    out: &mut W,
) -> io::Result<bool> {
    match line.trim() {
        "" => (),
        "exit" | "quit" => return Ok(false),
        "mode" => {
            *state = mem::take(state).reduce(Action::ToggleMode);
            writeln!(out, "mode: {}", state.angle_mode)?;
        }
        "clear" => *state = mem::take(state).reduce(Action::Clear),
        s => {
            *state = mem::take(state)
                .reduce(Action::LoadExpression(s.to_owned()))
                .reduce(Action::Calculate);
            match state.error {
                Some(ref error) => writeln!(out, "{}", error)?,
                None => writeln!(out, "{}", settings.render(&state.result))?,
            }
        }
    }
    Ok(true)
}

/// Evaluate a single expression given on the command line. Returns `false`
/// when the result is the error sentinel.
fn one_shot<W: Write>(expression: &str, settings: &Settings, out: &mut W) -> io::Result<bool> {
    let result = evaluate(expression, settings.angle_mode);
    if result == ERROR {
        writeln!(out, "{}", ERROR)?;
        return Ok(false);
    }
    writeln!(out, "{}", settings.render(&result))?;
    Ok(true)
}

fn interactive<W: Write>(settings: &Settings, out: &mut W) -> Result<(), RuntimeError> {
    let mut state = State::new(settings.angle_mode);
    let mut con = Context::new();
    loop {
        let line = con.read_line(Prompt::from(PROMPT.to_owned()), None, &mut EmptyCompleter)?;
        if !handle_line(&line, &mut state, settings, out)? {
            break;
        }
        if !line.trim().is_empty() {
            con.history.push(line.into())?;
        }
    }
    Ok(())
}

fn piped<W: Write>(settings: &Settings, out: &mut W) -> Result<(), RuntimeError> {
    let mut state = State::new(settings.angle_mode);
    let input = stdin();
    for line in input.lock().lines() {
        if !handle_line(&line?, &mut state, settings, out)? {
            break;
        }
    }
    Ok(())
}

/// Returns whether the run succeeded; only a one-shot evaluation that
/// produced `"Error"` reports failure this way.
pub fn run(matches: &ArgMatches) -> Result<bool, RuntimeError> {
    let settings = Settings::from_matches(matches)?;
    let stdout = stdout();
    let mut stdout = stdout.lock();

    match matches.values_of("expression") {
        Some(words) => {
            let expression = words.collect::<Vec<_>>().join(" ");
            return one_shot(&expression, &settings, &mut stdout).map_err(RuntimeError::from);
        }
        None if atty::is(atty::Stream::Stdin) => interactive(&settings, &mut stdout)?,
        None => piped(&settings, &mut stdout)?,
    }
    Ok(true)
}

fn main() {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));
    let code = match run(&matches) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            println!("{}", e);
            1
        }
    };
    exit(code)
}
