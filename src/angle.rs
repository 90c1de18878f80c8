use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// How the arguments of `sin`, `cos` and `tan` are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleMode {
    Degrees,
    Radians,
}

impl AngleMode {
    /// Convert a trigonometric argument given in this mode to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle * PI / 180.0,
            AngleMode::Radians => angle,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }
}

impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Degrees
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AngleMode::Degrees => write!(f, "DEG"),
            AngleMode::Radians => write!(f, "RAD"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            _ => Err(format!("unknown angle mode '{}'", s)),
        }
    }
}
