//! Simulation configuration: a flat set of named integer parameters.
//!
//! Every name-based access (argument parsing, runtime `set_option`, the
//! configuration dump) goes through [`CONFIG_SCHEMA`], an ordered table of
//! `{name, default, minimum, get, set}` entries.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::command::CONTROLS;

pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 1200;

/// Particles get a speed in `[0, PARTICLE_SPEED_MAXIMUM)`, negated half the time.
/// The factor is a percentage applied at runtime.
pub const PARTICLE_SPEED_MAXIMUM: i32 = 30;
pub const PARTICLE_SPEED_FACTOR: i32 = 100;

pub const PARTICLE_RADIUS_MINIMUM: i32 = 1;
pub const PARTICLE_RADIUS_MAXIMUM: i32 = 5;

/// Distance from the center at spawn, before ring stacking and expansion.
pub const PARTICLE_HEIGHT_MINIMUM: i32 = 0;
pub const PARTICLE_HEIGHT_MAXIMUM: i32 = 5;

/// Per-particle connection range. The factor is a percentage applied at runtime.
/// Rings at or past `PARTICLE_LINE_RING_DISABLE` get no lines; -1 keeps lines everywhere.
pub const PARTICLE_LINE_DISTANCE_MINIMUM: i32 = 0;
pub const PARTICLE_LINE_DISTANCE_MAXIMUM: i32 = 200;
pub const PARTICLE_LINE_DISTANCE_FACTOR: i32 = 100;
pub const PARTICLE_LINE_RING_DISABLE: i32 = -1;

/// Outward growth in units per second.
pub const PARTICLE_EXPAND_RATE: i32 = 20;

/// Upper bound (ms) of the delay before a new particle becomes visible.
pub const PARTICLE_BORN_TIMER_MAXIMUM: i32 = 1000;

/// Palette steps per second for the color cycle.
pub const PARTICLE_COLOR_SPEED: i32 = 50;

pub const RINGS_MAXIMUM: i32 = 35;

/// Percent opacity used while fading is enabled.
pub const ALPHA_BACKGROUND: i32 = 7;
pub const ALPHA_ELEMENTS: i32 = 25;

/// Periods in milliseconds. 0 disables the timer.
pub const TIMER_PRINT_STATUS_LINE: i32 = 2000;
pub const TIMER_ADD_NEW_RING: i32 = 1000;

/// Runtime configuration for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SimConfig {
    pub window_width: i32,
    pub window_height: i32,
    pub particle_speed_maximum: i32,
    pub particle_speed_factor: i32,
    pub particle_radius_minimum: i32,
    pub particle_radius_maximum: i32,
    pub particle_height_minimum: i32,
    pub particle_height_maximum: i32,
    pub particle_line_distance_minimum: i32,
    pub particle_line_distance_maximum: i32,
    pub particle_line_distance_factor: i32,
    pub particle_line_ring_disable: i32,
    pub particle_expand_rate: i32,
    pub particle_born_timer_maximum: i32,
    pub particle_color_speed: i32,
    pub rings_maximum: i32,
    pub alpha_background: i32,
    pub alpha_elements: i32,
    pub timer_print_status_line: i32,
    pub timer_add_new_ring: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            particle_speed_maximum: PARTICLE_SPEED_MAXIMUM,
            particle_speed_factor: PARTICLE_SPEED_FACTOR,
            particle_radius_minimum: PARTICLE_RADIUS_MINIMUM,
            particle_radius_maximum: PARTICLE_RADIUS_MAXIMUM,
            particle_height_minimum: PARTICLE_HEIGHT_MINIMUM,
            particle_height_maximum: PARTICLE_HEIGHT_MAXIMUM,
            particle_line_distance_minimum: PARTICLE_LINE_DISTANCE_MINIMUM,
            particle_line_distance_maximum: PARTICLE_LINE_DISTANCE_MAXIMUM,
            particle_line_distance_factor: PARTICLE_LINE_DISTANCE_FACTOR,
            particle_line_ring_disable: PARTICLE_LINE_RING_DISABLE,
            particle_expand_rate: PARTICLE_EXPAND_RATE,
            particle_born_timer_maximum: PARTICLE_BORN_TIMER_MAXIMUM,
            particle_color_speed: PARTICLE_COLOR_SPEED,
            rings_maximum: RINGS_MAXIMUM,
            alpha_background: ALPHA_BACKGROUND,
            alpha_elements: ALPHA_ELEMENTS,
            timer_print_status_line: TIMER_PRINT_STATUS_LINE,
            timer_add_new_ring: TIMER_ADD_NEW_RING,
        }
    }
}

/// One named parameter in the configuration schema.
#[derive(Clone, Copy)]
pub struct ConfigParam {
    /// External (camelCase) name, also accepted as `--name`.
    pub name: &'static str,
    pub default: i32,
    /// Smallest accepted value.
    pub minimum: i32,
    pub get: fn(&SimConfig) -> i32,
    pub set: fn(&mut SimConfig, i32),
}

impl std::fmt::Debug for ConfigParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigParam")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("minimum", &self.minimum)
            .finish()
    }
}

macro_rules! param {
    ($name:literal, $field:ident, $default:expr) => {
        param!($name, $field, $default, 0)
    };
    ($name:literal, $field:ident, $default:expr, $minimum:expr) => {
        ConfigParam {
            name: $name,
            default: $default,
            minimum: $minimum,
            get: |c| c.$field,
            set: |c, v| c.$field = v,
        }
    };
}

/// Every configuration parameter, in display order.
pub const CONFIG_SCHEMA: &[ConfigParam] = &[
    param!("windowWidth", window_width, WINDOW_WIDTH),
    param!("windowHeight", window_height, WINDOW_HEIGHT),
    param!("particleSpeedMaximum", particle_speed_maximum, PARTICLE_SPEED_MAXIMUM),
    param!("particleSpeedFactor", particle_speed_factor, PARTICLE_SPEED_FACTOR),
    param!("particleRadiusMinimum", particle_radius_minimum, PARTICLE_RADIUS_MINIMUM),
    param!("particleRadiusMaximum", particle_radius_maximum, PARTICLE_RADIUS_MAXIMUM),
    param!("particleHeightMinimum", particle_height_minimum, PARTICLE_HEIGHT_MINIMUM),
    param!("particleHeightMaximum", particle_height_maximum, PARTICLE_HEIGHT_MAXIMUM),
    param!("particleLineDistanceMinimum", particle_line_distance_minimum, PARTICLE_LINE_DISTANCE_MINIMUM),
    param!("particleLineDistanceMaximum", particle_line_distance_maximum, PARTICLE_LINE_DISTANCE_MAXIMUM),
    param!("particleLineDistanceFactor", particle_line_distance_factor, PARTICLE_LINE_DISTANCE_FACTOR),
    param!("particleLineRingDisable", particle_line_ring_disable, PARTICLE_LINE_RING_DISABLE, -1),
    param!("particleExpandRate", particle_expand_rate, PARTICLE_EXPAND_RATE),
    param!("particleBornTimerMaximum", particle_born_timer_maximum, PARTICLE_BORN_TIMER_MAXIMUM),
    param!("particleColorSpeed", particle_color_speed, PARTICLE_COLOR_SPEED),
    param!("ringsMaximum", rings_maximum, RINGS_MAXIMUM),
    param!("alphaBackground", alpha_background, ALPHA_BACKGROUND),
    param!("alphaElements", alpha_elements, ALPHA_ELEMENTS),
    param!("timerPrintStatusLine", timer_print_status_line, TIMER_PRINT_STATUS_LINE),
    param!("timerAddNewRing", timer_add_new_ring, TIMER_ADD_NEW_RING),
];

/// `(minimum, maximum)` parameter pairs that describe a spawn range.
const RANGE_PAIRS: [(&str, &str); 3] = [
    ("particleRadiusMinimum", "particleRadiusMaximum"),
    ("particleHeightMinimum", "particleHeightMaximum"),
    ("particleLineDistanceMinimum", "particleLineDistanceMaximum"),
];

/// Result of parsing command-line style arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub config: SimConfig,
    /// `-p` / `--paused` was given.
    pub paused: bool,
    /// `-h` / `--help` was given; the caller should print [`usage`] and stop.
    pub help: bool,
}

impl SimConfig {
    /// Look up a schema entry by its external name.
    pub fn param(name: &str) -> Option<&'static ConfigParam> {
        CONFIG_SCHEMA.iter().find(|p| p.name == name)
    }

    pub fn get_option(&self, name: &str) -> Option<i32> {
        Self::param(name).map(|p| (p.get)(self))
    }

    /// Set a single parameter by name. Only the parameter's own minimum is
    /// checked here; call [`validate`](Self::validate) once all values are in.
    pub fn set_option(&mut self, name: &str, value: i32) -> Result<(), ConfigError> {
        let param = Self::param(name).ok_or_else(|| ConfigError::UnknownOption(name.to_string()))?;
        if value < param.minimum {
            return Err(ConfigError::BelowMinimum {
                name: param.name,
                value,
                minimum: param.minimum,
            });
        }
        (param.set)(self, value);
        Ok(())
    }

    /// Check every parameter minimum and every spawn range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for param in CONFIG_SCHEMA {
            let value = (param.get)(self);
            if value < param.minimum {
                return Err(ConfigError::BelowMinimum {
                    name: param.name,
                    value,
                    minimum: param.minimum,
                });
            }
        }
        for (min_name, max_name) in RANGE_PAIRS {
            let (Some(min), Some(max)) = (Self::param(min_name), Self::param(max_name)) else {
                continue;
            };
            if (max.get)(self) < (min.get)(self) {
                return Err(ConfigError::InvertedRange { minimum: min.name, maximum: max.name });
            }
        }
        Ok(())
    }

    /// Parse a JSON object of camelCase parameters. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Speed factor as a multiplier (100% = 1.0).
    pub fn speed_rate(&self) -> f32 {
        self.particle_speed_factor as f32 / 100.0
    }

    /// Line distance factor as a multiplier (100% = 1.0).
    pub fn line_distance_rate(&self) -> f32 {
        self.particle_line_distance_factor as f32 / 100.0
    }

    /// Render the current values, one `name=value` per line.
    pub fn describe(&self) -> String {
        let mut out = String::from("Configuration\n");
        for param in CONFIG_SCHEMA {
            let _ = writeln!(out, "  {}={}", param.name, (param.get)(self));
        }
        out
    }
}

/// Parse `--name value` pairs, `-h`/`--help` and `-p`/`--paused`.
/// `args` must not include the program name.
pub fn parse_args<I, S>(args: I) -> Result<ParsedArgs, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedArgs {
        config: SimConfig::default(),
        paused: false,
        help: false,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if let Some(name) = arg.strip_prefix("--") {
            match name {
                "help" => parsed.help = true,
                "paused" => parsed.paused = true,
                _ => {
                    if SimConfig::param(name).is_none() {
                        return Err(ConfigError::UnknownOption(name.to_string()));
                    }
                    let raw = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;
                    let raw = raw.as_ref();
                    let value = raw.parse::<i32>().map_err(|_| ConfigError::InvalidValue {
                        name: name.to_string(),
                        value: raw.to_string(),
                    })?;
                    parsed.config.set_option(name, value)?;
                }
            }
        } else if let Some(short) = arg.strip_prefix('-') {
            match short {
                "h" => parsed.help = true,
                "p" => parsed.paused = true,
                _ => return Err(ConfigError::UnexpectedArgument(arg.to_string())),
            }
        } else {
            return Err(ConfigError::UnexpectedArgument(arg.to_string()));
        }
    }

    parsed.config.validate()?;
    Ok(parsed)
}

/// Full help text: options, current configuration, and controls.
pub fn usage(config: &SimConfig) -> String {
    let mut out = String::new();
    out.push_str("Usage: undercurrents [-h] [-p] [--configVariableName value]\n\n");
    out.push_str("Options\n");
    out.push_str("    -h, --help                      print this message and exit\n");
    out.push_str("    -p, --paused                    start in the 'paused' state\n");
    out.push_str("    --configVariableName value      set a configuration variable, see below\n\n");
    out.push_str("  ie: undercurrents --windowHeight 500 --windowWidth 700 --ringsMaximum 20\n\n");
    out.push_str(&config.describe());
    out.push('\n');
    out.push_str(CONTROLS);
    out
}
