/// Runtime adjustments applied by [`Simulation::apply`](crate::api::simulation::Simulation::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SpeedFactorUp,
    SpeedFactorDown,
    LineDistanceFactorUp,
    LineDistanceFactorDown,
    ToggleBlank,
    ClearRings,
    ToggleFading,
    ToggleLines,
    CycleColorMode,
    TogglePause,
    RandomizePalette,
    Resize { width: i32, height: i32 },
    Quit,
}

pub const KEY_ESCAPE: u32 = 27;
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;

impl Command {
    /// Map a browser `keyCode` to a command. Letter keys use their uppercase
    /// ASCII code, as browsers report them.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        let command = match key_code {
            KEY_UP => Command::SpeedFactorUp,
            KEY_DOWN => Command::SpeedFactorDown,
            KEY_RIGHT => Command::LineDistanceFactorUp,
            KEY_LEFT => Command::LineDistanceFactorDown,
            0x42 => Command::ToggleBlank,
            0x43 => Command::ClearRings,
            0x46 => Command::ToggleFading,
            0x4C => Command::ToggleLines,
            0x4D => Command::CycleColorMode,
            0x50 => Command::TogglePause,
            0x52 => Command::RandomizePalette,
            KEY_ESCAPE => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Key help shown with `--help` and at startup.
pub const CONTROLS: &str = "\
Controls
    up/down       increase/decrease particleSpeedFactor
    left/right    decrease/increase particleLineDistanceFactor
    b             blank the screen
    c             clear all rings
    f             toggle fading
    l             toggle lines
    m             cycle color mode
    p             pause
    r             randomize colors
    Esc           quit
";
