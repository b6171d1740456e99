//! Line-oriented command parsing

use crate::{
    overlay::{PercentPoint, Point, Size},
    presentation::{EventPhase, Key},
    state::MAX_DURATION_SECONDS,
};

/// Smallest value the duration control offers
pub const DURATION_STEP_SECONDS: i64 = 5;

/// One user action from the controls, the pointer or the keyboard
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Url(String),
    Duration(i64),
    Play,
    Pause,
    Toggle,
    Reset,
    FontSize(u32),
    Font(String),
    Opacity(u8),
    Position(PercentPoint),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Container(Size),
    Measure(Size),
    EmbedError,
    Fullscreen,
    Key(Key, EventPhase),
    Status,
    Fonts,
    Health,
    Quit,
}

impl Command {
    /// Parse a single input line such as `duration 90` or `move 120 40`
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "" => return Err("Empty command".to_string()),
            "url" => Command::Url(rest.to_string()),
            "duration" => Command::Duration(quantize_duration_input(parse_number(rest)?)),
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" => Command::Toggle,
            "reset" => Command::Reset,
            "font-size" => Command::FontSize(parse_number(rest)?.clamp(0, u32::MAX as i64) as u32),
            "font" => {
                if rest.is_empty() {
                    return Err("Usage: font <family>".to_string());
                }
                Command::Font(rest.to_string())
            }
            "opacity" => Command::Opacity(parse_number(rest)?.clamp(0, 100) as u8),
            "position" => {
                let (x, y) = parse_pair(rest)?;
                Command::Position(PercentPoint::new(x, y))
            }
            "down" => Command::PointerDown(parse_point(rest)?),
            "move" => Command::PointerMove(parse_point(rest)?),
            "up" => Command::PointerUp,
            "container" => Command::Container(parse_size(rest)?),
            "measure" => Command::Measure(parse_size(rest)?),
            "embed-error" => Command::EmbedError,
            "fullscreen" => Command::Fullscreen,
            "key" => parse_key(rest)?,
            "status" => Command::Status,
            "fonts" => Command::Fonts,
            "health" => Command::Health,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("Unknown command: {}", other)),
        };
        Ok(command)
    }

    /// Action name recorded as the last action
    pub fn action(&self) -> &'static str {
        match self {
            Command::Url(_) => "url",
            Command::Duration(_) => "duration",
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Toggle => "toggle",
            Command::Reset => "reset",
            Command::FontSize(_) => "font-size",
            Command::Font(_) => "font",
            Command::Opacity(_) => "opacity",
            Command::Position(_) => "position",
            Command::PointerDown(_) => "pointer-down",
            Command::PointerMove(_) => "pointer-move",
            Command::PointerUp => "pointer-up",
            Command::Container(_) => "container",
            Command::Measure(_) => "measure",
            Command::EmbedError => "embed-error",
            Command::Fullscreen => "fullscreen",
            Command::Key(..) => "key",
            Command::Status => "status",
            Command::Fonts => "fonts",
            Command::Health => "health",
            Command::Quit => "quit",
        }
    }
}

/// Snap raw duration input to the control's 5-second steps.
///
/// Mirrors the range control: input is bounded to the control's range
/// first, then rounded half up to the nearest step.
pub fn quantize_duration_input(seconds: i64) -> i64 {
    let max = MAX_DURATION_SECONDS as i64;
    let bounded = seconds.clamp(DURATION_STEP_SECONDS, max);
    let steps = (bounded + DURATION_STEP_SECONDS / 2) / DURATION_STEP_SECONDS;
    (steps * DURATION_STEP_SECONDS).clamp(DURATION_STEP_SECONDS, max)
}

/// Parse a `WxH` or `W H` size
pub fn parse_size(value: &str) -> Result<Size, String> {
    let normalized = value.replace(['x', 'X'], " ");
    let (width, height) = parse_pair(&normalized)?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("Size must not be negative: {}", value));
    }
    Ok(Size::new(width, height))
}

fn parse_number(value: &str) -> Result<i64, String> {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        return Ok(number);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n.round() as i64)
        .ok_or_else(|| format!("Invalid number: {:?}", value))
}

fn parse_pair(value: &str) -> Result<(f64, f64), String> {
    let mut parts = value.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("Expected two numbers, got {:?}", value));
    };
    let parse = |part: &str| {
        part.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("Invalid number: {:?}", part))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = parse_pair(value)?;
    Ok(Point::new(x, y))
}

fn parse_key(value: &str) -> Result<Command, String> {
    let mut parts = value.split_whitespace();
    let Some(name) = parts.next() else {
        return Err("Usage: key <name> [capture|bubble]".to_string());
    };
    let phase = match parts.next().map(str::to_ascii_lowercase).as_deref() {
        None | Some("capture") => EventPhase::Capture,
        Some("bubble") => EventPhase::Bubble,
        Some(other) => return Err(format!("Unknown event phase: {}", other)),
    };
    Ok(Command::Key(Key::parse(name), phase))
}
