//! Gesture scripts
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! tap
//! wait 0.9
//! drag begin
//! drag move 300
//! drag end -200
//! drag cancel
//! ```

use std::time::Duration;

use thiserror::Error;

/// Longest single `wait`, in seconds
pub const MAX_WAIT_SECS: f32 = 600.0;

/// A single scripted input
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Tap,
    DragBegin,
    /// Translation from the drag start, positive downward
    DragMove(f32),
    /// Release velocity, positive downward
    DragEnd(f32),
    DragCancel,
    /// Advance time
    Wait(Duration),
}

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{text}`")]
    UnknownCommand { line: usize, text: String },

    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: `{value}` is not a number")]
    BadNumber { line: usize, value: String },

    #[error(
        "line {line}: wait must be between 0 and {max} seconds, got {value}",
        max = MAX_WAIT_SECS
    )]
    BadWait { line: usize, value: f32 },
}

/// Result type for script parsing
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        commands.push(parse_line(index + 1, text)?);
    }
    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<Command> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let number = |value: &str| {
        value.parse::<f32>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
            ScriptError::BadNumber {
                line,
                value: value.to_string(),
            }
        })
    };

    match words.as_slice() {
        ["tap"] => Ok(Command::Tap),
        ["wait", secs] => {
            let value = number(*secs)?;
            if !(0.0..=MAX_WAIT_SECS).contains(&value) {
                return Err(ScriptError::BadWait { line, value });
            }
            // Whole microseconds, so `wait 0.9` is exactly 900ms
            let micros = (f64::from(value) * 1e6).round() as u64;
            Ok(Command::Wait(Duration::from_micros(micros)))
        }
        ["wait"] => Err(ScriptError::MissingArgument {
            line,
            command: "wait",
            expected: "a duration in seconds",
        }),
        ["drag", "begin"] => Ok(Command::DragBegin),
        ["drag", "move", dy] => Ok(Command::DragMove(number(*dy)?)),
        ["drag", "move"] => Err(ScriptError::MissingArgument {
            line,
            command: "drag move",
            expected: "a vertical translation",
        }),
        ["drag", "end"] => Ok(Command::DragEnd(0.0)),
        ["drag", "end", vy] => Ok(Command::DragEnd(number(*vy)?)),
        ["drag", "cancel"] => Ok(Command::DragCancel),
        _ => Err(ScriptError::UnknownCommand {
            line,
            text: text.to_string(),
        }),
    }
}
