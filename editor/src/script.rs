//! Interaction scripts.
//!
//! A script replays widget interaction one command per frame. Blank lines
//! and `#` comments are skipped.

use std::fmt;
use std::path::Path;

/// Demonstration run when no script is given: type an exact width, drag it
/// down, then walk the history back and forth.
pub const DEFAULT_SCRIPT: &str = "\
# width starts at 10
print
type width 20
drag width 180 150 120
print
undo
print
undo
print
redo
redo
print
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Focus the property's text field, type `text`, press Enter.
    Type { property: String, text: String },
    /// Press the slider, move through `positions`, release.
    Drag {
        property: String,
        positions: Vec<i32>,
    },
    /// Like `Drag`, but the gesture is aborted before release.
    Cancel {
        property: String,
        positions: Vec<i32>,
    },
    /// Click the property's check box.
    Toggle { property: String },
    Undo,
    Redo,
    /// Let frames pass without interaction.
    Tick(u32),
    /// Mark the current history position as saved.
    Save,
    /// Print the decal and the panel.
    Print,
}

/// A command together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

/// Script failure, tied to a 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

fn parse_positions(line: usize, args: &[&str]) -> Result<Vec<i32>, ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::new(line, "expected at least one slider position"));
    }
    args.iter()
        .map(|arg| {
            arg.parse()
                .map_err(|_| ScriptError::new(line, format!("invalid slider position {arg:?}")))
        })
        .collect()
}

fn parse_line(line: usize, source: &str) -> Result<Command, ScriptError> {
    let mut words = source.split_whitespace();
    let Some(keyword) = words.next() else {
        return Err(ScriptError::new(line, "empty command"));
    };
    let args: Vec<&str> = words.collect();

    let property = || {
        args.first()
            .map(|p| p.to_string())
            .ok_or_else(|| ScriptError::new(line, format!("`{keyword}` needs a property name")))
    };
    let no_args = |command: Command| {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(ScriptError::new(line, format!("`{keyword}` takes no arguments")))
        }
    };

    match keyword {
        "type" => {
            let property = property()?;
            // Everything after the property name, spaces included.
            let text = source
                .trim_start()
                .strip_prefix("type")
                .map(str::trim_start)
                .and_then(|rest| rest.strip_prefix(property.as_str()))
                .map(|text| text.strip_prefix(' ').unwrap_or(text))
                .unwrap_or_default()
                .to_owned();
            Ok(Command::Type { property, text })
        }
        "drag" => Ok(Command::Drag {
            property: property()?,
            positions: parse_positions(line, args.get(1..).unwrap_or_default())?,
        }),
        "cancel" => Ok(Command::Cancel {
            property: property()?,
            positions: parse_positions(line, args.get(1..).unwrap_or_default())?,
        }),
        "toggle" => Ok(Command::Toggle {
            property: property()?,
        }),
        "tick" => match args.as_slice() {
            [] => Ok(Command::Tick(1)),
            [n] => n
                .parse()
                .map(Command::Tick)
                .map_err(|_| ScriptError::new(line, format!("invalid frame count {n:?}"))),
            _ => Err(ScriptError::new(line, "`tick` takes at most one argument")),
        },
        "undo" => no_args(Command::Undo),
        "redo" => no_args(Command::Redo),
        "save" => no_args(Command::Save),
        "print" => no_args(Command::Print),
        other => Err(ScriptError::new(line, format!("unknown command `{other}`"))),
    }
}

/// Parses a whole script.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim_end()))
        .filter(|(_, text)| {
            let text = text.trim_start();
            !text.is_empty() && !text.starts_with('#')
        })
        .map(|(line, text)| {
            parse_line(line, text).map(|command| ScriptLine { line, command })
        })
        .collect()
}

/// Loads and parses a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_script(&content).map_err(|e| format!("{}: {e}", path.display()))
}
