use crate::defaults::DEFAULT_INTERPRETER;
use serde::{Deserialize, Serialize};
use std::path::Path;

const NONE: &str = "none";
const AUTO: &str = "auto";

/// Tells the supervisor whether the unit command must be wrapped in an interpreter invocation.
///
/// Self-contained binaries (for instance an entry point living inside an isolated dependency
/// environment) must use [`InterpreterPolicy::None`], otherwise they would be handed to an
/// interpreter that cannot run them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum InterpreterPolicy {
    /// Execute the command directly.
    None,
    /// Pick the interpreter from the script extension.
    #[default]
    Auto,
    /// Run the command through the named interpreter.
    Interpreter(String),
}

impl From<String> for InterpreterPolicy {
    fn from(value: String) -> Self {
        match value.trim() {
            NONE => Self::None,
            AUTO | "" => Self::Auto,
            other => Self::Interpreter(other.to_string()),
        }
    }
}

impl From<InterpreterPolicy> for String {
    fn from(value: InterpreterPolicy) -> Self {
        match value {
            InterpreterPolicy::None => NONE.to_string(),
            InterpreterPolicy::Auto => AUTO.to_string(),
            InterpreterPolicy::Interpreter(i) => i,
        }
    }
}

impl InterpreterPolicy {
    /// Returns the interpreter that must wrap `command`, if any.
    pub fn interpreter_for(&self, command: &str) -> Option<String> {
        match self {
            Self::None => None,
            Self::Interpreter(i) => Some(i.clone()),
            Self::Auto => Some(
                interpreter_by_extension(command)
                    .unwrap_or(DEFAULT_INTERPRETER)
                    .to_string(),
            ),
        }
    }

    /// True when `Auto` cannot infer an interpreter and falls back to the default one.
    pub fn falls_back_to_default(&self, command: &str) -> bool {
        matches!(self, Self::Auto) && interpreter_by_extension(command).is_none()
    }
}

fn interpreter_by_extension(command: &str) -> Option<&'static str> {
    let extension = Path::new(command).extension()?.to_str()?;
    match extension {
        "py" => Some("python3"),
        "js" | "mjs" | "cjs" => Some("node"),
        "sh" => Some("bash"),
        "rb" => Some("ruby"),
        "pl" => Some("perl"),
        "php" => Some("php"),
        _ => None,
    }
}
