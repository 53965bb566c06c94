use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::Deref;
use thiserror::Error;

const APP_NAME_MAX_LENGTH: usize = 64;

/// Identifier of an app unit inside a descriptor.
///
/// It is only used by the supervisor to address the unit (logs, restart, stop) and never
/// reaches the launched process.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Hash, Eq, PartialOrd, Ord)]
#[serde(try_from = "String")]
pub struct AppName(String);

#[derive(Error, Debug, PartialEq)]
pub enum AppNameError {
    #[error("app name `{0}` is invalid: it must contain {APP_NAME_MAX_LENGTH} characters at most, start with an alphanumeric character and contain only alphanumeric characters, dashes, underscores or dots")]
    InvalidAppName(String),
}

impl TryFrom<String> for AppName {
    type Error = AppNameError;
    fn try_from(str: String) -> Result<Self, Self::Error> {
        if AppName::check_string(&str) {
            Ok(AppName(str))
        } else {
            Err(AppNameError::InvalidAppName(str))
        }
    }
}

impl AppName {
    pub fn new(str: &str) -> Result<Self, AppNameError> {
        Self::try_from(str.to_string())
    }

    fn check_string(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= APP_NAME_MAX_LENGTH
            && s.starts_with(|c: char| c.is_ascii_alphanumeric())
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl Deref for AppName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_str())
    }
}
