use super::app_name::AppName;
use super::interpreter::InterpreterPolicy;
use crate::logging::config::LoggingConfig;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Authoring form of a deployment descriptor.
///
/// ```yaml
/// apps:
///   - name: rnaseq-backend
///     script: .venv/bin/gunicorn
///     args: -c gunicorn.conf.py app:app
///     cwd: ~/RNAseq_web
///     interpreter: none
///     path_prepend:
///       - .venv/bin
///     env:
///       FLASK_ENV: production
/// ```
///
/// Values are kept unresolved here. See [`crate::evaluator::evaluate`] for how they are turned
/// into concrete strings.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DescriptorDefinition {
    #[serde(default)]
    pub apps: Vec<AppUnitDefinition>,
    #[serde(default)]
    pub log: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppUnitDefinition {
    pub name: AppName,

    /// Executable or script to run. A bare name is looked up through the composed `PATH`.
    pub script: String,

    #[serde(default)]
    pub args: Args,

    /// Working directory, anchored to the home directory unless absolute.
    #[serde(default)]
    pub cwd: Option<String>,

    #[serde(default)]
    pub interpreter: InterpreterPolicy,

    /// Unit-local executable directories prepended to `PATH`.
    #[serde(default)]
    pub path_prepend: Vec<String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Command line arguments, either as a single whitespace separated string or as a list.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Args {
    Line(String),
    List(Vec<String>),
}

impl Default for Args {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Args {
    pub fn into_vector(self) -> Vec<String> {
        match self {
            Self::Line(line) => line.split_whitespace().map(|s| s.to_string()).collect(),
            Self::List(list) => list,
        }
    }
}
