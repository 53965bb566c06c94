use super::has_dir_component;
use crate::defaults::PATH_ENV_VAR;
use crate::descriptor::app_name::AppName;
use crate::descriptor::interpreter::InterpreterPolicy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// A launchable process with every path and environment value resolved to a concrete string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppUnit {
    name: AppName,
    command: String,
    arguments: Vec<String>,
    working_directory: String,
    interpreter: InterpreterPolicy,
    environment: BTreeMap<String, String>,
}

impl AppUnit {
    pub(super) fn new(
        name: AppName,
        command: String,
        arguments: Vec<String>,
        working_directory: String,
        interpreter: InterpreterPolicy,
        environment: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name,
            command,
            arguments,
            working_directory,
            interpreter,
            environment,
        }
    }

    pub fn name(&self) -> &AppName {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn working_directory(&self) -> &str {
        &self.working_directory
    }

    pub fn interpreter(&self) -> &InterpreterPolicy {
        &self.interpreter
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    /// Program and arguments the supervisor runs, after applying the interpreter policy.
    pub fn launch_command(&self) -> LaunchCommand {
        match self.interpreter.interpreter_for(&self.command) {
            Some(interpreter) => LaunchCommand {
                program: interpreter,
                args: std::iter::once(self.script_path())
                    .chain(self.arguments.iter().cloned())
                    .collect(),
            },
            None => LaunchCommand {
                program: self.command.clone(),
                args: self.arguments.clone(),
            },
        }
    }

    /// Script handed to the interpreter. Interpreters open their script argument as a file, so a
    /// bare name is looked up in the unit `PATH` unless a file with that name sits in the working
    /// directory. Names found nowhere are kept as written.
    fn script_path(&self) -> String {
        if has_dir_component(&self.command)
            || Path::new(&self.working_directory)
                .join(&self.command)
                .is_file()
        {
            return self.command.clone();
        }
        match which::which_in(
            &self.command,
            self.environment.get(PATH_ENV_VAR),
            &self.working_directory,
        ) {
            Ok(found) => found.to_string_lossy().into_owned(),
            Err(err) => {
                debug!("script `{}` not found in the unit PATH: {}", self.command, err);
                self.command.clone()
            }
        }
    }

    /// Builds, without spawning it, the process this unit describes.
    ///
    /// The environment is cleared first: the resolved environment already carries every
    /// ambient variable the process must inherit.
    pub fn to_command(&self) -> Command {
        let launch = self.launch_command();
        let mut cmd = Command::new(&launch.program);
        cmd.args(&launch.args)
            .current_dir(&self.working_directory)
            .env_clear()
            .envs(&self.environment);
        cmd
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Display for LaunchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        self.args
            .iter()
            .try_for_each(|arg| write!(f, " {}", quote(arg)))
    }
}

// Single quotes anything a POSIX shell would split or expand.
fn quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Ordered set of resolved units, built once per load and never mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DescriptorSet {
    apps: Vec<AppUnit>,
}

impl DescriptorSet {
    pub(super) fn new(apps: Vec<AppUnit>) -> Self {
        Self { apps }
    }

    pub fn apps(&self) -> &[AppUnit] {
        &self.apps
    }

    pub fn get(&self, name: &str) -> Option<&AppUnit> {
        self.apps.iter().find(|app| &*app.name == name)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl IntoIterator for DescriptorSet {
    type Item = AppUnit;
    type IntoIter = std::vec::IntoIter<AppUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.apps.into_iter()
    }
}
