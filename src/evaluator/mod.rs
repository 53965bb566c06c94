pub mod error;
pub mod resolved;
pub mod templates;

use crate::defaults::{DIR_SEPARATOR, HOME_ENV_VAR, PATH_ENV_VAR};
use crate::descriptor::definition::{AppUnitDefinition, DescriptorDefinition};
use crate::environment::{path, AmbientEnvironment};
use error::EvaluationError;
use resolved::{AppUnit, DescriptorSet};
use std::collections::BTreeMap;
use std::path::Path;
use templates::template_with;
use tracing::{debug, warn};

const HOME_PREFIX: char = '~';

// Descriptors are written with `/` whatever the platform.
const SEPARATORS: [char; 2] = ['/', DIR_SEPARATOR];

fn has_dir_component(s: &str) -> bool {
    s.contains(SEPARATORS)
}

/// Resolves a descriptor against a snapshot of the ambient environment.
///
/// For every unit:
/// - the working directory is the ambient home directory followed by the unit `cwd`,
/// - literal `env` entries override the ambient environment, every other ambient variable is
///   passed through,
/// - `path_prepend` directories are put in front of the existing `PATH`, never replacing it.
///
/// The evaluation is all or nothing: the home directory must be set and the first unit that
/// cannot be resolved fails the whole set.
pub fn evaluate(
    descriptor: &DescriptorDefinition,
    ambient: &AmbientEnvironment,
) -> Result<DescriptorSet, EvaluationError> {
    let home = ambient
        .home()
        .ok_or_else(|| EvaluationError::MissingEnvironment(HOME_ENV_VAR.to_string()))?;

    let apps = descriptor
        .apps
        .iter()
        .map(|app| evaluate_unit(app, home, ambient))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("descriptor evaluated with {} app units", apps.len());
    Ok(DescriptorSet::new(apps))
}

fn evaluate_unit(
    app: &AppUnitDefinition,
    home: &str,
    ambient: &AmbientEnvironment,
) -> Result<AppUnit, EvaluationError> {
    let cwd = app
        .cwd
        .as_deref()
        .map(|cwd| template_with(cwd, ambient))
        .transpose()?;
    let working_directory = working_directory(home, cwd.as_deref());

    let command = anchor_command(&template_with(&app.script, ambient)?, &working_directory);

    let arguments = app
        .args
        .clone()
        .into_vector()
        .iter()
        .map(|arg| template_with(arg, ambient))
        .collect::<Result<Vec<_>, _>>()?;

    let literal_env = app
        .env
        .iter()
        .map(|(k, v)| Ok((k.clone(), template_with(v, ambient)?)))
        .collect::<Result<BTreeMap<_, _>, EvaluationError>>()?;

    let bin_dirs = app
        .path_prepend
        .iter()
        .map(|dir| Ok(join(&working_directory, &template_with(dir, ambient)?)))
        .collect::<Result<Vec<_>, EvaluationError>>()?;

    let environment = compose_environment(ambient, literal_env, &bin_dirs);

    if app.interpreter.falls_back_to_default(&command) {
        warn!(
            "app `{}` runs `{}` through the default interpreter, set `interpreter: none` if it is a binary",
            app.name, command
        );
    }

    debug!("app `{}` resolved to working directory {}", app.name, working_directory);

    Ok(AppUnit::new(
        app.name.clone(),
        command,
        arguments,
        working_directory,
        app.interpreter.clone(),
        environment,
    ))
}

/// Ambient environment with the literal overrides on top and the unit directories prepended to
/// `PATH`. The `PATH` base is the literal override when there is one.
fn compose_environment(
    ambient: &AmbientEnvironment,
    literal_env: BTreeMap<String, String>,
    bin_dirs: &[String],
) -> BTreeMap<String, String> {
    let composed_path = (!bin_dirs.is_empty()).then(|| {
        let base = literal_env
            .get(PATH_ENV_VAR)
            .map(String::as_str)
            .unwrap_or_else(|| ambient.path());
        path::prepend(bin_dirs, base)
    });

    let mut environment = ambient.vars().clone();
    environment.extend(literal_env);
    if let Some(composed_path) = composed_path {
        environment.insert(PATH_ENV_VAR.to_string(), composed_path);
    }

    environment
}

/// `~` and `~/suffix` are concatenated to the home directory, other relative paths are joined to
/// it and absolute paths are kept. No `cwd` means the home directory itself.
fn working_directory(home: &str, cwd: Option<&str>) -> String {
    let Some(cwd) = cwd else {
        return home.to_string();
    };
    match cwd.strip_prefix(HOME_PREFIX) {
        Some(suffix) if suffix.is_empty() || suffix.starts_with(SEPARATORS) => {
            format!("{home}{suffix}")
        }
        _ => join(home, cwd),
    }
}

/// Relative commands with a directory component are anchored to the working directory. Bare
/// names are left for the `PATH` lookup.
fn anchor_command(command: &str, working_directory: &str) -> String {
    if has_dir_component(command) {
        join(working_directory, command)
    } else {
        command.to_string()
    }
}

fn join(base: &str, relative: &str) -> String {
    if Path::new(relative).is_absolute() {
        return relative.to_string();
    }
    let relative = relative
        .strip_prefix('.')
        .and_then(|r| r.strip_prefix(SEPARATORS))
        .unwrap_or(relative);
    format!(
        "{}{}{}",
        base.trim_end_matches(SEPARATORS),
        DIR_SEPARATOR,
        relative
    )
}
