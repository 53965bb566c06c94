mod one_shot_operation;

use crate::defaults::DEFAULT_DESCRIPTOR_PATH;
use crate::descriptor::definition::DescriptorDefinition;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::loader::{DescriptorLoader, DescriptorLoaderFile};
use crate::environment::AmbientEnvironment;
use crate::evaluator::resolved::DescriptorSet;
use crate::logging::config::LoggingError;
use crate::store::{DescriptorStore, StoreError};
use crate::utils::binary_metadata::binary_metadata;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

pub use one_shot_operation::OneShotOperation;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read descriptor from {path}: `{source}`")]
    ConfigRead {
        path: String,
        source: DescriptorError,
    },
    #[error("Could not initialize logging: `{0}`")]
    LoggingInit(#[from] LoggingError),
    #[error("Could not resolve descriptor: `{0}`")]
    Resolve(#[from] StoreError),
    #[error("app `{0}` is not declared in the descriptor")]
    UnknownApp(String),
    #[error("Could not serialize output: `{0}`")]
    SerializeYaml(#[from] serde_yaml::Error),
    #[error("Could not serialize output: `{0}`")]
    SerializeJson(#[from] serde_json::Error),
    #[error("Could not write output: `{0}`")]
    Output(#[from] std::io::Error),
}

/// What action was requested from the CLI?
pub enum CliCommand {
    /// Resolve the descriptor and print it.
    Render(RenderConfig),
    /// Do an "one-shot" operation and exit successfully.
    Quit(OneShotOperation),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, about, long_about = None)] // Read from `Cargo.toml`
pub struct Cli {
    /// Deployment descriptor to evaluate.
    #[arg(short, long, default_value_t = String::from(DEFAULT_DESCRIPTOR_PATH))]
    config: String,

    /// Only print the app unit with this name.
    #[arg(short, long)]
    app: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Print the command line the supervisor would run for each app unit.
    #[arg(long)]
    commands: bool,

    #[arg(long)]
    print_debug_info: bool,

    #[arg(long)]
    version: bool,
}

/// Everything needed to resolve and print a descriptor.
pub struct RenderConfig {
    store: DescriptorStore<DescriptorLoaderFile>,
    descriptor: DescriptorDefinition,
    app: Option<String>,
    output: OutputFormat,
    commands: bool,
}

impl Cli {
    /// Parses command line arguments and decides how the application runs
    pub fn init() -> Result<CliCommand, CliError> {
        Self::parse().into_command()
    }

    fn into_command(self) -> Result<CliCommand, CliError> {
        if self.version {
            return Ok(CliCommand::Quit(OneShotOperation::PrintVersion));
        }
        if self.print_debug_info {
            return Ok(CliCommand::Quit(OneShotOperation::PrintDebugInfo(self)));
        }

        let loader = DescriptorLoaderFile::new(&self.get_config_path());
        let descriptor = loader.load().map_err(|source| CliError::ConfigRead {
            path: loader.path().to_string_lossy().to_string(),
            source,
        })?;

        descriptor.log.try_init()?;
        info!("{}", binary_metadata());
        info!(
            "Evaluating descriptor '{}'",
            loader.path().to_string_lossy()
        );

        Ok(CliCommand::Render(RenderConfig {
            store: DescriptorStore::new(loader),
            descriptor,
            app: self.app,
            output: self.output,
            commands: self.commands,
        }))
    }

    fn get_config_path(&self) -> PathBuf {
        PathBuf::from(&self.config)
    }
}

impl RenderConfig {
    /// Evaluates the descriptor read at startup against the current process environment and
    /// writes the result.
    pub fn run<W: Write>(self, out: &mut W) -> Result<(), CliError> {
        self.run_with(&AmbientEnvironment::from_process(), out)
    }

    fn run_with<W: Write>(
        self,
        ambient: &AmbientEnvironment,
        out: &mut W,
    ) -> Result<(), CliError> {
        let set = self.store.apply(&self.descriptor, ambient)?;
        render(&set, self.app.as_deref(), self.output, self.commands, out)
    }
}

fn render<W: Write>(
    set: &DescriptorSet,
    app: Option<&str>,
    output: OutputFormat,
    commands: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let selected = match app {
        Some(name) => vec![set
            .get(name)
            .ok_or_else(|| CliError::UnknownApp(name.to_string()))?],
        None => set.apps().iter().collect(),
    };

    if commands {
        return selected
            .iter()
            .try_for_each(|unit| writeln!(out, "{}: {}", unit.name(), unit.launch_command()))
            .map_err(CliError::from);
    }

    match (output, app) {
        (OutputFormat::Yaml, Some(_)) => serde_yaml::to_writer(&mut *out, selected[0])?,
        (OutputFormat::Yaml, None) => serde_yaml::to_writer(&mut *out, set)?,
        (OutputFormat::Json, Some(_)) => {
            serde_json::to_writer_pretty(&mut *out, selected[0])?;
            writeln!(out)?;
        }
        (OutputFormat::Json, None) => {
            serde_json::to_writer_pretty(&mut *out, set)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
