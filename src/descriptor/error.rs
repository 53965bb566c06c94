use super::app_name::AppName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("error loading descriptor: `{0}`")]
    IOError(#[from] std::io::Error),

    #[error("descriptor is not valid YAML: `{0}`")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("app name `{0}` is declared more than once")]
    DuplicateAppName(AppName),
}
