use super::definition::DescriptorDefinition;
use super::error::DescriptorError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads the authoring form of a descriptor and validates it at the schema boundary.
#[cfg_attr(test, mockall::automock)]
pub trait DescriptorLoader {
    fn load(&self) -> Result<DescriptorDefinition, DescriptorError>;
}

pub struct DescriptorLoaderFile {
    path: PathBuf,
}

impl DescriptorLoader for DescriptorLoaderFile {
    fn load(&self) -> Result<DescriptorDefinition, DescriptorError> {
        debug!("loading descriptor from {}", self.path.to_string_lossy());
        let file = std::fs::File::open(&self.path)?;
        let descriptor: DescriptorDefinition = serde_yaml::from_reader(file)?;
        validate(&descriptor)?;
        Ok(descriptor)
    }
}

impl DescriptorLoaderFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Checks what the schema alone cannot express.
pub fn validate(descriptor: &DescriptorDefinition) -> Result<(), DescriptorError> {
    let mut seen = BTreeSet::new();
    descriptor.apps.iter().try_for_each(|app| {
        if seen.insert(&app.name) {
            Ok(())
        } else {
            Err(DescriptorError::DuplicateAppName(app.name.clone()))
        }
    })
}
