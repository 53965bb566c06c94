use crate::descriptor::definition::DescriptorDefinition;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::loader::DescriptorLoader;
use crate::environment::AmbientEnvironment;
use crate::evaluator::error::EvaluationError;
use crate::evaluator::evaluate;
use crate::evaluator::resolved::DescriptorSet;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not load descriptor: `{0}`")]
    Load(#[from] DescriptorError),

    #[error("could not evaluate descriptor: `{0}`")]
    Evaluation(#[from] EvaluationError),
}

/// Keeps the last successfully evaluated [`DescriptorSet`].
///
/// A reload builds a whole new set and swaps it in only when loading and evaluation both
/// succeed, so readers either see the previous set or the new one, never a partial result.
pub struct DescriptorStore<L: DescriptorLoader> {
    loader: L,
    current: RwLock<Option<Arc<DescriptorSet>>>,
}

impl<L: DescriptorLoader> DescriptorStore<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            current: RwLock::new(None),
        }
    }

    /// Loads and evaluates the descriptor, replacing the current set on success.
    ///
    /// On failure the current set, if any, is kept.
    pub fn reload(&self, ambient: &AmbientEnvironment) -> Result<Arc<DescriptorSet>, StoreError> {
        let definition = self
            .loader
            .load()
            .inspect_err(|err| warn!("descriptor reload failed, keeping the previous one: {}", err))?;
        self.apply(&definition, ambient)
    }

    /// Evaluates an already loaded definition, replacing the current set on success.
    pub fn apply(
        &self,
        definition: &DescriptorDefinition,
        ambient: &AmbientEnvironment,
    ) -> Result<Arc<DescriptorSet>, StoreError> {
        let evaluated = evaluate(definition, ambient).inspect_err(|err| {
            warn!("descriptor evaluation failed, keeping the previous one: {}", err)
        })?;

        let evaluated = Arc::new(evaluated);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(evaluated.clone());
        info!("descriptor loaded with {} app units", evaluated.len());

        Ok(evaluated)
    }

    pub fn current(&self) -> Option<Arc<DescriptorSet>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
