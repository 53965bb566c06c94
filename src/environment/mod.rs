pub mod path;

use crate::defaults::{HOME_ENV_VAR, PATH_ENV_VAR};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Read-only snapshot of the environment visible to the process evaluating a descriptor.
///
/// The evaluator never reads the process environment itself: callers take a snapshot with
/// [`AmbientEnvironment::from_process`] (or build one by hand in tests) and pass it explicitly,
/// so an evaluation is a pure function of the descriptor and this value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AmbientEnvironment(BTreeMap<String, String>);

impl AmbientEnvironment {
    /// Captures the current process environment.
    ///
    /// Variables whose key or value are not valid unicode are skipped, since they could not be
    /// represented in the resolved descriptor anyway.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (Err(k), _) | (_, Err(k)) => {
                    debug!("skipping non unicode environment variable {:?}", k);
                    None
                }
            })
            .collect();
        Self(vars)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the value only when the variable is set to something other than an empty string.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn home(&self) -> Option<&str> {
        self.non_empty(HOME_ENV_VAR)
    }

    /// Ambient `PATH`. Absent and empty are equivalent.
    pub fn path(&self) -> &str {
        self.get(PATH_ENV_VAR).unwrap_or_default()
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AmbientEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AmbientEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}
