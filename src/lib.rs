//! # Launch descriptor
//!
//! Loads deployment descriptors for an external process supervisor and resolves them against a
//! snapshot of the ambient environment: working directories anchored to the home directory,
//! literal environment overrides merged over the inherited environment and unit-local
//! executable directories prepended to `PATH`.
pub mod cli;
pub mod defaults;
pub mod descriptor;
pub mod environment;
pub mod evaluator;
pub mod logging;
pub mod store;
pub mod utils;
