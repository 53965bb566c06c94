//! Authoring side of a deployment descriptor: the schema read from disk and its validation.
pub mod app_name;
pub mod definition;
pub mod error;
pub mod interpreter;
pub mod loader;
