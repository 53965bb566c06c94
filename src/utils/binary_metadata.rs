pub(crate) const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");
pub(crate) const VERSION: &str = konst::option::unwrap_or!(
    option_env!("LAUNCH_DESCRIPTOR_VERSION"),
    crate::defaults::LAUNCH_DESCRIPTOR_VERSION
);
pub(crate) const GIT_COMMIT: &str =
    konst::option::unwrap_or!(option_env!("GIT_COMMIT"), "development");

pub fn binary_metadata() -> String {
    format!("Launch Descriptor Version: {VERSION}, Rust Version: {RUST_VERSION}, GitCommit: {GIT_COMMIT}")
}
