pub const LAUNCH_DESCRIPTOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Descriptor file read when no `--config` is given.
pub const DEFAULT_DESCRIPTOR_PATH: &str = "ecosystem.yaml";

/// Interpreter used for `Auto` scripts whose extension is not recognised.
pub const DEFAULT_INTERPRETER: &str = "node";

pub const PATH_ENV_VAR: &str = "PATH";
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        pub const HOME_ENV_VAR: &str = "USERPROFILE";
        pub const PATH_SEPARATOR: char = ';';
        pub const DIR_SEPARATOR: char = '\\';
    } else {
        pub const HOME_ENV_VAR: &str = "HOME";
        pub const PATH_SEPARATOR: char = ':';
        pub const DIR_SEPARATOR: char = '/';
    }
}
