pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    char_range::CharRange, engine::RangeEngine, int_range::IntRange, BuiltRange, OutputFormat,
    RangeKind, RangeSpec,
};
pub use utils::error::{RangeError, Result};
