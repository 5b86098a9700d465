pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::adapters::{FileLogo, MemoryLogo, NoLogo};
pub use crate::core::checksum::{crc16, verify};
pub use crate::core::composer::ImageComposer;
pub use crate::core::encoder::QrEncoder;
pub use crate::core::generator::QrGenerator;
pub use crate::core::payload::{mutate, PayloadMutator};
pub use crate::utils::error::{QrisError, Result};
