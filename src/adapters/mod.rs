// Adapters layer: concrete implementations of the domain ports.

pub mod logo;

pub use logo::{FileLogo, MemoryLogo, NoLogo, DEFAULT_LOGO_PATH};
