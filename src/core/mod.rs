pub mod checksum;
pub mod composer;
pub mod encoder;
pub mod generator;
pub mod payload;

pub use crate::domain::model::{AmountField, GeneratedPayload, LogoPlacement, QrSymbol};
pub use crate::domain::ports::{LogoSource, Storage, SymbolEncoder};
pub use crate::utils::error::Result;
