use crate::domain::model::QrSymbol;
use crate::utils::error::Result;
use image::DynamicImage;

/// Turns text into a QR module matrix. Implementations fix their own
/// error-correction strength and quiet margin.
pub trait SymbolEncoder: Send + Sync {
    fn encode(&self, text: &str, width: u32, height: u32) -> Result<QrSymbol>;
}

/// Source of the optional overlay logo. `Ok(None)` means "render without a logo".
pub trait LogoSource: Send + Sync {
    fn load(&self) -> Result<Option<DynamicImage>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
