use crate::adapters::logo::FileLogo;
use crate::core::composer::ImageComposer;
use crate::core::encoder::QrEncoder;
use crate::core::payload::PayloadMutator;
use crate::domain::model::GeneratedPayload;
use crate::domain::ports::{LogoSource, SymbolEncoder};
use crate::utils::error::{QrisError, Result};
use crate::utils::validation::validate_dimension;
use image::DynamicImage;

/// Entry point: static payload + amount in, dynamic payload or PNG out.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
pub struct QrGenerator<E: SymbolEncoder = QrEncoder, L: LogoSource = FileLogo> {
    mutator: PayloadMutator,
    encoder: E,
    composer: ImageComposer,
    logo: L,
}

impl QrGenerator {
    /// Level-H encoder and the logo at `logo/qris.png` if present.
    pub fn with_defaults() -> Self {
        Self::new(QrEncoder::default(), FileLogo::default())
    }
}

impl<E: SymbolEncoder, L: LogoSource> QrGenerator<E, L> {
    pub fn new(encoder: E, logo: L) -> Self {
        Self {
            mutator: PayloadMutator::new(),
            encoder,
            composer: ImageComposer::new(),
            logo,
        }
    }

    pub fn generate_qr(&self, base_qr: &str, amount: u64) -> Result<String> {
        self.mutator.mutate(base_qr, amount)
    }

    pub fn generate_payload(&self, base_qr: &str, amount: u64) -> Result<GeneratedPayload> {
        let payload = self.generate_qr(base_qr, amount)?;
        Ok(GeneratedPayload::new(payload, amount))
    }

    /// PNG bytes of the dynamic payload.
    ///
    /// `width` and `height` must lie in `1..=MAX_DIMENSION` (4096). Size, encoding,
    /// logo and PNG failures all surface as `ImageGeneration`; a structurally
    /// broken base payload stays `MalformedPayload`.
    pub fn generate_qr_image(
        &self,
        base_qr: &str,
        amount: u64,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let payload = self.generate_qr(base_qr, amount)?;
        let image = self
            .render(&payload, width, height)
            .map_err(QrisError::into_image_generation)?;
        let png = self
            .composer
            .encode_png(&image)
            .map_err(QrisError::into_image_generation)?;

        tracing::info!(
            amount,
            width = image.width(),
            height = image.height(),
            bytes = png.len(),
            "Generated QRIS image"
        );
        Ok(png)
    }

    /// Encode and compose `payload` as-is, without mutating it.
    pub fn render(&self, payload: &str, width: u32, height: u32) -> Result<DynamicImage> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;
        let symbol = self.encoder.encode(payload, width, height)?;
        let logo = self.logo.load()?;
        Ok(self.composer.compose(&symbol, width, height, logo.as_ref()))
    }
}
