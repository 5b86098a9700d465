use crate::domain::model::{LogoPlacement, QrSymbol};
use crate::utils::error::{QrisError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use std::io::Cursor;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);
const BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Rasterizes QR symbols and stamps the optional center logo.
#[derive(Debug, Clone, Copy)]
pub struct ImageComposer {
    filter: FilterType,
}

impl Default for ImageComposer {
    fn default() -> Self {
        // Triangle = bilinear
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl ImageComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Black/white raster of `symbol`, at least `width x height`.
    ///
    /// Modules are scaled by the largest whole factor that fits both dimensions
    /// and the symbol is centered on a white background. A symbol larger than
    /// the request is drawn at one pixel per module.
    pub fn rasterize(&self, symbol: &QrSymbol, width: u32, height: u32) -> GrayImage {
        let input = symbol.size() as u32;
        let out_width = width.max(input);
        let out_height = height.max(input);
        let multiple = (out_width / input).min(out_height / input);
        let left = (out_width - input * multiple) / 2;
        let top = (out_height - input * multiple) / 2;

        let mut img = GrayImage::from_pixel(out_width, out_height, LIGHT);
        for my in 0..input {
            for mx in 0..input {
                if !symbol.is_dark(mx as usize, my as usize) {
                    continue;
                }
                let px = left + mx * multiple;
                let py = top + my * multiple;
                for dy in 0..multiple {
                    for dx in 0..multiple {
                        img.put_pixel(px + dx, py + dy, DARK);
                    }
                }
            }
        }
        img
    }

    /// Rasterize, then overlay `logo` centered with a white border if one is given.
    pub fn compose(
        &self,
        symbol: &QrSymbol,
        width: u32,
        height: u32,
        logo: Option<&DynamicImage>,
    ) -> DynamicImage {
        let raster = self.rasterize(symbol, width, height);
        match logo {
            None => DynamicImage::ImageLuma8(raster),
            Some(logo) => DynamicImage::ImageRgba8(self.overlay_logo(raster, logo)),
        }
    }

    fn overlay_logo(&self, raster: GrayImage, logo: &DynamicImage) -> RgbaImage {
        let mut canvas = DynamicImage::ImageLuma8(raster).to_rgba8();
        let placement = LogoPlacement::fit(
            canvas.width(),
            canvas.height(),
            logo.width(),
            logo.height(),
        );

        if placement.is_empty() {
            tracing::warn!(
                canvas_width = canvas.width(),
                canvas_height = canvas.height(),
                "Canvas too small for a logo, skipping overlay"
            );
            return canvas;
        }

        tracing::debug!(?placement, "Placing logo");

        let logo = logo.to_rgba8();
        let scaled = if (logo.width(), logo.height()) == (placement.width, placement.height) {
            logo
        } else {
            imageops::resize(&logo, placement.width, placement.height, self.filter)
        };

        imageops::overlay(&mut canvas, &scaled, placement.x as i64, placement.y as i64);
        draw_border(&mut canvas, &placement);
        canvas
    }

    /// Encode as PNG into an in-memory buffer.
    pub fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| QrisError::ImageGeneration {
                message: e.to_string(),
            })?;
        Ok(buffer.into_inner())
    }
}

/// White stroke centered on the logo's edge: one pixel outside, one inside.
fn draw_border(canvas: &mut RgbaImage, placement: &LogoPlacement) {
    let stroke = LogoPlacement::BORDER_STROKE as i64;
    let half = stroke / 2;
    let left = placement.x as i64 - half;
    let top = placement.y as i64 - half;
    let right = (placement.x + placement.width) as i64 + half - 1;
    let bottom = (placement.y + placement.height) as i64 + half - 1;
    let (canvas_width, canvas_height) = (canvas.width() as i64, canvas.height() as i64);

    for y in top.max(0)..=bottom.min(canvas_height - 1) {
        for x in left.max(0)..=right.min(canvas_width - 1) {
            let on_stroke = x < left + stroke
                || x > right - stroke
                || y < top + stroke
                || y > bottom - stroke;
            if on_stroke {
                canvas.put_pixel(x as u32, y as u32, BORDER_COLOR);
            }
        }
    }
}
