use crate::domain::model::QrSymbol;
use crate::domain::ports::SymbolEncoder;
use crate::utils::error::{QrisError, Result};
use qrcode::{Color, EcLevel, QrCode};

/// QR encoder backed by the `qrcode` crate.
///
/// Defaults to level H (about 30% recoverable) and a one-module quiet zone, since
/// the logo hides the middle of the symbol.
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    ec_level: EcLevel,
    margin: usize,
}

impl QrEncoder {
    pub const DEFAULT_MARGIN: usize = 1;

    pub fn new(ec_level: EcLevel, margin: usize) -> Self {
        Self { ec_level, margin }
    }

    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    pub fn margin(&self) -> usize {
        self.margin
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(EcLevel::H, Self::DEFAULT_MARGIN)
    }
}

impl SymbolEncoder for QrEncoder {
    fn encode(&self, text: &str, width: u32, height: u32) -> Result<QrSymbol> {
        if width == 0 || height == 0 {
            return Err(QrisError::Encoding {
                message: format!("requested dimensions {}x{} must be positive", width, height),
            });
        }

        let code = QrCode::with_error_correction_level(text.as_bytes(), self.ec_level).map_err(
            |e| QrisError::Encoding {
                message: e.to_string(),
            },
        )?;

        let inner = code.width();
        let size = inner + 2 * self.margin;
        let colors = code.to_colors();

        let mut modules = vec![false; size * size];
        for (i, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let x = i % inner + self.margin;
                let y = i / inner + self.margin;
                modules[y * size + x] = true;
            }
        }

        tracing::debug!(
            version_width = inner,
            size,
            ec_level = ?self.ec_level,
            "Encoded QR symbol"
        );

        QrSymbol::from_modules(size, modules).ok_or_else(|| QrisError::Encoding {
            message: "encoder produced an empty symbol".to_string(),
        })
    }
}
