use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction amount TLV field: tag `54`, 2-digit length, plain decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountField {
    amount: u64,
}

impl AmountField {
    pub const TAG: &'static str = "54";

    pub fn new(amount: u64) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn value(&self) -> String {
        self.amount.to_string()
    }
}

impl fmt::Display for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value();
        // u64 最多 20 位數，長度欄位固定兩位
        write!(f, "{}{:02}{}", Self::TAG, value.len(), value)
    }
}

/// Square module matrix of an encoded QR symbol, quiet zone included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    size: usize,
    modules: Vec<bool>,
}

impl QrSymbol {
    /// `modules` is row-major, `true` for dark. Returns `None` unless it holds `size * size` cells.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Option<Self> {
        if size == 0 || modules.len() != size * size {
            return None;
        }
        Some(Self { size, modules })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }
}

/// Where a logo lands on the composed raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl LogoPlacement {
    pub const BORDER_STROKE: u32 = 2;
    pub const BOX_DIVISOR: u32 = 5;

    /// Fit a `logo_width x logo_height` logo into a `canvas_width x canvas_height` raster.
    ///
    /// The logo may occupy at most one fifth of each canvas dimension. Oversized
    /// logos shrink uniformly by the smaller axis ratio; smaller ones keep their
    /// native size. The result is centered.
    pub fn fit(canvas_width: u32, canvas_height: u32, logo_width: u32, logo_height: u32) -> Self {
        let max_width = canvas_width / Self::BOX_DIVISOR;
        let max_height = canvas_height / Self::BOX_DIVISOR;

        let (mut width, mut height) = (logo_width, logo_height);
        if (width > max_width || height > max_height) && width > 0 && height > 0 {
            let ratio = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);
            width = (width as f32 * ratio).round() as u32;
            height = (height as f32 * ratio).round() as u32;
            // 極細長的 logo 不會被捨入成 0，除非框本身就是 0
            if max_width > 0 && max_height > 0 {
                width = width.max(1);
                height = height.max(1);
            }
        }

        Self {
            x: canvas_width.saturating_sub(width) / 2,
            y: canvas_height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A dynamic payload together with the values it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPayload {
    pub payload: String,
    pub amount: u64,
    pub checksum: String,
}

impl GeneratedPayload {
    pub fn new(payload: String, amount: u64) -> Self {
        let checksum = payload
            .get(payload.len().saturating_sub(4)..)
            .unwrap_or_default()
            .to_string();
        Self {
            payload,
            amount,
            checksum,
        }
    }
}
