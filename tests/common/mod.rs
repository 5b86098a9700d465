#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Static QRIS payload with a valid CRC (E5F8).
pub const STATIC_PAYLOAD: &str = "00020101021126660014ID.CO.QRIS.WWW01189360091500000000010215ID10200000000010303UMI5204581253033605802ID5912WARUNG MAKAN6007JAKARTA6105101106304E5F8";

/// `STATIC_PAYLOAD` after injecting amount 10000.
pub const DYNAMIC_10000: &str = "00020101021226660014ID.CO.QRIS.WWW01189360091500000000010215ID10200000000010303UMI5204581253033605405100005802ID5912WARUNG MAKAN6007JAKARTA6105101106304C479";

pub fn write_logo(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(&path)
        .unwrap();
    path
}
