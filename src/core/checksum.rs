//! CRC-16/CCITT-FALSE over QRIS payload text.

const CRC_INIT: u32 = 0xFFFF;
const CRC_POLY: u32 = 0x1021;

/// Width of the rendered checksum, and of the trailing field it fills.
pub const CHECKSUM_LEN: usize = 4;

/// Raw 16-bit register after feeding every character of `text`.
///
/// Each character contributes its code point shifted into the high byte; payload
/// text is ASCII so this is the byte value.
pub fn crc16_ccitt(text: &str) -> u16 {
    let mut crc = CRC_INIT;
    for ch in text.chars() {
        crc ^= (ch as u32) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ CRC_POLY;
            } else {
                crc <<= 1;
            }
        }
        // 高位元不會影響低 16 位，保持暫存器小一點
        crc &= 0xFFFF;
    }
    (crc & 0xFFFF) as u16
}

/// Uppercase hex, always zero-padded to 4 characters.
pub fn format_checksum(value: u16) -> String {
    format!("{:04X}", value)
}

pub fn crc16(text: &str) -> String {
    format_checksum(crc16_ccitt(text))
}

/// True when the last 4 characters equal the checksum of everything before them.
pub fn verify(payload: &str) -> bool {
    let payload = payload.trim();
    if !payload.is_ascii() || payload.len() < CHECKSUM_LEN {
        return false;
    }
    let (body, trailer) = payload.split_at(payload.len() - CHECKSUM_LEN);
    crc16(body) == trailer
}
