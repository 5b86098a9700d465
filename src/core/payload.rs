//! Static-to-dynamic rewrite of a QRIS payload.

use crate::core::checksum::{crc16, CHECKSUM_LEN};
use crate::domain::model::AmountField;
use crate::utils::error::{QrisError, Result};

/// Point of initiation method, reusable QR.
pub const STATIC_POI: &str = "010211";
/// Point of initiation method, single transaction with amount.
pub const DYNAMIC_POI: &str = "010212";
/// Country code field. The amount field goes directly in front of it.
pub const COUNTRY_ANCHOR: &str = "5802ID";

#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadMutator;

impl PayloadMutator {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite `payload` into a dynamic payload carrying `amount` and a fresh CRC.
    ///
    /// The trailing 4 characters are dropped as the old checksum without being
    /// checked. Fails with `MalformedPayload` if the payload is not ASCII, is
    /// shorter than a checksum, or does not contain `5802ID` exactly once.
    pub fn mutate(&self, payload: &str, amount: u64) -> Result<String> {
        let trimmed = payload.trim();

        if !trimmed.is_ascii() {
            return Err(QrisError::malformed("payload contains non-ASCII characters"));
        }
        if trimmed.len() < CHECKSUM_LEN {
            return Err(QrisError::malformed(format!(
                "payload has {} characters, need at least {} for the checksum",
                trimmed.len(),
                CHECKSUM_LEN
            )));
        }

        let body = &trimmed[..trimmed.len() - CHECKSUM_LEN];

        let body = if body.contains(STATIC_POI) {
            body.replacen(STATIC_POI, DYNAMIC_POI, 1)
        } else {
            tracing::warn!("Static point of initiation marker {} not found", STATIC_POI);
            body.to_string()
        };

        let anchor_count = body.matches(COUNTRY_ANCHOR).count();
        if anchor_count != 1 {
            return Err(QrisError::malformed(format!(
                "expected exactly one {} country field, found {}",
                COUNTRY_ANCHOR, anchor_count
            )));
        }
        // 上面已確認恰好一次
        let split_at = body.find(COUNTRY_ANCHOR).unwrap_or(body.len());
        let (prefix, suffix) = body.split_at(split_at);

        let amount_field = AmountField::new(amount);
        let mut dynamic = format!("{}{}{}", prefix.trim(), amount_field, suffix);
        let checksum = crc16(&dynamic);
        dynamic.push_str(&checksum);

        tracing::debug!(
            amount,
            checksum = %checksum,
            length = dynamic.len(),
            "Built dynamic payload"
        );

        Ok(dynamic)
    }
}

/// Shorthand for [`PayloadMutator::mutate`].
pub fn mutate(payload: &str, amount: u64) -> Result<String> {
    PayloadMutator::new().mutate(payload, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checksum;

    const STATIC_PAYLOAD: &str = "00020101021126660014ID.CO.QRIS.WWW01189360091500000000010215ID10200000000010303UMI5204581253033605802ID5912WARUNG MAKAN6007JAKARTA6105101106304E5F8";

    #[test]
    fn test_mutate_known_amount() {
        let dynamic = mutate(STATIC_PAYLOAD, 10000).unwrap();
        assert_eq!(
            dynamic,
            "00020101021226660014ID.CO.QRIS.WWW01189360091500000000010215ID10200000000010303UMI5204581253033605405100005802ID5912WARUNG MAKAN6007JAKARTA6105101106304C479"
        );
    }

    #[test]
    fn test_mutate_zero_amount_pads_checksum() {
        let dynamic = mutate(STATIC_PAYLOAD, 0).unwrap();
        assert!(dynamic.contains("540105802ID"));
        assert!(dynamic.ends_with("0382"));
    }

    #[test]
    fn test_marker_switched_to_dynamic() {
        let dynamic = mutate(STATIC_PAYLOAD, 1500000).unwrap();
        assert!(dynamic.contains(DYNAMIC_POI));
        assert!(!dynamic.contains(STATIC_POI));
        assert!(dynamic.contains("540715000005802ID"));
    }

    #[test]
    fn test_only_first_static_marker_switched() {
        let payload = STATIC_PAYLOAD.replace("5912WARUNG MAKAN", "5912WARUNG010211");
        assert_eq!(payload.matches(STATIC_POI).count(), 2);

        let dynamic = mutate(&payload, 10000).unwrap();
        assert!(dynamic.starts_with("000201010212"));
        assert!(dynamic.contains("5912WARUNG010211"));
        assert_eq!(dynamic.matches(STATIC_POI).count(), 1);
        assert_eq!(dynamic.matches(DYNAMIC_POI).count(), 1);
        assert!(checksum::verify(&dynamic));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let padded = format!("\n  {}  \t", STATIC_PAYLOAD);
        assert_eq!(
            mutate(&padded, 25000).unwrap(),
            mutate(STATIC_PAYLOAD, 25000).unwrap()
        );
    }

    #[test]
    fn test_checksum_is_self_consistent() {
        for amount in [0u64, 1, 99, 100, 15_000, 987_654_321, u64::MAX] {
            let dynamic = mutate(STATIC_PAYLOAD, amount).unwrap();
            assert!(checksum::verify(&dynamic), "bad checksum for {amount}");
        }
    }

    #[test]
    fn test_missing_static_marker_is_tolerated() {
        let already_dynamic = STATIC_PAYLOAD.replacen(STATIC_POI, DYNAMIC_POI, 1);
        let dynamic = mutate(&already_dynamic, 500).unwrap();
        assert!(dynamic.contains("54035005802ID"));
        assert!(checksum::verify(&dynamic));
    }

    #[test]
    fn test_old_checksum_not_validated() {
        let wrong_crc = STATIC_PAYLOAD.replace("E5F8", "zzzz");
        assert_eq!(
            mutate(&wrong_crc, 10000).unwrap(),
            mutate(STATIC_PAYLOAD, 10000).unwrap()
        );
    }

    #[test]
    fn test_missing_anchor_rejected() {
        let no_anchor = STATIC_PAYLOAD.replace("5802ID", "5802MY");
        let err = mutate(&no_anchor, 100).unwrap_err();
        assert!(matches!(err, QrisError::MalformedPayload { .. }));
        assert!(err.to_string().contains("found 0"));
    }

    #[test]
    fn test_duplicate_anchor_rejected() {
        let doubled = STATIC_PAYLOAD.replace("5912WARUNG MAKAN", "5912WARUNG5802ID");
        let err = mutate(&doubled, 100).unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_short_payload_rejected() {
        assert!(matches!(
            mutate("abc", 1),
            Err(QrisError::MalformedPayload { .. })
        ));
        assert!(matches!(
            mutate("   ", 1),
            Err(QrisError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_non_ascii_rejected() {
        let accented = STATIC_PAYLOAD.replace("WARUNG MAKAN", "WARUNG MAKÁN");
        assert!(matches!(
            mutate(&accented, 1),
            Err(QrisError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_anchor_inside_stripped_checksum_does_not_count() {
        // 第二個 5802ID 跨在舊 CRC 上，截掉後只剩一個
        let payload = "0102115802ID5802ID";
        let dynamic = mutate(payload, 5).unwrap();
        assert!(dynamic.starts_with("010212540155802ID58"));
        assert_eq!(dynamic.len(), "010212540155802ID58".len() + 4);
        assert!(checksum::verify(&dynamic));
    }
}
