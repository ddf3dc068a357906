//! Persisted cart snapshot format.
//!
//! A snapshot is a JSON array of line items with snake_case field names:
//!
//! ```json
//! [{"id":"p1","title":"Shirt","image_url":"https://…","price":19.99,"quantity":2}]
//! ```
//!
//! Decoding rejects anything that would violate the cart's invariants:
//! zero quantities and duplicate product IDs.

use std::collections::HashSet;

use go_marketplace_core::{LineItem, ProductId};
use thiserror::Error;

/// Errors that can occur when decoding a stored snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot is not a valid JSON array of line items.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two lines share a product ID.
    #[error("duplicate product in snapshot: {0}")]
    DuplicateId(ProductId),
}

/// Serialize cart lines for storage.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn encode(lines: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Parse and validate a stored snapshot, preserving line order.
///
/// # Errors
///
/// Returns `SnapshotError` if the JSON is malformed, a line has a zero
/// quantity or a missing field, or a product ID appears twice.
pub fn decode(raw: &str) -> Result<Vec<LineItem>, SnapshotError> {
    let lines: Vec<LineItem> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(lines.len());
    if let Some(duplicate) = lines.iter().find(|line| !seen.insert(&line.id)) {
        return Err(SnapshotError::DuplicateId(duplicate.id.clone()));
    }

    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use go_marketplace_core::{Price, Quantity};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_decode_preserves_order_and_fields() {
        let raw = r#"[
            {"id":"p2","title":"Mug","image_url":"https://cdn/p2.png","price":8.5,"quantity":1},
            {"id":"p1","title":"Shirt","image_url":"https://cdn/p1.png","price":19.99,"quantity":3}
        ]"#;

        let lines = decode(raw).unwrap();
        assert_eq!(lines.len(), 2);

        let ids: Vec<&str> = lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);

        let shirt = lines.get(1).unwrap();
        assert_eq!(shirt.title, "Shirt");
        assert_eq!(shirt.image_url, "https://cdn/p1.png");
        assert_eq!(shirt.price, Price::new(dec!(19.99)));
        assert_eq!(shirt.quantity, Quantity::new(3).unwrap());
    }

    #[test]
    fn test_encode_then_decode_matches() {
        let lines = decode(
            r#"[{"id":"p1","title":"T","image_url":"u","price":10,"quantity":2}]"#,
        )
        .unwrap();

        let reencoded = encode(&lines).unwrap();
        assert_eq!(decode(&reencoded).unwrap(), lines);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(decode("[]").unwrap().is_empty());
        assert_eq!(encode(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(decode("{not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(decode("{}"), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let raw = r#"[{"id":"p1","title":"T","image_url":"u","price":10,"quantity":0}]"#;
        assert!(matches!(decode(raw), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_rejects_missing_field() {
        let raw = r#"[{"id":"p1","title":"T","price":10,"quantity":1}]"#;
        assert!(matches!(decode(raw), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_rejects_camel_case_image_field() {
        let raw = r#"[{"id":"p1","title":"T","imageUrl":"u","price":10,"quantity":1}]"#;
        assert!(decode(raw).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":"p1","title":"T","image_url":"u","price":10,"quantity":1},
            {"id":"p1","title":"T","image_url":"u","price":10,"quantity":2}
        ]"#;
        let err = decode(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateId(ref id) if id.as_str() == "p1"));
    }
}
