//! Gallery block definitions.
//!
//! A gallery holds an ordered list of typed blocks serialized as JSON.
//! There is currently a single block type, an image reference, but the
//! tagged representation leaves room for more.

use serde::{Deserialize, Serialize};

/// One entry in a gallery page's image list.
///
/// Wire format: `{"type": "image", "value": <image id>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum GalleryBlock {
    /// Reference to a stored image asset by id.
    Image(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_block_wire_format() {
        let block = GalleryBlock::Image(42);
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"image","value":42}"#);
    }

    #[test]
    fn test_image_block_roundtrip() {
        let blocks = vec![GalleryBlock::Image(1), GalleryBlock::Image(7)];
        let json = serde_json::to_string(&blocks).unwrap();
        let back: Vec<GalleryBlock> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blocks);
    }

    #[test]
    fn test_empty_block_list_roundtrip() {
        let blocks: Vec<GalleryBlock> = Vec::new();
        let json = serde_json::to_string(&blocks).unwrap();
        assert_eq!(json, "[]");
        let back: Vec<GalleryBlock> = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_unknown_block_type_rejected() {
        let result: Result<GalleryBlock, _> =
            serde_json::from_str(r#"{"type":"video","value":1}"#);
        assert!(result.is_err());
    }
}
