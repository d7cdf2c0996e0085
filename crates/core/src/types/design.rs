//! Design-studio schema types.
//!
//! Blank products carry one or more mockup views (front, back, sleeve),
//! each with named print zones; a design order records the layers a
//! customer placed in those zones, with per-layer transform state.
//!
//! These are data at rest. There is no rendering, collision, or z-order
//! engine here - the canvas editor that manipulates this state lives
//! client-side, outside this workspace.

use serde::{Deserialize, Serialize};

/// A printable region on a mockup view.
///
/// Coordinates and dimensions are normalized to the view image
/// (0.0 = left/top edge, 1.0 = right/bottom edge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintZone {
    /// Zone name, unique within its view (e.g. "chest", "full-back").
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One mockup view of a blank product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupView {
    /// View name, unique within the blank (e.g. "front", "back").
    pub name: String,
    /// Mockup image reference (opaque; resolution is the asset layer's job).
    pub image_ref: String,
    pub zones: Vec<PrintZone>,
}

/// Position, scale, and rotation of a placed layer within its zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerTransform {
    /// Offset from the zone origin, normalized to the zone.
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Stacking order within the zone; higher draws on top.
    pub z_index: i32,
}

/// The content of a placed layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LayerContent {
    Text {
        text: String,
        font_family: String,
        font_size_px: f64,
        color_hex: String,
    },
    Image {
        /// Uploaded artwork reference (opaque).
        image_ref: String,
    },
}

/// A single layer placed by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignLayer {
    /// Name of the mockup view this layer sits on.
    pub view: String,
    /// Name of the print zone within that view.
    pub zone: String,
    #[serde(flatten)]
    pub content: LayerContent,
    pub transform: LayerTransform,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_serde_tagged() {
        let layer = DesignLayer {
            view: "front".to_string(),
            zone: "chest".to_string(),
            content: LayerContent::Text {
                text: "CASABLANCA".to_string(),
                font_family: "Inter".to_string(),
                font_size_px: 48.0,
                color_hex: "#1a1a1a".to_string(),
            },
            transform: LayerTransform {
                x: 0.25,
                y: 0.1,
                scale: 1.0,
                rotation: 0.0,
                z_index: 2,
            },
        };

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["zone"], "chest");
        assert_eq!(json["fontFamily"], "Inter");
        assert_eq!(json["transform"]["zIndex"], 2);

        let back: DesignLayer = serde_json::from_value(json).unwrap();
        assert_eq!(back, layer);
    }

    #[test]
    fn test_image_layer_roundtrip() {
        let json = serde_json::json!({
            "view": "back",
            "zone": "full-back",
            "kind": "image",
            "imageRef": "uploads/artwork-91.png",
            "transform": {"x": 0.0, "y": 0.0, "scale": 0.8, "rotation": 12.5, "zIndex": 1}
        });
        let layer: DesignLayer = serde_json::from_value(json).unwrap();
        assert!(matches!(layer.content, LayerContent::Image { .. }));
        assert!((layer.transform.rotation - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mockup_view_shape() {
        let view = MockupView {
            name: "front".to_string(),
            image_ref: "mockups/tee-front.webp".to_string(),
            zones: vec![PrintZone {
                name: "chest".to_string(),
                x: 0.3,
                y: 0.2,
                width: 0.4,
                height: 0.35,
            }],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["zones"][0]["name"], "chest");
        assert_eq!(json["imageRef"], "mockups/tee-front.webp");
    }
}
