// SPDX-License-Identifier: MPL-2.0
//! Detection records produced by the analysis provider.

mod object_type;

pub use object_type::{ObjectStyle, ObjectType, Rgb, DEFAULT_STYLE};

use serde::{Deserialize, Serialize};

/// Bounding box in normalized frame coordinates.
///
/// Each component is a fraction of the frame size. `x + width` and
/// `y + height` are not guaranteed to stay within `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns true if the box extends past the frame.
    #[must_use]
    pub fn overflows_frame(&self) -> bool {
        self.x < 0.0 || self.y < 0.0 || self.right() > 1.0 || self.bottom() > 1.0
    }
}

/// A single identified object in a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Unique within the owning video's detection set.
    pub id: String,
    pub object_type: ObjectType,
    /// Seconds from the start of the video.
    pub timestamp: f64,
    pub bounding_box: BoundingBox,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub description: String,
    /// Ids of related detections. Back-references only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_detections: Option<Vec<String>>,
}

impl Detection {
    /// Creates a detection without related ids.
    pub fn new(
        id: impl Into<String>,
        object_type: ObjectType,
        timestamp: f64,
        bounding_box: BoundingBox,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            object_type,
            timestamp,
            bounding_box,
            confidence,
            description: description.into(),
            related_detections: None,
        }
    }

    /// Returns true if the timestamp lies within `[0, duration]`.
    #[must_use]
    pub fn is_within(&self, duration_secs: f64) -> bool {
        self.timestamp >= 0.0 && self.timestamp <= duration_secs
    }

    /// Confidence as a whole percentage, rounded.
    #[must_use]
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Detection {
        Detection::new(
            "gun-1",
            ObjectType::Gun,
            12.5,
            BoundingBox::new(0.1, 0.2, 0.3, 0.4),
            0.874,
            "Black pistol held in right hand",
        )
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["objectType"], "gun");
        assert_eq!(json["boundingBox"]["width"], 0.3);
        assert!(json.get("relatedDetections").is_none());
    }

    #[test]
    fn related_detections_round_trip_when_present() {
        let mut detection = sample();
        detection.related_detections = Some(vec!["person-2".into()]);
        let json = serde_json::to_string(&detection).unwrap();
        assert!(json.contains("relatedDetections"));
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, detection);
    }

    #[test]
    fn is_within_checks_both_bounds() {
        let detection = sample();
        assert!(detection.is_within(12.5));
        assert!(detection.is_within(60.0));
        assert!(!detection.is_within(10.0));
    }

    #[test]
    fn confidence_percent_rounds() {
        assert_eq!(sample().confidence_percent(), 87);
    }

    #[test]
    fn overflow_detection() {
        assert!(!BoundingBox::new(0.1, 0.1, 0.5, 0.5).overflows_frame());
        assert!(BoundingBox::new(0.8, 0.1, 0.4, 0.2).overflows_frame());
    }
}
