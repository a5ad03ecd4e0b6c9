// SPDX-License-Identifier: MPL-2.0
//! Detection data export.
//!
//! Writes the current video's detections as pretty-printed JSON next to
//! other exports, named after the video title.

use crate::domain::detection::Detection;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

const EXPORT_SUFFIX: &str = "_detections.json";

/// Serializes detections as an indented JSON array.
pub fn to_json(detections: &[Detection]) -> Result<String> {
    Ok(serde_json::to_string_pretty(detections)?)
}

/// File name for a title: runs of whitespace become one underscore.
///
/// `"Parking Lot  Cam"` gives `"Parking_Lot_Cam_detections.json"`.
#[must_use]
pub fn export_file_name(title: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}{EXPORT_SUFFIX}")
}

/// Writes `detections` to `dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn download_detection_data(
    detections: &[Detection],
    title: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let json = to_json(detections)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(title));
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), count = detections.len(), "detections exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::{BoundingBox, ObjectType};
    use tempfile::tempdir;

    fn gun() -> Detection {
        Detection::new(
            "det-1",
            ObjectType::Gun,
            3.5,
            BoundingBox::new(0.1, 0.2, 0.3, 0.4),
            0.87,
            "Handgun near the entrance",
        )
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(
            export_file_name("Parking Lot  Cam"),
            "Parking_Lot_Cam_detections.json"
        );
        assert_eq!(export_file_name("lobby"), "lobby_detections.json");
        assert_eq!(export_file_name("a\tb\nc"), "a_b_c_detections.json");
    }

    #[test]
    fn json_uses_wire_field_names() {
        let json = to_json(&[gun()]).expect("serialize");
        assert!(json.contains("\"objectType\": \"gun\""));
        assert!(json.contains("\"boundingBox\""));
        assert!(json.starts_with("[\n"));
    }

    #[test]
    fn empty_store_exports_empty_array() {
        assert_eq!(to_json(&[]).expect("serialize"), "[]");
    }

    #[test]
    fn download_writes_readable_file() {
        let dir = tempdir().expect("tempdir");
        let target = dir.path().join("exports");
        let path = download_detection_data(&[gun()], "Front Door", &target).expect("export");

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("Front_Door_detections.json")
        );
        let written = fs::read_to_string(&path).expect("read back");
        let parsed: Vec<Detection> = serde_json::from_str(&written).expect("parse back");
        assert_eq!(parsed, vec![gun()]);
    }
}
