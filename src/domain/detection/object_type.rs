// SPDX-License-Identifier: MPL-2.0
//! Detected object classes and their presentation table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color used for overlay borders and list badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How a class of detection is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectStyle {
    /// Overlay label.
    pub label: &'static str,
    /// Border/badge color.
    pub color: Rgb,
    /// Whether the summary list flags this class with an alert icon.
    pub is_weapon: bool,
}

/// Style used for `other` and for classes this build does not know about.
pub const DEFAULT_STYLE: ObjectStyle = ObjectStyle {
    label: "Unknown",
    color: Rgb::new(0xea, 0xb3, 0x08),
    is_weapon: false,
};

/// Class of a detected object.
///
/// Values produced by a newer provider that this build does not recognize
/// deserialize to [`ObjectType::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Person,
    Gun,
    Knife,
    Drugs,
    #[serde(rename = "deadbody")]
    DeadBody,
    Other,
    #[serde(other)]
    Unknown,
}

impl ObjectType {
    /// Every class a provider is expected to emit.
    pub const KNOWN: [ObjectType; 6] = [
        ObjectType::Person,
        ObjectType::Gun,
        ObjectType::Knife,
        ObjectType::Drugs,
        ObjectType::DeadBody,
        ObjectType::Other,
    ];

    /// Wire tag, also the key for lexicographic sorting.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Person => "person",
            ObjectType::Gun => "gun",
            ObjectType::Knife => "knife",
            ObjectType::Drugs => "drugs",
            ObjectType::DeadBody => "deadbody",
            ObjectType::Other => "other",
            ObjectType::Unknown => "unknown",
        }
    }

    /// Parses a wire tag; unrecognized tags map to `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or(ObjectType::Unknown)
    }

    /// Label, color and weapon flag for this class.
    #[must_use]
    pub fn style(self) -> ObjectStyle {
        match self {
            ObjectType::Person => ObjectStyle {
                label: "Person",
                color: Rgb::new(0x3b, 0x82, 0xf6),
                is_weapon: false,
            },
            ObjectType::Gun => ObjectStyle {
                label: "Weapon - Gun",
                color: Rgb::new(0xef, 0x44, 0x44),
                is_weapon: true,
            },
            ObjectType::Knife => ObjectStyle {
                label: "Weapon - Knife",
                color: Rgb::new(0xf9, 0x73, 0x16),
                is_weapon: true,
            },
            ObjectType::Drugs => ObjectStyle {
                label: "Contraband",
                color: Rgb::new(0xa8, 0x55, 0xf7),
                is_weapon: false,
            },
            ObjectType::DeadBody => ObjectStyle {
                label: "Deceased",
                color: Rgb::new(0x6b, 0x72, 0x80),
                is_weapon: false,
            },
            ObjectType::Other | ObjectType::Unknown => DEFAULT_STYLE,
        }
    }

    /// Name for filter menus: the tag with its first letter capitalized.
    #[must_use]
    pub fn display_name(self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Canned description used by the mock provider.
    #[must_use]
    pub fn sample_description(self) -> &'static str {
        match self {
            ObjectType::Person => "Person detected in frame",
            ObjectType::Gun => "Black pistol held in right hand",
            ObjectType::Knife => "Kitchen knife visible on table",
            ObjectType::Drugs => "White powder substance in clear bag",
            ObjectType::DeadBody => "Unresponsive person on floor",
            ObjectType::Other | ObjectType::Unknown => "Unknown object detected",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_lowercase_tags() {
        let json = serde_json::to_string(&ObjectType::DeadBody).unwrap();
        assert_eq!(json, "\"deadbody\"");
        let json = serde_json::to_string(&ObjectType::Gun).unwrap();
        assert_eq!(json, "\"gun\"");
    }

    #[test]
    fn unknown_tag_deserializes_to_unknown() {
        let parsed: ObjectType = serde_json::from_str("\"drone\"").unwrap();
        assert_eq!(parsed, ObjectType::Unknown);
    }

    #[test]
    fn as_str_matches_serde_tag() {
        for t in ObjectType::KNOWN {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn from_tag_is_case_insensitive() {
        assert_eq!(ObjectType::from_tag("KNIFE"), ObjectType::Knife);
        assert_eq!(ObjectType::from_tag("vehicle"), ObjectType::Unknown);
    }

    #[test]
    fn weapons_are_flagged() {
        assert!(ObjectType::Gun.style().is_weapon);
        assert!(ObjectType::Knife.style().is_weapon);
        assert!(!ObjectType::Person.style().is_weapon);
    }

    #[test]
    fn other_and_unknown_use_default_style() {
        assert_eq!(ObjectType::Other.style(), DEFAULT_STYLE);
        assert_eq!(ObjectType::Unknown.style().label, "Unknown");
    }

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(ObjectType::DeadBody.display_name(), "Deadbody");
        assert_eq!(ObjectType::Person.display_name(), "Person");
    }

    #[test]
    fn rgb_hex_format() {
        assert_eq!(ObjectType::Gun.style().color.to_hex(), "#ef4444");
    }
}
