// SPDX-License-Identifier: MPL-2.0
//! Detection set of the current video and its read-only queries.
//!
//! The store holds exactly one video's detections. Switching videos or
//! finishing an analysis swaps the whole set with [`DetectionStore::replace_all`];
//! every other operation is a pure query that returns a new ordered view and
//! leaves the stored order untouched.
//!
//! # Sorting
//!
//! All sorts are stable: detections that compare equal keep their stored
//! relative order in both directions.
//!
//! Confidence is the odd one out. Its primary comparison is highest-first,
//! and the requested direction flips that, so `Ascending` lists the most
//! confident detection first. Summary panels built against this store rely
//! on that order.

use crate::domain::detection::{Detection, ObjectType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// =============================================================================
// Query Parameters
// =============================================================================

/// Field a detection list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Timestamp,
    /// Lexicographic on the wire tag (`deadbody` < `drugs` < `gun` ...).
    ObjectType,
    Confidence,
}

impl SortKey {
    /// Parses a CLI/filter value (`timestamp`, `type`, `confidence`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "timestamp" | "time" => Some(Self::Timestamp),
            "type" | "objecttype" | "object-type" => Some(Self::ObjectType),
            "confidence" => Some(Self::Confidence),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction (the sort toggle button).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Object-type filter of the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionFilter {
    #[default]
    All,
    Only(ObjectType),
}

impl DetectionFilter {
    #[must_use]
    pub fn matches(&self, detection: &Detection) -> bool {
        match self {
            Self::All => true,
            Self::Only(object_type) => detection.object_type == *object_type,
        }
    }

    /// Returns `true` if this filter is active (not `All`).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }
}

/// Comparator for one sort key, before the direction is applied.
fn primary_order(key: SortKey, a: &Detection, b: &Detection) -> Ordering {
    match key {
        SortKey::Timestamp => a.timestamp.total_cmp(&b.timestamp),
        SortKey::ObjectType => a.object_type.as_str().cmp(b.object_type.as_str()),
        SortKey::Confidence => b.confidence.total_cmp(&a.confidence),
    }
}

fn sort_refs(items: &mut [&Detection], key: SortKey, direction: SortDirection) {
    // ties keep stored order in both directions
    items.sort_by(|a, b| {
        let order = primary_order(key, a, b);
        match direction {
            SortDirection::Ascending => order,
            SortDirection::Descending => order.reverse(),
        }
    });
}

// =============================================================================
// Store
// =============================================================================

/// Detections of the current video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionStore {
    detections: Vec<Detection>,
}

impl DetectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the active set in one step.
    pub fn replace_all(&mut self, detections: Vec<Detection>) {
        tracing::debug!(count = detections.len(), "detection store replaced");
        self.detections = detections;
    }

    /// Empties the store (no current video).
    pub fn clear(&mut self) {
        self.detections.clear();
    }

    /// Detections matching `predicate`, in stored order.
    pub fn query_filtered<P>(&self, predicate: P) -> Vec<&Detection>
    where
        P: Fn(&Detection) -> bool,
    {
        self.detections.iter().filter(|d| predicate(*d)).collect()
    }

    /// All detections ordered by `key` in `direction`.
    #[must_use]
    pub fn query_sorted(&self, key: SortKey, direction: SortDirection) -> Vec<&Detection> {
        let mut items: Vec<&Detection> = self.detections.iter().collect();
        sort_refs(&mut items, key, direction);
        items
    }

    /// Filter then sort; the summary panel's list.
    #[must_use]
    pub fn query(
        &self,
        filter: DetectionFilter,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<&Detection> {
        let mut items = self.query_filtered(|d| filter.matches(d));
        sort_refs(&mut items, key, direction);
        items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Detection> {
        self.detections.iter().find(|d| d.id == id)
    }

    /// Object types present, in first-seen order.
    #[must_use]
    pub fn distinct_types(&self) -> Vec<ObjectType> {
        let mut types = Vec::new();
        for detection in &self.detections {
            if !types.contains(&detection.object_type) {
                types.push(detection.object_type);
            }
        }
        types
    }

    /// Number of detections per object type, in first-seen order.
    #[must_use]
    pub fn count_by_type(&self) -> Vec<(ObjectType, usize)> {
        let mut counts: Vec<(ObjectType, usize)> = Vec::new();
        for detection in &self.detections {
            match counts.iter_mut().find(|(t, _)| *t == detection.object_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((detection.object_type, 1)),
            }
        }
        counts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Detection] {
        &self.detections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::BoundingBox;

    fn detection(id: &str, object_type: ObjectType, timestamp: f64, confidence: f64) -> Detection {
        Detection::new(
            id,
            object_type,
            timestamp,
            BoundingBox::new(0.1, 0.1, 0.2, 0.2),
            confidence,
            object_type.sample_description(),
        )
    }

    fn store() -> DetectionStore {
        let mut store = DetectionStore::new();
        store.replace_all(vec![
            detection("gun-1", ObjectType::Gun, 12.0, 0.91),
            detection("person-2", ObjectType::Person, 3.0, 0.75),
            detection("knife-3", ObjectType::Knife, 7.5, 0.91),
            detection("person-4", ObjectType::Person, 7.5, 0.80),
        ]);
        store
    }

    fn ids(items: &[&Detection]) -> Vec<String> {
        items.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn replace_all_swaps_whole_set() {
        let mut store = store();
        store.replace_all(vec![detection("other-1", ObjectType::Other, 1.0, 0.7)]);
        assert_eq!(store.len(), 1);
        assert!(store.get("gun-1").is_none());
    }

    #[test]
    fn filtered_query_keeps_order_and_does_not_mutate() {
        let store = store();
        let before = store.clone();
        let persons = store.query_filtered(|d| d.object_type == ObjectType::Person);
        let confident = store.query_filtered(|d| d.confidence >= 0.9);
        assert_eq!(ids(&persons), vec!["person-2", "person-4"]);
        assert_eq!(ids(&confident), vec!["gun-1", "knife-3"]);
        // both results point into the same untouched set
        assert!(persons
            .iter()
            .chain(confident.iter())
            .all(|d| store.get(&d.id) == Some(*d)));
        assert_eq!(store, before);
    }

    #[test]
    fn timestamp_sort_is_non_decreasing_and_stable() {
        let store = store();
        let sorted = store.query_sorted(SortKey::Timestamp, SortDirection::Ascending);
        assert!(sorted.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        // knife-3 and person-4 tie at 7.5
        assert_eq!(ids(&sorted), vec!["person-2", "knife-3", "person-4", "gun-1"]);

        let sorted = store.query_sorted(SortKey::Timestamp, SortDirection::Descending);
        assert_eq!(ids(&sorted), vec!["gun-1", "knife-3", "person-4", "person-2"]);
    }

    #[test]
    fn object_type_sort_is_lexicographic_on_tag() {
        let store = store();
        let sorted = store.query_sorted(SortKey::ObjectType, SortDirection::Ascending);
        assert_eq!(ids(&sorted), vec!["gun-1", "knife-3", "person-2", "person-4"]);
    }

    #[test]
    fn confidence_ascending_lists_highest_first() {
        let store = store();
        let sorted = store.query_sorted(SortKey::Confidence, SortDirection::Ascending);
        // gun-1 and knife-3 tie at 0.91 and keep stored order
        assert_eq!(ids(&sorted), vec!["gun-1", "knife-3", "person-4", "person-2"]);
    }

    #[test]
    fn confidence_descending_lists_lowest_first_with_stable_ties() {
        let store = store();
        let sorted = store.query_sorted(SortKey::Confidence, SortDirection::Descending);
        assert_eq!(ids(&sorted), vec!["person-2", "person-4", "gun-1", "knife-3"]);
    }

    #[test]
    fn combined_query_filters_then_sorts() {
        let store = store();
        let items = store.query(
            DetectionFilter::Only(ObjectType::Person),
            SortKey::Timestamp,
            SortDirection::Descending,
        );
        assert_eq!(ids(&items), vec!["person-4", "person-2"]);
        assert_eq!(
            store
                .query(DetectionFilter::All, SortKey::Timestamp, SortDirection::Ascending)
                .len(),
            4
        );
    }

    #[test]
    fn distinct_types_and_counts_in_first_seen_order() {
        let store = store();
        assert_eq!(
            store.distinct_types(),
            vec![ObjectType::Gun, ObjectType::Person, ObjectType::Knife]
        );
        assert_eq!(
            store.count_by_type(),
            vec![
                (ObjectType::Gun, 1),
                (ObjectType::Person, 2),
                (ObjectType::Knife, 1)
            ]
        );
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!(SortKey::parse("type"), Some(SortKey::ObjectType));
        assert_eq!(SortKey::parse("Confidence"), Some(SortKey::Confidence));
        assert_eq!(SortKey::parse("size"), None);
        assert!(!DetectionFilter::All.is_active());
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
    }
}
