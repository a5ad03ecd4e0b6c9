// SPDX-License-Identifier: MPL-2.0
//! Time-synchronized detection overlays.
//!
//! On every playback time update the visible set is derived from scratch:
//! a detection is shown while `current_time` lies in
//! `[timestamp, timestamp + window]`. No state is carried between ticks, so
//! backward seeks need no special handling.

use crate::detection_store::DetectionStore;
use crate::domain::detection::{BoundingBox, Detection, ObjectType, Rgb};
use crate::domain::video::VisibilityWindow;

/// A detection is highlighted in the summary list within this distance
/// (seconds) of the playback position.
pub const LIST_ACTIVE_RANGE_SECS: f64 = 1.0;

/// Laid-out size of the render surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true when the surface has not been laid out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pixel rectangle of one overlay box, with its presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub detection_id: String,
    pub object_type: ObjectType,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// e.g. `Weapon - Gun (87%)`.
    pub label: String,
    pub color: Rgb,
    pub is_weapon: bool,
}

/// Scales one normalized span to pixels, clipped to `[0, extent]`.
fn clip_span(start: f64, length: f64, extent: f32) -> (f32, f32) {
    if extent.is_nan() || extent <= 0.0 {
        return (0.0, 0.0);
    }
    let extent = f64::from(extent);
    let lo = (start * extent).clamp(0.0, extent);
    let hi = ((start + length) * extent).clamp(0.0, extent);
    (lo as f32, (hi - lo).max(0.0) as f32)
}

impl OverlayBox {
    /// Builds the box for `detection` on a surface of `size`.
    ///
    /// Parts of the box outside the surface are clipped; an empty surface
    /// yields a zero-size box at the origin.
    #[must_use]
    pub fn layout(detection: &Detection, size: SurfaceSize) -> Self {
        let BoundingBox {
            x,
            y,
            width,
            height,
        } = detection.bounding_box;
        let (left, box_width) = clip_span(x, width, size.width);
        let (top, box_height) = clip_span(y, height, size.height);
        let style = detection.object_type.style();

        Self {
            detection_id: detection.id.clone(),
            object_type: detection.object_type,
            left,
            top,
            width: box_width,
            height: box_height,
            label: format!("{} ({}%)", style.label, detection.confidence_percent()),
            color: style.color,
            is_weapon: style.is_weapon,
        }
    }
}

/// Derives visible detections and their boxes from the playback position.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlaySynchronizer {
    window: VisibilityWindow,
}

impl OverlaySynchronizer {
    #[must_use]
    pub fn new(window: VisibilityWindow) -> Self {
        Self { window }
    }

    #[must_use]
    pub fn window(&self) -> VisibilityWindow {
        self.window
    }

    /// Returns true if `detection` is on screen at `current_time`.
    #[must_use]
    pub fn is_visible(&self, detection: &Detection, current_time: f64) -> bool {
        self.window.contains(detection.timestamp, current_time)
    }

    /// Detections on screen at `current_time`, in store order.
    #[must_use]
    pub fn visible<'a>(&self, store: &'a DetectionStore, current_time: f64) -> Vec<&'a Detection> {
        store.query_filtered(|d| self.is_visible(d, current_time))
    }

    /// Overlay boxes for `current_time` on a surface of `size`.
    #[must_use]
    pub fn boxes(
        &self,
        store: &DetectionStore,
        current_time: f64,
        size: SurfaceSize,
    ) -> Vec<OverlayBox> {
        self.visible(store, current_time)
            .into_iter()
            .map(|d| OverlayBox::layout(d, size))
            .collect()
    }
}

/// Returns true if the summary list should highlight `detection`.
#[must_use]
pub fn is_active_in_list(detection: &Detection, current_time: f64) -> bool {
    (current_time - detection.timestamp).abs() < LIST_ACTIVE_RANGE_SECS
}
