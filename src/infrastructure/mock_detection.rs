// SPDX-License-Identifier: MPL-2.0
//! Randomized stand-in for the analysis service.
//!
//! Produces 5 to 14 detections per video with uniformly chosen classes,
//! plausible boxes and confidences of at least 70%. Seed it for
//! reproducible output.

use crate::application::port::DetectionProvider;
use crate::domain::detection::{BoundingBox, Detection, ObjectType};
use crate::domain::error::ProviderError;
use crate::domain::video::Video;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// Fewest detections generated per video.
const MIN_DETECTIONS: usize = 5;
/// One past the most detections generated per video.
const MAX_DETECTIONS_EXCLUSIVE: usize = 15;

/// Detection provider generating random findings.
#[derive(Debug)]
pub struct MockDetectionProvider {
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl MockDetectionProvider {
    /// Provider seeded from the OS, answering immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            delay: Duration::ZERO,
        }
    }

    /// Provider producing the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay: Duration::ZERO,
        }
    }

    /// Simulated processing time before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn generate(&self, video: &Video) -> Result<Vec<Detection>, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::Unavailable("generator state poisoned".into()))?;
        Ok(generate_detections(&mut *rng, video.duration))
    }
}

impl Default for MockDetectionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a timestamp-sorted random detection set for a video of
/// `duration_secs`.
pub fn generate_detections<R: Rng + ?Sized>(rng: &mut R, duration_secs: f64) -> Vec<Detection> {
    let duration = duration_secs.max(0.0);
    let count = rng.random_range(MIN_DETECTIONS..MAX_DETECTIONS_EXCLUSIVE);

    let mut detections: Vec<Detection> = (0..count)
        .map(|i| {
            let object_type = ObjectType::KNOWN[rng.random_range(0..ObjectType::KNOWN.len())];
            let timestamp = rng.random::<f64>() * duration;
            let bounding_box = BoundingBox::new(
                rng.random::<f64>() * 0.8,
                rng.random::<f64>() * 0.8,
                rng.random::<f64>() * 0.3 + 0.1,
                rng.random::<f64>() * 0.3 + 0.1,
            );
            let confidence = rng.random::<f64>() * 0.3 + 0.7;
            Detection::new(
                format!("{}-{}", object_type.as_str(), i + 1),
                object_type,
                timestamp,
                bounding_box,
                confidence,
                object_type.sample_description(),
            )
        })
        .collect();

    detections.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    detections
}

#[async_trait]
impl DetectionProvider for MockDetectionProvider {
    async fn analyze(&self, video: &Video) -> Result<Vec<Detection>, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let detections = self.generate(video)?;
        tracing::debug!(
            video_id = %video.id,
            count = detections.len(),
            "mock analysis finished"
        );
        Ok(detections)
    }
}
