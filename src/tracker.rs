use serde_derive::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Error;
use crate::frame::Frame;
use crate::store::TrackStore;
use crate::track::Track;
use crate::{Detection, MatchDecision, MatchPolicy};

/// Tuning knobs for the association engine.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrackerConfig {
    /// Minimum confidence for an unmatched detection to spawn a track.
    pub min_spawn_confidence: f32,
    /// Frames a track may stay unmatched before it is retired.
    pub max_absent: i32,
    /// Detections covering more than this fraction of the frame are
    /// dropped as full-frame false positives.
    pub max_area_ratio: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_spawn_confidence: 0.03,
            max_absent: 20,
            max_area_ratio: 0.3,
        }
    }
}

/// First-fit IoU matcher with early class stabilization: a conflicting
/// class may not claim a track younger than `settle_age`, and may not
/// overwrite the class of one that is older.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FirstFitIou {
    pub iou_threshold: f32,
    /// Age in frames past which a track's class is considered settled.
    pub settle_age: u64,
}

impl Default for FirstFitIou {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            settle_age: 5,
        }
    }
}

impl MatchPolicy for FirstFitIou {
    fn decide(
        &self,
        frame_index: u64,
        det: &Detection,
        track: &Track,
    ) -> Result<MatchDecision, Error> {
        if track.bbox.iou(&det.bbox)? <= self.iou_threshold {
            return Ok(MatchDecision::Skip);
        }

        if det.class == track.class {
            return Ok(MatchDecision::Accept { class: det.class });
        }

        if track.age(frame_index) >= self.settle_age {
            // settled track: absorb the box but keep the class
            Ok(MatchDecision::Accept { class: track.class })
        } else {
            Ok(MatchDecision::Skip)
        }
    }
}

/// Per-frame association summary. Used for logging and to gate the
/// renderer's stale-box branch; all track state lives in the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameReport {
    /// Whether any detection survived the area pre-filter.
    pub detections_present: bool,
    pub matched: u32,
    pub spawned: u32,
    pub retired: u32,
}

/// Association engine: consumes one frame of detections and mutates the
/// track store. Generic over the match policy; first-fit IoU by default.
pub struct Tracker<P: MatchPolicy = FirstFitIou> {
    config: TrackerConfig,
    policy: P,
}

impl Tracker<FirstFitIou> {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_policy(config, FirstFitIou::default())
    }
}

impl<P: MatchPolicy> Tracker<P> {
    pub fn with_policy(config: TrackerConfig, policy: P) -> Self {
        Self { config, policy }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Run one frame of association against the store: pre-filter,
    /// greedy first-fit matching in track-creation order, spawning,
    /// then the end-of-frame aging/retirement pass.
    ///
    /// Must be called exactly once per frame, with strictly increasing
    /// frame indices; the aging pass relies on it.
    pub fn observe(&self, store: &mut TrackStore, frame: &Frame) -> Result<FrameReport, Error> {
        let frame_area = (frame.dims.0 * frame.dims.1) as f32;
        let mut report = FrameReport::default();

        for det in frame.iter() {
            if det.area() <= 0.0 {
                return Err(Error::DegenerateBBox(*det.bbox.as_slice()));
            }

            if det.area() > self.config.max_area_ratio * frame_area {
                continue;
            }

            report.detections_present = true;

            // `absent == -1` marks a track already claimed (or spawned)
            // this frame; the aging pass below normalizes it back.
            let mut claimed = false;
            for track in store.iter_mut() {
                if track.retired || track.absent == -1 {
                    continue;
                }

                if let MatchDecision::Accept { class } =
                    self.policy.decide(frame.index, det, track)?
                {
                    track.absorb(frame.index, det, class);
                    claimed = true;
                    break;
                }
            }

            if claimed {
                report.matched += 1;
            } else if det.confidence > self.config.min_spawn_confidence {
                store.spawn(frame.index, det);
                report.spawned += 1;
            }
            // low-confidence orphans are dropped silently
        }

        for track in store.iter_mut() {
            if track.retired {
                continue;
            }

            track.absent += 1;

            if track.absent > self.config.max_absent {
                track.retired = true;
                report.retired += 1;
                trace!(id = track.id, frame_index = frame.index, "track retired");
            } else {
                track.last_active_frame = frame.index;
            }
        }

        trace!(
            frame_index = frame.index,
            matched = report.matched,
            spawned = report.spawned,
            retired = report.retired,
            "frame associated"
        );

        Ok(report)
    }
}
