use crate::bbox::{BBox, Ltrb};
use crate::detection::Detection;

/// A persistent identity linking detections of one object across frames.
///
/// Lives in the [`TrackStore`](crate::store::TrackStore) from creation
/// until the end of the processing session; retirement excludes it from
/// matching and rendering but never removes it.
#[derive(Debug, Clone)]
pub struct Track {
    /// Assigned once at creation, never reused.
    pub id: u32,
    /// Last-known bounding box.
    pub bbox: BBox<Ltrb>,
    /// Confidence of the last detection that updated this track.
    pub confidence: f32,
    /// Settles after the track matures past the policy's settle age.
    pub class: i32,
    /// Frames since the last match. `-1` right after a match or spawn,
    /// normalized to `0` by the end-of-frame aging pass.
    pub absent: i32,
    pub start_frame: u64,
    /// Most recent frame during which the track was still active.
    /// Only read by the timeline export.
    pub last_active_frame: u64,
    /// One-way latch, flipped once `absent` exceeds the grace window.
    pub retired: bool,
}

impl Track {
    pub(crate) fn new(id: u32, frame_index: u64, det: &Detection) -> Self {
        Self {
            id,
            bbox: det.bbox,
            confidence: det.confidence,
            class: det.class,
            absent: -1,
            start_frame: frame_index,
            last_active_frame: frame_index,
            retired: false,
        }
    }

    /// Age in frames at `frame_index`.
    #[inline]
    pub fn age(&self, frame_index: u64) -> u64 {
        frame_index.saturating_sub(self.start_frame)
    }

    /// Absorb a matched detection. `class` comes from the match policy,
    /// which may keep the track's settled class over the detection's.
    pub(crate) fn absorb(&mut self, frame_index: u64, det: &Detection, class: i32) {
        self.bbox = det.bbox;
        self.confidence = det.confidence;
        self.class = class;
        self.absent = -1;
        self.last_active_frame = frame_index;
    }
}
