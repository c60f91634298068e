use crate::bbox::{BBox, Ltrb};
use crate::error::Error;
use crate::store::TrackStore;
use crate::track::Track;

/// Integer pixel rectangle, inclusive corners, clamped to frame bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// BGR triple. Cosmetic only.
pub type Color = [u8; 3];

/// Fixed palette cycled by track id, so an id keeps its color for the
/// whole track lifetime.
pub const PALETTE: [Color; 27] = [
    [255, 127, 0],
    [127, 255, 0],
    [0, 255, 127],
    [0, 127, 255],
    [127, 0, 255],
    [255, 0, 127],
    [255, 255, 255],
    [127, 0, 127],
    [0, 127, 127],
    [127, 127, 0],
    [127, 0, 0],
    [127, 0, 0],
    [0, 127, 0],
    [127, 127, 127],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 0],
    [0, 0, 255],
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 0],
    [255, 127, 255],
    [127, 255, 255],
    [255, 255, 127],
    [127, 127, 255],
    [255, 127, 127],
    [255, 127, 127],
];

#[inline]
pub fn color_for(id: u32) -> Color {
    PALETTE[id as usize % PALETTE.len()]
}

/// Blur/draw primitive collaborator (OpenCV-backed in production). One
/// painter per output frame; the blur strength is the collaborator's.
pub trait Painter {
    fn blur_region(&mut self, rect: Rect) -> Result<(), Error>;
    fn draw_labeled_rect(&mut self, rect: Rect, color: Color, label: &str) -> Result<(), Error>;
}

/// Redaction driver: reads the track store after association and
/// requests a blur plus an outline/label for each eligible track.
pub struct Redactor {
    dims: (u32, u32),
    max_absent: i32,
}

impl Redactor {
    pub fn new(dims: (u32, u32), max_absent: i32) -> Self {
        Self { dims, max_absent }
    }

    fn clamp(&self, bbox: &BBox<Ltrb>) -> Rect {
        let (w, h) = self.dims;

        Rect {
            x1: (bbox.left() as i32).max(0),
            y1: (bbox.top() as i32).max(0),
            x2: (bbox.right() as i32).min(w as i32 - 1),
            y2: (bbox.bottom() as i32).min(h as i32 - 1),
        }
    }

    // Matched tracks render on their fresh box when the frame had
    // detections; with no surviving detections every track still inside
    // the grace window renders on its stale box. Unmatched tracks in a
    // mixed frame render nothing.
    fn eligible(&self, track: &Track, detections_present: bool) -> bool {
        if track.retired {
            return false;
        }

        if detections_present {
            track.absent == 0
        } else {
            track.absent <= self.max_absent
        }
    }

    /// Render one frame's eligible tracks onto both output frames.
    /// Call after the association pass for the same frame.
    pub fn render_frame(
        &self,
        store: &TrackStore,
        detections_present: bool,
        annotated: &mut dyn Painter,
        blurred: &mut dyn Painter,
    ) -> Result<(), Error> {
        for track in store.iter() {
            if !self.eligible(track, detections_present) {
                continue;
            }

            let rect = self.clamp(&track.bbox);
            blurred.blur_region(rect)?;
            annotated.draw_labeled_rect(rect, color_for(track.id), &format!("ID: {}", track.id))?;
        }

        Ok(())
    }
}
