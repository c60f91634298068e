use std::collections::BTreeMap;

use serde_derive::Serialize;
use tracing::info;

use crate::bbox::{BBox, Ltrb};
use crate::error::Error;
use crate::store::TrackStore;

/// One track's time-indexed lifespan in the exported record.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub name: String,
    pub bbox: BBox<Ltrb>,
    pub confidence: f32,
    /// Seconds from stream start.
    pub start_time: f64,
    pub end_time: f64,
    pub retired: bool,
}

/// The full export, keyed by decimal track id.
pub type Timeline = BTreeMap<String, TimelineEntry>;

/// Convert every track's frame-indexed lifespan into seconds and emit
/// the final record. Runs once after the stream ends; retired and
/// still-active tracks are both included, a truncated stream therefore
/// still exports cleanly.
pub fn export_timeline(
    store: &TrackStore,
    taxonomy: &[impl AsRef<str>],
    fps: f64,
) -> Result<Timeline, Error> {
    let mut timeline = Timeline::new();

    for track in store.iter() {
        let name = usize::try_from(track.class)
            .ok()
            .and_then(|i| taxonomy.get(i))
            .ok_or(Error::UnknownClass(track.class))?;

        timeline.insert(
            track.id.to_string(),
            TimelineEntry {
                name: name.as_ref().to_string(),
                bbox: track.bbox,
                confidence: track.confidence,
                start_time: track.start_frame as f64 / fps,
                end_time: track.last_active_frame as f64 / fps,
                retired: track.retired,
            },
        );
    }

    info!(tracks = timeline.len(), "timeline exported");

    Ok(timeline)
}
