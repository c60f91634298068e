pub mod bbox;
pub mod detection;
pub mod detector;
pub mod error;
pub mod export;
pub mod frame;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod track;
pub mod tracker;

pub use detection::Detection;
pub use frame::Frame;
pub use store::TrackStore;
pub use track::Track;
pub use tracker::{FirstFitIou, Tracker, TrackerConfig};

use error::Error;

/// Class taxonomy of the stock privacy filter model.
pub const DEFAULT_CLASSES: [&str; 3] = ["ID card", "paper", "house plate number"];

/// Outcome of offering a detection to one candidate track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDecision {
    /// Claim the track, setting its class to `class`.
    Accept { class: i32 },
    /// Keep scanning other candidates.
    Skip,
}

/// Decides whether a detection may claim a candidate track.
///
/// The engine scans candidates in track-creation order and stops at the
/// first `Accept`; swapping this trait's implementation is the seam for
/// replacing first-fit with a different assignment strategy.
pub trait MatchPolicy {
    fn decide(
        &self,
        frame_index: u64,
        det: &Detection,
        track: &Track,
    ) -> Result<MatchDecision, Error>;
}
