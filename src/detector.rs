use serde_derive::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::error::Error;
use crate::DEFAULT_CLASSES;

/// Borrowed pixel buffer handed to the detector. The core never
/// inspects pixels; layout is the collaborator's contract.
pub struct Image<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Detector-side tuning, shared with the inference collaborator.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DetectorConfig {
    /// Raw confidence floor passed to inference. Deliberately below the
    /// tracker's spawn threshold so weak re-detections can still extend
    /// existing tracks.
    pub confidence_floor: f32,
    /// Class labels the detector reports indices into.
    pub classes: Vec<String>,
}

impl DetectorConfig {
    pub fn new(confidence_floor: f32, classes: Vec<String>) -> Self {
        Self {
            confidence_floor,
            classes,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new(0.01, DEFAULT_CLASSES.iter().map(|s| s.to_string()).collect())
    }
}

/// External object detector boundary. Synchronous; detections come back
/// in the detector's reported order, which the association engine's
/// greedy scan depends on.
pub trait ObjectDetector {
    fn detect(&mut self, image: &Image<'_>) -> Result<Vec<Detection>, Error>;
}
