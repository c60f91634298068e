use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// One object instance reported by the detector for a single frame.
/// Never retained past the frame it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Detection {
    pub bbox: BBox<Ltrb>,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline]
    pub fn new(bbox: BBox<Ltrb>, confidence: f32, class: i32) -> Self {
        Self {
            bbox,
            confidence,
            class,
        }
    }

    #[inline(always)]
    pub fn area(&self) -> f32 {
        self.bbox.area()
    }
}
