use serde_derive::{Deserialize, Serialize};
use tracing::info;

use crate::detector::ObjectDetector;
use crate::error::Error;
use crate::export::{export_timeline, Timeline};
use crate::frame::Frame;
use crate::render::{Painter, Redactor};
use crate::store::TrackStore;
use crate::tracker::{FirstFitIou, Tracker, TrackerConfig};
use crate::{Detection, MatchPolicy};

/// Fixed parameters of the input stream, validated once at startup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct StreamConfig {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl StreamConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "frame dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !(self.fps > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }

        Ok(())
    }
}

/// Frame source/sink collaborator: yields decoded frames in arrival
/// order as a pair of output canvases (annotated, blurred), and encodes
/// both once rendered.
pub trait FrameStream {
    type Canvas: Painter;

    /// Next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<(Self::Canvas, Self::Canvas)>, Error>;

    /// The untouched pixels of a canvas, for the detector. Only valid
    /// before anything was painted on it.
    fn image<'a>(&self, canvas: &'a Self::Canvas) -> crate::detector::Image<'a>;

    /// Encode both rendered frames of one input frame.
    fn write(&mut self, annotated: Self::Canvas, blurred: Self::Canvas) -> Result<(), Error>;
}

/// One processing session: owns the track store for its lifetime and
/// drives association, rendering, and the final export. Strictly
/// sequential; frame `n + 1` is never seen before frame `n` is fully
/// associated and rendered.
pub struct Session<P: MatchPolicy = FirstFitIou> {
    stream: StreamConfig,
    tracker: Tracker<P>,
    redactor: Redactor,
    store: TrackStore,
    taxonomy: Vec<String>,
    next_frame_index: u64,
}

impl Session<FirstFitIou> {
    pub fn new(
        stream: StreamConfig,
        config: TrackerConfig,
        taxonomy: Vec<String>,
    ) -> Result<Self, Error> {
        Self::with_policy(stream, Tracker::new(config), taxonomy)
    }
}

impl<P: MatchPolicy> Session<P> {
    pub fn with_policy(
        stream: StreamConfig,
        tracker: Tracker<P>,
        taxonomy: Vec<String>,
    ) -> Result<Self, Error> {
        stream.validate()?;

        let max_absent = tracker.config().max_absent;

        info!(
            width = stream.width,
            height = stream.height,
            fps = stream.fps,
            "session started"
        );

        Ok(Self {
            stream,
            tracker,
            redactor: Redactor::new((stream.width, stream.height), max_absent),
            store: TrackStore::new(),
            taxonomy,
            next_frame_index: 0,
        })
    }

    #[inline]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Associate one frame's detections and render both outputs.
    pub fn process_frame(
        &mut self,
        detections: Vec<Detection>,
        annotated: &mut dyn Painter,
        blurred: &mut dyn Painter,
    ) -> Result<(), Error> {
        let frame = Frame {
            index: self.next_frame_index,
            dims: (self.stream.width, self.stream.height),
            detections,
        };
        self.next_frame_index += 1;

        let report = self.tracker.observe(&mut self.store, &frame)?;
        self.redactor
            .render_frame(&self.store, report.detections_present, annotated, blurred)?;

        Ok(())
    }

    /// Drive the full loop against the external collaborators and
    /// export the timeline at end of stream.
    pub fn run<D, V>(mut self, detector: &mut D, video: &mut V) -> Result<Timeline, Error>
    where
        D: ObjectDetector,
        V: FrameStream,
    {
        while let Some((mut annotated, mut blurred)) = video.next_frame()? {
            let detections = detector.detect(&video.image(&annotated))?;

            self.process_frame(detections, &mut annotated, &mut blurred)?;
            video.write(annotated, blurred)?;
        }

        self.finish()
    }

    /// Export whatever tracks exist; valid for truncated streams too.
    pub fn finish(self) -> Result<Timeline, Error> {
        export_timeline(&self.store, &self.taxonomy, self.stream.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected_at_startup() {
        let bad = StreamConfig {
            width: 0,
            height: 480,
            fps: 30.0,
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let bad = StreamConfig {
            width: 640,
            height: 480,
            fps: 0.0,
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let bad = StreamConfig {
            width: 640,
            height: 480,
            fps: -25.0,
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let good = StreamConfig {
            width: 640,
            height: 480,
            fps: 29.97,
        };
        assert!(good.validate().is_ok());
    }
}
