use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("degenerate bounding box (non-positive area): {0:?}")]
    DegenerateBBox([f32; 4]),

    #[error("invalid stream config: {0}")]
    InvalidConfig(String),

    #[error("class id {0} is not in the taxonomy")]
    UnknownClass(i32),

    #[error("detector failure: {0}")]
    Detector(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("frame stream failure: {0}")]
    Stream(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("render failure: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
