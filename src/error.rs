#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("coordinate ({0}, {1}) is not finite")]
    InfiniteCoordinate(f32, f32),

    #[error("failed to convert keypoint variant to usize: {0:?}")]
    KeypointVariantToUSize(crate::pose::KeypointKind),

    #[error("failed to convert usize value to keypoint kind: {0}")]
    ConvertUSizeToKeypointKind(usize),

    #[error("keypoint frame has {0} points, expected {1}")]
    MalformedFrame(usize, usize),

    #[error("unknown exercise kind: {0}")]
    UnknownExercise(String),

    #[error("failed to parse keypoint frame")]
    ParseFrame(#[source] serde_json::Error),
}
