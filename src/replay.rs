use crate::{error::Error, pose::Point};
use serde::Deserialize;

/// One landmark as the pose model serializes it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawKeypoint {
    x: f32,
    y: f32,
}

/// Parse one NDJSON line: `null` when the pose model saw nobody, otherwise
/// the per-landmark coordinate array. Coordinates are validated into
/// `Point`s here, so evaluation never sees a non-finite value.
pub(crate) fn parse_line(line: &str) -> Result<Option<Vec<Point>>, Error> {
    let raw: Option<Vec<RawKeypoint>> = serde_json::from_str(line).map_err(Error::ParseFrame)?;
    raw.map(|points| {
        points
            .into_iter()
            .map(|RawKeypoint { x, y }| Point::new(x, y))
            .collect::<Result<Vec<_>, _>>()
    })
    .transpose()
}
