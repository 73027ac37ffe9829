use crate::error::Error;
use num_traits::ToPrimitive;
use ordered_float::NotNan;
use std::{
    convert::TryInto,
    ops::{Add, Sub},
};

/// MediaPipe pose landmark topology. Variant order is the wire order, so
/// `idx()` is the index into a keypoint frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub(crate) enum KeypointKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl KeypointKind {
    pub(crate) fn idx(self) -> Result<usize, Error> {
        self.to_usize().ok_or(Error::KeypointVariantToUSize(self))
    }
}

pub(crate) const NUM_KEYPOINTS: usize = 33;

/// A single estimated landmark location, in frame-normalized coordinates.
/// Construction rejects NaN and infinite values, so any `Point` handed to an
/// evaluator is finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub(crate) struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub(crate) fn new(x: f32, y: f32) -> Result<Self, Error> {
        let x = NotNan::new(x)
            .map_err(|e| Error::ConstructNotNan(e, x))?
            .into_inner();
        let y = NotNan::new(y)
            .map_err(|e| Error::ConstructNotNan(e, y))?
            .into_inner();
        if x.is_infinite() || y.is_infinite() {
            return Err(Error::InfiniteCoordinate(x, y));
        }
        Ok(Self { x, y })
    }

    /// The point shifted down-screen by `dy` (y grows downward).
    pub(crate) fn translate_y(self, dy: f32) -> Result<Self, Error> {
        Self::new(self.x, self.y + dy)
    }

    #[inline]
    pub(crate) fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub(crate) fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub(crate) fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

pub(crate) type Keypoints = [Point; NUM_KEYPOINTS];

/// Validate that a raw frame carries one point per landmark. The pose model
/// always emits all 33, so anything else is a malformed frame.
pub(crate) fn check_frame(frame: &[Point]) -> Result<&Keypoints, Error> {
    frame
        .try_into()
        .map_err(|_| Error::MalformedFrame(frame.len(), NUM_KEYPOINTS))
}

pub(crate) fn keypoint(keypoints: &Keypoints, kind: KeypointKind) -> Result<Point, Error> {
    Ok(keypoints[kind.idx()?])
}

pub(crate) mod constants {
    use super::KeypointKind::{self, *};

    /// Skeleton segments the renderer draws, colored per endpoint status.
    pub(crate) const CONNECTIONS: [(KeypointKind, KeypointKind); 12] = [
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        (LeftHip, LeftKnee),
        (RightHip, RightKnee),
        (LeftKnee, LeftAnkle),
        (RightKnee, RightAnkle),
        (LeftShoulder, LeftElbow),
        (RightShoulder, RightElbow),
        (LeftElbow, LeftWrist),
        (RightElbow, RightWrist),
    ];
}
