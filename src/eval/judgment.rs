use crate::{
    error::Error,
    pose::{KeypointKind, NUM_KEYPOINTS},
};
use num_traits::FromPrimitive;

pub(crate) const NO_PERSON: &str = "No person detected.";
pub(crate) const INVALID_POSE: &str = "Invalid pose data";

/// Per-keypoint correctness tag for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointStatus {
    Ok,
    Flagged,
}

impl PointStatus {
    /// The color the renderer uses for this status. Fixed contract so the
    /// renderer needs no exercise-specific knowledge.
    pub(crate) fn color(self) -> &'static str {
        match self {
            Self::Ok => "green",
            Self::Flagged => "red",
        }
    }
}

impl Default for PointStatus {
    fn default() -> Self {
        Self::Ok
    }
}

/// A label request anchored to a specific joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Annotation {
    pub(crate) joint: KeypointKind,
    pub(crate) message: &'static str,
}

/// The evaluator's per-frame output: coaching messages (empty means the form
/// is correct), one status per keypoint index, and label requests.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Judgment {
    pub(crate) messages: Vec<&'static str>,
    pub(crate) statuses: [PointStatus; NUM_KEYPOINTS],
    pub(crate) annotations: Vec<Annotation>,
}

impl Judgment {
    /// Nothing to report, every point OK.
    pub(crate) fn correct() -> Self {
        Self {
            messages: Vec::new(),
            statuses: [PointStatus::Ok; NUM_KEYPOINTS],
            annotations: Vec::new(),
        }
    }

    /// The pose model produced no landmarks this frame. Distinct from
    /// correct form: presence failed, not correctness.
    pub(crate) fn no_person() -> Self {
        let mut judgment = Self::correct();
        judgment.messages.push(NO_PERSON);
        judgment
    }

    /// The frame did not carry one finite point per landmark.
    pub(crate) fn invalid_pose() -> Self {
        let mut judgment = Self::correct();
        judgment.messages.push(INVALID_POSE);
        judgment
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn report(&mut self, message: &'static str) {
        self.messages.push(message);
    }

    pub(crate) fn flag(&mut self, kinds: &[KeypointKind]) -> Result<(), Error> {
        for &kind in kinds {
            self.statuses[kind.idx()?] = PointStatus::Flagged;
        }
        Ok(())
    }

    pub(crate) fn annotate(&mut self, joint: KeypointKind, message: &'static str) {
        self.annotations.push(Annotation { joint, message });
    }

    pub(crate) fn status(&self, kind: KeypointKind) -> Result<PointStatus, Error> {
        Ok(self.statuses[kind.idx()?])
    }

    /// Color for a skeleton segment: red as soon as either endpoint is
    /// flagged, green otherwise.
    pub(crate) fn connection_color(
        &self,
        a: KeypointKind,
        b: KeypointKind,
    ) -> Result<&'static str, Error> {
        let status = if self.status(a)? == PointStatus::Flagged
            || self.status(b)? == PointStatus::Flagged
        {
            PointStatus::Flagged
        } else {
            PointStatus::Ok
        };
        Ok(status.color())
    }

    pub(crate) fn flagged_kinds(&self) -> Result<Vec<KeypointKind>, Error> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, &status)| status == PointStatus::Flagged)
            .map(|(index, _)| {
                KeypointKind::from_usize(index).ok_or(Error::ConvertUSizeToKeypointKind(index))
            })
            .collect()
    }
}
