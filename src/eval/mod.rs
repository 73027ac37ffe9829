use crate::{
    error::Error,
    pose::{self, Point},
};
use std::str::FromStr;

pub(crate) mod geometry;
pub(crate) mod judgment;
mod pushup;
mod squat;
pub(crate) mod steady;

pub(crate) use judgment::Judgment;

pub(crate) trait Evaluator {
    /// The exercise token this evaluator judges, as the UI spells it.
    fn name(&self) -> &'static str;

    /// Judge a single validated keypoint frame. Never mutates its input and
    /// holds no state, so identical frames produce identical judgments.
    fn evaluate(&self, keypoints: &pose::Keypoints) -> Result<Judgment, Error>;
}

/// The closed set of supported exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exercise {
    Squat,
    PushUp,
}

impl Exercise {
    pub(crate) const VARIANTS: [&'static str; 2] = ["squats", "pushups"];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Squat => squat::Evaluator::default().name(),
            Self::PushUp => pushup::Evaluator::default().name(),
        }
    }

    fn judge(self, keypoints: &pose::Keypoints) -> Result<Judgment, Error> {
        match self {
            Self::Squat => squat::Evaluator::default().evaluate(keypoints),
            Self::PushUp => pushup::Evaluator::default().evaluate(keypoints),
        }
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "squats" => Ok(Self::Squat),
            "pushups" => Ok(Self::PushUp),
            _ => Err(Error::UnknownExercise(s.to_owned())),
        }
    }
}

/// Which body side crossed a threshold. The evaluators still flag both
/// sides, matching the renderer-visible behavior, but the trigger side is
/// kept so a stricter flagging policy would not need a new judgment shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TriggeredSides {
    Left,
    Right,
    Both,
}

/// A bilateral measurement; `None` marks a side whose angle was undefined
/// this frame (degenerate landmarks), which can never trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SideAngles {
    pub(crate) left: Option<f32>,
    pub(crate) right: Option<f32>,
}

impl SideAngles {
    pub(crate) fn exceeding(self, threshold: f32) -> Option<TriggeredSides> {
        let left = self.left.map_or(false, |angle| angle > threshold);
        let right = self.right.map_or(false, |angle| angle > threshold);
        match (left, right) {
            (true, true) => Some(TriggeredSides::Both),
            (true, false) => Some(TriggeredSides::Left),
            (false, true) => Some(TriggeredSides::Right),
            (false, false) => None,
        }
    }
}

/// Single entry point for collaborators: normalize the no-person and
/// malformed-frame cases, then hand valid frames to the selected exercise.
pub(crate) fn evaluate(
    exercise: Option<Exercise>,
    frame: Option<&[Point]>,
) -> Result<Judgment, Error> {
    let frame = match frame {
        Some(frame) => frame,
        None => return Ok(Judgment::no_person()),
    };
    let keypoints = match pose::check_frame(frame) {
        Ok(keypoints) => keypoints,
        Err(_) => return Ok(Judgment::invalid_pose()),
    };
    match exercise {
        Some(exercise) => exercise.judge(keypoints),
        None => Ok(Judgment::correct()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{KeypointKind, Keypoints, NUM_KEYPOINTS};

    fn squat_frame() -> Vec<Point> {
        let mut keypoints: Keypoints = [Point::default(); NUM_KEYPOINTS];
        for &(kind, x, y) in &[
            (KeypointKind::LeftShoulder, 0.45, 0.1),
            (KeypointKind::RightShoulder, 0.55, 0.1),
            (KeypointKind::LeftHip, 0.45, 0.4),
            (KeypointKind::RightHip, 0.55, 0.4),
            (KeypointKind::LeftKnee, 0.4, 0.6),
            (KeypointKind::RightKnee, 0.6, 0.6),
            (KeypointKind::LeftAnkle, 0.45, 0.8),
            (KeypointKind::RightAnkle, 0.55, 0.8),
        ] {
            keypoints[kind.idx().unwrap()] = Point::new(x, y).unwrap();
        }
        keypoints.to_vec()
    }

    #[test]
    fn missing_frame_reports_no_person_for_every_kind() {
        for &exercise in &[None, Some(Exercise::Squat), Some(Exercise::PushUp)] {
            let judgment = evaluate(exercise, None).unwrap();
            assert_eq!(judgment.messages, vec![judgment::NO_PERSON]);
            assert!(judgment.flagged_kinds().unwrap().is_empty());
            assert!(judgment.annotations.is_empty());
        }
    }

    #[test]
    fn unset_exercise_is_neutral() {
        let frame = squat_frame();
        let judgment = evaluate(None, Some(&frame)).unwrap();
        assert!(judgment.is_clean());
        assert!(judgment.flagged_kinds().unwrap().is_empty());
    }

    #[test]
    fn short_frame_reports_invalid_pose() {
        let frame = vec![Point::default(); 10];
        let judgment = evaluate(Some(Exercise::Squat), Some(&frame)).unwrap();
        assert_eq!(judgment.messages, vec![judgment::INVALID_POSE]);
        assert!(judgment.flagged_kinds().unwrap().is_empty());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let frame = squat_frame();
        let first = evaluate(Some(Exercise::Squat), Some(&frame)).unwrap();
        let second = evaluate(Some(Exercise::Squat), Some(&frame)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn valid_frame_delegates_to_the_selected_exercise() {
        let frame = squat_frame();
        let judgment = evaluate(Some(Exercise::PushUp), Some(&frame)).unwrap();
        // Arms are collapsed in this frame, so only the torso rules speak.
        assert!(!judgment.is_clean());
    }

    mod exercise_tests {
        use super::super::Exercise;
        use crate::error::Error;

        #[test]
        fn parses_the_ui_tokens() {
            assert_eq!("squats".parse::<Exercise>().unwrap(), Exercise::Squat);
            assert_eq!("pushups".parse::<Exercise>().unwrap(), Exercise::PushUp);
        }

        #[test]
        fn names_round_trip_through_from_str() {
            for &exercise in &[Exercise::Squat, Exercise::PushUp] {
                assert_eq!(exercise.name().parse::<Exercise>().unwrap(), exercise);
            }
        }

        #[test]
        fn rejects_unknown_kinds() {
            match "deadlifts".parse::<Exercise>() {
                Err(Error::UnknownExercise(kind)) => assert_eq!(kind, "deadlifts"),
                other => panic!("expected UnknownExercise, got {:?}", other),
            }
        }
    }

    mod side_angles_tests {
        use super::super::{SideAngles, TriggeredSides};

        #[test]
        fn reports_the_crossing_side() {
            let angles = SideAngles {
                left: Some(170.0),
                right: Some(150.0),
            };
            assert_eq!(angles.exceeding(160.0), Some(TriggeredSides::Left));

            let angles = SideAngles {
                left: Some(150.0),
                right: Some(170.0),
            };
            assert_eq!(angles.exceeding(160.0), Some(TriggeredSides::Right));

            let angles = SideAngles {
                left: Some(170.0),
                right: Some(170.0),
            };
            assert_eq!(angles.exceeding(160.0), Some(TriggeredSides::Both));
        }

        #[test]
        fn threshold_is_exclusive() {
            let angles = SideAngles {
                left: Some(160.0),
                right: Some(160.0),
            };
            assert_eq!(angles.exceeding(160.0), None);
        }

        #[test]
        fn undefined_sides_never_trigger() {
            let angles = SideAngles {
                left: None,
                right: None,
            };
            assert_eq!(angles.exceeding(160.0), None);
        }
    }
}
