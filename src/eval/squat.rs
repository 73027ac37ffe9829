use crate::{
    error::Error,
    eval::{geometry, Judgment, SideAngles},
    pose::{keypoint, KeypointKind::*, Keypoints},
};

const BACK_LEAN_MIN_DEGREES: f32 = 70.0;
const KNEE_STRAIGHT_MAX_DEGREES: f32 = 160.0;
// How far below mid-hip the vertical reference point sits, in normalized y.
const BACK_REFERENCE_DROP: f32 = 0.1;

const LEANED_FORWARD: &str = "Leaned forward too much";
const KEEP_BACK_STRAIGHTER: &str = "Keep back straighter";
const BEND_KNEES_MORE: &str = "Bend knees more";
const KNEES_TOO_STRAIGHT: &str = "Knees too straight";

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Evaluator {}

impl crate::eval::Evaluator for Evaluator {
    fn name(&self) -> &'static str {
        "squats"
    }

    fn evaluate(&self, keypoints: &Keypoints) -> Result<Judgment, Error> {
        let mut judgment = Judgment::correct();

        // Trunk orientation, measured at mid-hip against a point straight
        // below it. An upright back reads near 180, forward lean collapses
        // the angle.
        let mid_shoulder = geometry::midpoint(
            keypoint(keypoints, LeftShoulder)?,
            keypoint(keypoints, RightShoulder)?,
        )?;
        let mid_hip = geometry::midpoint(
            keypoint(keypoints, LeftHip)?,
            keypoint(keypoints, RightHip)?,
        )?;
        let below_hip = mid_hip.translate_y(BACK_REFERENCE_DROP)?;

        if let Some(back_angle) = geometry::angle_at(below_hip, mid_hip, mid_shoulder) {
            if back_angle < BACK_LEAN_MIN_DEGREES {
                judgment.report(LEANED_FORWARD);
                judgment.flag(&[LeftShoulder, RightShoulder, LeftHip, RightHip])?;
                judgment.annotate(LeftHip, KEEP_BACK_STRAIGHTER);
            }
        }

        let knees = SideAngles {
            left: geometry::angle_at(
                keypoint(keypoints, LeftHip)?,
                keypoint(keypoints, LeftKnee)?,
                keypoint(keypoints, LeftAnkle)?,
            ),
            right: geometry::angle_at(
                keypoint(keypoints, RightHip)?,
                keypoint(keypoints, RightKnee)?,
                keypoint(keypoints, RightAnkle)?,
            ),
        };
        // One straight leg flags both knees.
        if knees.exceeding(KNEE_STRAIGHT_MAX_DEGREES).is_some() {
            judgment.report(BEND_KNEES_MORE);
            judgment.flag(&[LeftKnee, RightKnee])?;
            judgment.annotate(LeftKnee, KNEES_TOO_STRAIGHT);
        }

        Ok(judgment)
    }
}
