use crate::{
    error::Error,
    eval::{geometry, Judgment, SideAngles},
    pose::{keypoint, KeypointKind::*, Keypoints},
};

const ELBOW_STRAIGHT_MAX_DEGREES: f32 = 160.0;
// Minimum normalized-y gap between shoulders and hips in a plank.
const TORSO_DROP_MARGIN: f32 = 0.1;

const LOWER_ELBOWS: &str = "Lower elbows more";
const BEND_ELBOWS: &str = "Bend elbows";
const LOWER_CHEST: &str = "Lower your chest";
const CHEST_TOO_HIGH: &str = "Chest too high";
const DONT_SAG_BACK: &str = "Don't sag your back";
const BACK_SAGGING: &str = "Back sagging";

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Evaluator {}

impl crate::eval::Evaluator for Evaluator {
    fn name(&self) -> &'static str {
        "pushups"
    }

    fn evaluate(&self, keypoints: &Keypoints) -> Result<Judgment, Error> {
        let mut judgment = Judgment::correct();

        let elbows = SideAngles {
            left: geometry::angle_at(
                keypoint(keypoints, LeftShoulder)?,
                keypoint(keypoints, LeftElbow)?,
                keypoint(keypoints, LeftWrist)?,
            ),
            right: geometry::angle_at(
                keypoint(keypoints, RightShoulder)?,
                keypoint(keypoints, RightElbow)?,
                keypoint(keypoints, RightWrist)?,
            ),
        };
        // One straight arm flags both elbows.
        if elbows.exceeding(ELBOW_STRAIGHT_MAX_DEGREES).is_some() {
            judgment.report(LOWER_ELBOWS);
            judgment.flag(&[LeftElbow, RightElbow])?;
            judgment.annotate(LeftElbow, BEND_ELBOWS);
        }

        let shoulder_y = geometry::midpoint(
            keypoint(keypoints, LeftShoulder)?,
            keypoint(keypoints, RightShoulder)?,
        )?
        .y();
        let hip_y = geometry::midpoint(
            keypoint(keypoints, LeftHip)?,
            keypoint(keypoints, RightHip)?,
        )?
        .y();

        // The two torso checks are opposite thresholds on the same
        // measurement; both run every frame, no early exit.
        if shoulder_y > hip_y - TORSO_DROP_MARGIN {
            judgment.report(LOWER_CHEST);
            judgment.flag(&[LeftShoulder, RightShoulder])?;
            judgment.annotate(LeftShoulder, CHEST_TOO_HIGH);
        }

        if hip_y > shoulder_y + TORSO_DROP_MARGIN {
            judgment.report(DONT_SAG_BACK);
            judgment.flag(&[LeftHip, RightHip])?;
            judgment.annotate(LeftHip, BACK_SAGGING);
        }

        Ok(judgment)
    }
}
