//! One-shot posture check on a single frame.
//!
//! Independent of any running session. Only squat has a real rule today;
//! every other kind gets generic encouragement regardless of the angles.

use crate::angle::{AngleCalculator, NamedAngle};
use crate::{ExerciseKind, FeedbackMessage, LandmarkFrame};

pub const NO_PERSON: &str = "No person detected. Ensure full body is in frame.";
pub const SQUAT_SETUP_OK: &str = "Good setup! Maintain neutral spine and track knees over toes.";
pub const SQUAT_STAND_TALL: &str = "Stand tall, engage core, and keep chest up before starting.";
pub const GENERIC_OK: &str = "Form looks decent. Keep core engaged and control movement.";

/// Hip must be flexed below this for a squat setup to pass
pub const SQUAT_HIP_MAX: f32 = 150.0;
/// Knee must be flexed below this for a squat setup to pass
pub const SQUAT_KNEE_MAX: f32 = 170.0;

/// Evaluate a single frame for the given exercise
pub fn evaluate(calc: &AngleCalculator, kind: ExerciseKind, frame: &LandmarkFrame) -> FeedbackMessage {
    if frame.is_empty() {
        return FeedbackMessage::warning(NO_PERSON);
    }

    match kind {
        ExerciseKind::Squat => squat_setup(calc, frame),
        ExerciseKind::Pushup | ExerciseKind::BicepCurl | ExerciseKind::Generic => {
            FeedbackMessage::good(GENERIC_OK)
        }
    }
}

fn squat_setup(calc: &AngleCalculator, frame: &LandmarkFrame) -> FeedbackMessage {
    let hip = calc.min_of(frame, NamedAngle::LeftHip, NamedAngle::RightHip);
    let knee = calc.measure(frame, NamedAngle::LeftKnee).map(|a| a.degrees);

    tracing::debug!(?hip, ?knee, "Squat quick check");

    match (hip, knee) {
        (Some(hip), Some(knee)) if hip < SQUAT_HIP_MAX && knee < SQUAT_KNEE_MAX => {
            FeedbackMessage::good(SQUAT_SETUP_OK)
        }
        // Unmeasurable joints can't confirm a setup.
        _ => FeedbackMessage::warning(SQUAT_STAND_TALL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{body_frame, Pose};
    use crate::{Joint, Severity};

    fn check(kind: ExerciseKind, frame: &LandmarkFrame) -> FeedbackMessage {
        evaluate(&AngleCalculator::default(), kind, frame)
    }

    #[test]
    fn test_empty_frame_warns_no_person() {
        for kind in ExerciseKind::ALL {
            let msg = check(kind, &LandmarkFrame::empty(0.0));
            assert_eq!(msg, FeedbackMessage::warning(NO_PERSON));
        }
    }

    #[test]
    fn test_squat_setup_accepted() {
        let frame = body_frame(0.0, Pose::standing().hips(140.0, 145.0).knees(160.0, 175.0));
        let msg = check(ExerciseKind::Squat, &frame);
        assert_eq!(msg.severity, Severity::Good);
        assert_eq!(msg.text, SQUAT_SETUP_OK);
    }

    #[test]
    fn test_squat_upright_hip_warns() {
        let frame = body_frame(0.0, Pose::standing().hips(155.0, 155.0).knees(160.0, 160.0));
        let msg = check(ExerciseKind::Squat, &frame);
        assert_eq!(msg, FeedbackMessage::warning(SQUAT_STAND_TALL));
    }

    #[test]
    fn test_squat_straight_left_knee_warns() {
        // Only the left knee is consulted.
        let frame = body_frame(0.0, Pose::standing().hips(140.0, 140.0).knees(175.0, 120.0));
        let msg = check(ExerciseKind::Squat, &frame);
        assert_eq!(msg.severity, Severity::Warning);
    }

    #[test]
    fn test_squat_missing_knee_warns() {
        let mut frame = body_frame(0.0, Pose::standing().hips(140.0, 140.0).knees(160.0, 160.0));
        frame.landmarks.remove(&Joint::LeftAnkle);
        let msg = check(ExerciseKind::Squat, &frame);
        assert_eq!(msg.severity, Severity::Warning);
    }

    #[test]
    fn test_other_kinds_always_pass() {
        // Angles are deliberately poor; no rule exists for these kinds.
        let frame = body_frame(0.0, Pose::standing().hips(179.0, 179.0));
        for kind in [ExerciseKind::Pushup, ExerciseKind::BicepCurl, ExerciseKind::Generic] {
            assert_eq!(check(kind, &frame), FeedbackMessage::good(GENERIC_OK));
        }
    }
}
