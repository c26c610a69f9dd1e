//! Frame builders shared by unit tests.

use crate::{Joint, Landmark, LandmarkFrame};

/// Place `end` so the angle origin-vertex-end equals `degrees`
pub(crate) fn point_at_angle(vertex: (f32, f32), toward_origin: (f32, f32), degrees: f32) -> (f32, f32) {
    let base = (toward_origin.1 - vertex.1).atan2(toward_origin.0 - vertex.0);
    let theta = base + degrees.to_radians();
    (vertex.0 + 0.2 * theta.cos(), vertex.1 + 0.2 * theta.sin())
}

/// Per-side joint angles for a synthetic body
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pose {
    pub knee: (f32, f32),
    pub elbow: (f32, f32),
    pub hip: (f32, f32),
}

impl Pose {
    /// Standing, arms straight
    pub fn standing() -> Self {
        Self {
            knee: (175.0, 175.0),
            elbow: (170.0, 170.0),
            hip: (175.0, 175.0),
        }
    }

    pub fn knees(mut self, left: f32, right: f32) -> Self {
        self.knee = (left, right);
        self
    }

    pub fn elbows(mut self, left: f32, right: f32) -> Self {
        self.elbow = (left, right);
        self
    }

    pub fn hips(mut self, left: f32, right: f32) -> Self {
        self.hip = (left, right);
        self
    }
}

fn lm(p: (f32, f32)) -> Landmark {
    Landmark::new(p.0, p.1)
}

/// Build a full frame whose knee, elbow and hip angles match `pose`
pub(crate) fn body_frame(timestamp_ms: f64, pose: Pose) -> LandmarkFrame {
    let mut frame = LandmarkFrame::empty(timestamp_ms);
    let sides = [
        (
            0.4,
            pose.knee.0,
            pose.elbow.0,
            pose.hip.0,
            [
                Joint::LeftHip,
                Joint::LeftKnee,
                Joint::LeftAnkle,
                Joint::LeftShoulder,
                Joint::LeftElbow,
                Joint::LeftWrist,
            ],
        ),
        (
            0.6,
            pose.knee.1,
            pose.elbow.1,
            pose.hip.1,
            [
                Joint::RightHip,
                Joint::RightKnee,
                Joint::RightAnkle,
                Joint::RightShoulder,
                Joint::RightElbow,
                Joint::RightWrist,
            ],
        ),
    ];

    for (x, knee_deg, elbow_deg, hip_deg, [hip_j, knee_j, ankle_j, shoulder_j, elbow_j, wrist_j]) in sides {
        let hip = (x, 0.5);
        let knee = (x, 0.7);
        let ankle = point_at_angle(knee, hip, knee_deg);
        let shoulder = point_at_angle(hip, knee, hip_deg);
        let elbow = (shoulder.0, shoulder.1 + 0.15);
        let wrist = point_at_angle(elbow, shoulder, elbow_deg);

        frame.insert(hip_j, lm(hip));
        frame.insert(knee_j, lm(knee));
        frame.insert(ankle_j, lm(ankle));
        frame.insert(shoulder_j, lm(shoulder));
        frame.insert(elbow_j, lm(elbow));
        frame.insert(wrist_j, lm(wrist));
    }

    frame.insert(Joint::Nose, Landmark::new(0.5, 0.1));
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{AngleCalculator, NamedAngle};

    #[test]
    fn test_body_frame_angles_match_pose() {
        let pose = Pose::standing().knees(80.0, 120.0).elbows(60.0, 150.0).hips(140.0, 155.0);
        let frame = body_frame(0.0, pose);
        let calc = AngleCalculator::default();

        let cases = [
            (NamedAngle::LeftKnee, 80.0),
            (NamedAngle::RightKnee, 120.0),
            (NamedAngle::LeftElbow, 60.0),
            (NamedAngle::RightElbow, 150.0),
            (NamedAngle::LeftHip, 140.0),
            (NamedAngle::RightHip, 155.0),
        ];
        for (name, expected) in cases {
            let measured = calc.measure(&frame, name).unwrap().degrees;
            assert!(
                (measured - expected).abs() < 0.1,
                "{:?}: expected {}, got {}",
                name,
                expected,
                measured
            );
        }
    }
}
