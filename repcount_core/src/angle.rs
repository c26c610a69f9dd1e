//! Joint-angle geometry.
//!
//! Angles are measured at the middle joint of a triple, in the image plane,
//! from the vectors vertex→origin and vertex→end.

use crate::{Joint, Landmark, LandmarkFrame};
use serde::Serialize;

/// Added to the magnitude product so coincident points don't divide by zero
pub const ANGLE_EPSILON: f32 = 1e-6;

/// Landmarks below this visibility are treated as missing
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

/// Angle at `vertex` between `origin` and `end`, in degrees within [0, 180]
pub fn angle_at(origin: &Landmark, vertex: &Landmark, end: &Landmark) -> f32 {
    let ab = (origin.x - vertex.x, origin.y - vertex.y);
    let cb = (end.x - vertex.x, end.y - vertex.y);

    let dot = ab.0 * cb.0 + ab.1 * cb.1;
    let mag_ab = ab.0.hypot(ab.1);
    let mag_cb = cb.0.hypot(cb.1);

    let cos = (dot / (mag_ab * mag_cb + ANGLE_EPSILON)).clamp(-1.0, 1.0);
    cos.acos().to_degrees().clamp(0.0, 180.0)
}

/// Three joints whose middle member is the vertex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct JointTriple {
    pub origin: Joint,
    pub vertex: Joint,
    pub end: Joint,
}

/// The angles the classifier and quick check look at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedAngle {
    LeftKnee,
    RightKnee,
    LeftElbow,
    RightElbow,
    LeftHip,
    RightHip,
}

impl NamedAngle {
    pub fn triple(self) -> JointTriple {
        use Joint::*;
        let (origin, vertex, end) = match self {
            NamedAngle::LeftKnee => (LeftHip, LeftKnee, LeftAnkle),
            NamedAngle::RightKnee => (RightHip, RightKnee, RightAnkle),
            NamedAngle::LeftElbow => (LeftShoulder, LeftElbow, LeftWrist),
            NamedAngle::RightElbow => (RightShoulder, RightElbow, RightWrist),
            NamedAngle::LeftHip => (LeftShoulder, LeftHip, LeftKnee),
            NamedAngle::RightHip => (RightShoulder, RightHip, RightKnee),
        };
        JointTriple {
            origin,
            vertex,
            end,
        }
    }
}

/// A measured angle for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct JointAngle {
    pub name: NamedAngle,
    pub degrees: f32,
}

/// Measures named angles on a frame, ignoring low-visibility landmarks
#[derive(Clone, Copy, Debug)]
pub struct AngleCalculator {
    min_visibility: f32,
}

impl Default for AngleCalculator {
    fn default() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}

impl AngleCalculator {
    pub fn new(min_visibility: f32) -> Self {
        Self { min_visibility }
    }

    pub fn min_visibility(&self) -> f32 {
        self.min_visibility
    }

    fn landmark<'a>(&self, frame: &'a LandmarkFrame, joint: Joint) -> Option<&'a Landmark> {
        frame
            .get(joint)
            .filter(|lm| lm.visibility >= self.min_visibility)
    }

    /// Angle for an arbitrary triple; None when any joint is missing or occluded
    ///
    /// Non-finite coordinates also yield None, since NaN survives `clamp`.
    pub fn triple_angle(&self, frame: &LandmarkFrame, triple: JointTriple) -> Option<f32> {
        let a = self.landmark(frame, triple.origin)?;
        let b = self.landmark(frame, triple.vertex)?;
        let c = self.landmark(frame, triple.end)?;
        Some(angle_at(a, b, c)).filter(|deg| deg.is_finite())
    }

    pub fn measure(&self, frame: &LandmarkFrame, name: NamedAngle) -> Option<JointAngle> {
        self.triple_angle(frame, name.triple())
            .map(|degrees| JointAngle { name, degrees })
    }

    /// Smaller of two symmetric angles, tolerating one side being out of view
    pub fn min_of(&self, frame: &LandmarkFrame, left: NamedAngle, right: NamedAngle) -> Option<f32> {
        let l = self.measure(frame, left).map(|a| a.degrees);
        let r = self.measure(frame, right).map(|a| a.degrees);
        match (l, r) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (one, other) => one.or(other),
        }
    }
}
