//! Core domain types for the repcount engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Joints and landmarks as reported by the pose estimator
//! - Exercise kinds, phases and threshold pairs
//! - Session state and the events a session emits

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Joints and Landmarks
// ============================================================================

/// A tracked body joint.
///
/// Discriminants are the pose model's landmark indices, so a flat landmark
/// list from the estimator maps straight onto this enum.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
}

impl Joint {
    pub const ALL: [Joint; 21] = [
        Joint::Nose,
        Joint::LeftEyeInner,
        Joint::LeftEye,
        Joint::LeftEyeOuter,
        Joint::RightEyeInner,
        Joint::RightEye,
        Joint::RightEyeOuter,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Landmark index in the estimator's output
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map an estimator index back to a joint (untracked indices give None)
    pub fn from_index(index: usize) -> Option<Joint> {
        Self::ALL.iter().copied().find(|j| j.index() == index)
    }
}

fn default_visibility() -> f32 {
    1.0
}

/// One estimated joint position in normalized image coordinates
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth; carried through but never used for geometry
    #[serde(default)]
    pub z: f32,
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

impl Landmark {
    /// Fully visible landmark at (x, y)
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: default_visibility(),
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }
}

/// All landmarks the estimator produced for a single video frame
///
/// An empty frame means the estimator found nobody in view.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp_ms: f64,
    #[serde(default)]
    pub landmarks: BTreeMap<Joint, Landmark>,
}

impl LandmarkFrame {
    /// A frame with no detected person
    pub fn empty(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            landmarks: BTreeMap::new(),
        }
    }

    /// Build a frame from the estimator's index-ordered landmark list
    pub fn from_indexed(timestamp_ms: f64, landmarks: &[Landmark]) -> Self {
        let landmarks = landmarks
            .iter()
            .enumerate()
            .filter_map(|(i, lm)| Joint::from_index(i).map(|j| (j, *lm)))
            .collect();
        Self {
            timestamp_ms,
            landmarks,
        }
    }

    /// Builder-style insert
    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.landmarks.insert(joint, landmark);
        self
    }

    pub fn insert(&mut self, joint: Joint, landmark: Landmark) {
        self.landmarks.insert(joint, landmark);
    }

    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks.get(&joint)
    }

    /// True when no person was detected
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// The closed set of exercises the classifier knows about
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squat,
    Pushup,
    BicepCurl,
    Generic,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Squat,
        ExerciseKind::Pushup,
        ExerciseKind::BicepCurl,
        ExerciseKind::Generic,
    ];

    /// Canonical name, as used in config files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::BicepCurl => "bicep_curl",
            ExerciseKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "squat" | "squats" => Ok(ExerciseKind::Squat),
            "pushup" | "pushups" | "push-up" | "push_up" => Ok(ExerciseKind::Pushup),
            "bicep_curl" | "bicep-curl" | "curl" => Ok(ExerciseKind::BicepCurl),
            "generic" => Ok(ExerciseKind::Generic),
            _ => Err(Error::UnknownExercise(s.to_string())),
        }
    }
}

/// Which half of a repetition the body is currently in
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExercisePhase {
    #[default]
    Up,
    Down,
}

/// Hysteresis thresholds in degrees; `down` is always strictly below `up`
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct ThresholdPair {
    down: f32,
    up: f32,
}

impl ThresholdPair {
    /// Validate and build a threshold pair
    pub fn new(down: f32, up: f32) -> Result<Self> {
        if !down.is_finite() || !up.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "thresholds must be finite (down={}, up={})",
                down, up
            )));
        }
        if !(0.0..=180.0).contains(&down) || !(0.0..=180.0).contains(&up) {
            return Err(Error::InvalidConfiguration(format!(
                "thresholds must lie in [0, 180] degrees (down={}, up={})",
                down, up
            )));
        }
        if down >= up {
            return Err(Error::InvalidConfiguration(format!(
                "down threshold {} must be below up threshold {}",
                down, up
            )));
        }
        Ok(Self { down, up })
    }

    /// Built-in pairs that are known to satisfy the invariant
    pub(crate) const fn builtin(down: f32, up: f32) -> Self {
        Self { down, up }
    }

    pub fn down(&self) -> f32 {
        self.down
    }

    pub fn up(&self) -> f32 {
        self.up
    }
}

// ============================================================================
// Session and Event Types
// ============================================================================

/// Running state of one monitoring session, owned by the caller
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub id: Uuid,
    pub kind: ExerciseKind,
    pub phase: ExercisePhase,
    pub reps: u32,
    pub sets: u32,
}

impl SessionState {
    /// Fresh session: phase Up, no reps, first set
    pub fn new(kind: ExerciseKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            phase: ExercisePhase::Up,
            reps: 0,
            sets: 1,
        }
    }
}

/// Emitted once for every completed Down→Up cycle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RepEvent {
    pub session_id: Uuid,
    pub kind: ExerciseKind,
    pub timestamp_ms: f64,
    pub reps: u32,
    pub sets: u32,
    /// This rep closed a set; `sets` already names the next one
    #[serde(default)]
    pub completes_set: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Good => f.write_str("good"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Short qualitative message for the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub severity: Severity,
    pub text: String,
}

impl FeedbackMessage {
    pub fn good(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Good,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

impl fmt::Display for FeedbackMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_index_roundtrip() {
        for joint in Joint::ALL {
            assert_eq!(Joint::from_index(joint.index()), Some(joint));
        }
        assert_eq!(Joint::from_index(9), None);
        assert_eq!(Joint::from_index(32), None);
    }

    #[test]
    fn test_frame_from_indexed_skips_untracked() {
        let list: Vec<Landmark> = (0..33).map(|i| Landmark::new(i as f32, 0.0)).collect();
        let frame = LandmarkFrame::from_indexed(5.0, &list);

        assert_eq!(frame.landmarks.len(), Joint::ALL.len());
        assert_eq!(frame.get(Joint::LeftKnee).map(|l| l.x), Some(25.0));
        assert_eq!(frame.timestamp_ms, 5.0);
    }

    #[test]
    fn test_exercise_kind_parsing() {
        assert_eq!("squat".parse::<ExerciseKind>().unwrap(), ExerciseKind::Squat);
        assert_eq!("Push-Up".parse::<ExerciseKind>().unwrap(), ExerciseKind::Pushup);
        assert_eq!("curl".parse::<ExerciseKind>().unwrap(), ExerciseKind::BicepCurl);

        let err = "deadlift".parse::<ExerciseKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownExercise(ref s) if s == "deadlift"));
    }

    #[test]
    fn test_threshold_pair_validation() {
        assert!(ThresholdPair::new(85.0, 160.0).is_ok());
        assert!(ThresholdPair::new(160.0, 85.0).is_err());
        assert!(ThresholdPair::new(90.0, 90.0).is_err());
        assert!(ThresholdPair::new(-1.0, 90.0).is_err());
        assert!(ThresholdPair::new(10.0, 181.0).is_err());
        assert!(ThresholdPair::new(f32::NAN, 90.0).is_err());
    }

    #[test]
    fn test_new_session_defaults() {
        let state = SessionState::new(ExerciseKind::Pushup);
        assert_eq!(state.phase, ExercisePhase::Up);
        assert_eq!(state.reps, 0);
        assert_eq!(state.sets, 1);
    }

    #[test]
    fn test_frame_json_shape() {
        let json = r#"{"timestamp_ms": 12.5, "landmarks": {"left_knee": {"x": 0.5, "y": 0.6}}}"#;
        let frame: LandmarkFrame = serde_json::from_str(json).unwrap();

        let knee = frame.get(Joint::LeftKnee).unwrap();
        assert_eq!(knee.visibility, 1.0);
        assert_eq!(knee.z, 0.0);
    }
}
