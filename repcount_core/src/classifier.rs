//! Per-exercise hysteresis classifier.
//!
//! Each exercise kind maps to a profile: which symmetric angle pair to read,
//! the (down, up) threshold pair, and whether a completed rep earns feedback.
//! The phase machine itself is shared by every kind:
//!
//! - Up, angle < down  → Down (no rep yet)
//! - Down, angle > up  → Up, one completed rep
//! - anything else     → unchanged
//!
//! Comparisons are strict, so an angle sitting exactly on a threshold never
//! crosses it.

use crate::angle::{AngleCalculator, NamedAngle};
use crate::{Error, ExerciseKind, ExercisePhase, LandmarkFrame, Result, ThresholdPair};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

/// Built-in profile table, built once and shared
static DEFAULT_TABLE: Lazy<ExerciseTable> = Lazy::new(build_default_table);

/// Which symmetric angle pair stands for the whole body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleSelector {
    Knees,
    Elbows,
}

impl AngleSelector {
    pub fn sides(self) -> (NamedAngle, NamedAngle) {
        match self {
            AngleSelector::Knees => (NamedAngle::LeftKnee, NamedAngle::RightKnee),
            AngleSelector::Elbows => (NamedAngle::LeftElbow, NamedAngle::RightElbow),
        }
    }

    /// Minimum of the left/right angle; None when neither side is measurable
    pub fn representative(self, calc: &AngleCalculator, frame: &LandmarkFrame) -> Option<f32> {
        let (left, right) = self.sides();
        calc.min_of(frame, left, right)
    }
}

/// Counting rule for one exercise kind
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExerciseProfile {
    pub kind: ExerciseKind,
    pub selector: AngleSelector,
    pub thresholds: ThresholdPair,
    pub feedback_on_rep: bool,
}

/// Outcome of feeding one angle to the phase machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    EnteredDown,
    CompletedRep,
}

/// Advance the phase machine by one angle sample
pub fn classify(
    phase: ExercisePhase,
    angle: f32,
    thresholds: &ThresholdPair,
) -> (ExercisePhase, Transition) {
    match phase {
        ExercisePhase::Up if angle < thresholds.down() => {
            (ExercisePhase::Down, Transition::EnteredDown)
        }
        ExercisePhase::Down if angle > thresholds.up() => {
            (ExercisePhase::Up, Transition::CompletedRep)
        }
        _ => (phase, Transition::Unchanged),
    }
}

/// Exercise kind → counting profile
///
/// Kinds without an entry (generic) have no counting rule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExerciseTable {
    profiles: BTreeMap<ExerciseKind, ExerciseProfile>,
}

fn build_default_table() -> ExerciseTable {
    let entries = [
        (ExerciseKind::Squat, AngleSelector::Knees, 85.0, 160.0, true),
        (ExerciseKind::Pushup, AngleSelector::Elbows, 75.0, 160.0, true),
        (ExerciseKind::BicepCurl, AngleSelector::Elbows, 60.0, 150.0, false),
    ];

    let profiles = entries
        .into_iter()
        .map(|(kind, selector, down, up, feedback_on_rep)| {
            (
                kind,
                ExerciseProfile {
                    kind,
                    selector,
                    thresholds: ThresholdPair::builtin(down, up),
                    feedback_on_rep,
                },
            )
        })
        .collect();

    ExerciseTable { profiles }
}

impl Default for ExerciseTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl ExerciseTable {
    /// Shared reference to the built-in table
    pub fn builtin() -> &'static ExerciseTable {
        &DEFAULT_TABLE
    }

    pub fn get(&self, kind: ExerciseKind) -> Option<&ExerciseProfile> {
        self.profiles.get(&kind)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &ExerciseProfile> {
        self.profiles.values()
    }

    /// Replace the thresholds of a kind that already has a counting rule
    pub fn set_thresholds(&mut self, kind: ExerciseKind, thresholds: ThresholdPair) -> Result<()> {
        match self.profiles.get_mut(&kind) {
            Some(profile) => {
                profile.thresholds = thresholds;
                Ok(())
            }
            None => Err(Error::InvalidConfiguration(format!(
                "exercise '{}' has no rep-counting rule; thresholds cannot be set",
                kind
            ))),
        }
    }
}
