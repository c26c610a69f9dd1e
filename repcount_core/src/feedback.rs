//! Canned feedback for completed reps.

use crate::{ExerciseKind, FeedbackMessage};

pub const SQUAT_REP: &str = "Nice squat! Drive through heels and keep chest up.";
pub const PUSHUP_REP: &str = "Strong push-up! Keep core tight and back straight.";

/// Encouragement text for a completed rep, if the kind has one
pub fn rep_text(kind: ExerciseKind) -> Option<&'static str> {
    match kind {
        ExerciseKind::Squat => Some(SQUAT_REP),
        ExerciseKind::Pushup => Some(PUSHUP_REP),
        // Curls count silently.
        ExerciseKind::BicepCurl | ExerciseKind::Generic => None,
    }
}

pub fn on_rep(kind: ExerciseKind) -> Option<FeedbackMessage> {
    rep_text(kind).map(FeedbackMessage::good)
}
