//! Per-frame classification engine.
//!
//! The engine is a pure function of `(state, frame) → outcome`. It owns no
//! timer, thread or loop: the host calls [`Engine::step`] once per available
//! frame and keeps the returned [`SessionState`] for the next call.
//!
//! Frames must arrive in non-decreasing timestamp order. Nothing here
//! reorders them.

use crate::angle::AngleCalculator;
use crate::classifier::{classify, ExerciseProfile, ExerciseTable, Transition};
use crate::counter::RepCounter;
use crate::{
    feedback, quick_check, Config, ExerciseKind, FeedbackMessage, LandmarkFrame, RepEvent, Result,
    SessionState,
};

/// Why a frame left the session untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The estimator saw nobody
    NoDetection,
    /// The representative joints were missing or occluded
    UndefinedAngle,
    /// The exercise kind has no counting rule
    NoRule,
}

/// Everything one call to [`Engine::step`] produces
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub state: SessionState,
    pub rep: Option<RepEvent>,
    pub feedback: Option<FeedbackMessage>,
    pub skipped: Option<SkipReason>,
}

impl StepOutcome {
    fn skipped(state: &SessionState, reason: SkipReason) -> Self {
        Self {
            state: *state,
            rep: None,
            feedback: None,
            skipped: Some(reason),
        }
    }
}

/// Validated engine configuration
#[derive(Clone, Debug)]
pub struct Engine {
    table: ExerciseTable,
    counter: RepCounter,
    angles: AngleCalculator,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            table: ExerciseTable::default(),
            counter: RepCounter::default(),
            angles: AngleCalculator::default(),
        }
    }
}

impl Engine {
    /// Build an engine, rejecting any configuration it could not honor
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let engine = Self {
            table: config.exercise_table()?,
            counter: RepCounter::new(config.engine.set_size)?,
            angles: AngleCalculator::new(config.engine.min_visibility),
        };
        tracing::debug!(
            set_size = engine.counter.set_size(),
            min_visibility = engine.angles.min_visibility(),
            "Engine configured"
        );
        Ok(engine)
    }

    pub fn table(&self) -> &ExerciseTable {
        &self.table
    }

    pub fn profile(&self, kind: ExerciseKind) -> Option<&ExerciseProfile> {
        self.table.get(kind)
    }

    pub fn set_size(&self) -> u32 {
        self.counter.set_size()
    }

    /// Fresh session: phase Up, zero reps, set 1
    pub fn reset_session(&self, kind: ExerciseKind) -> SessionState {
        let state = SessionState::new(kind);
        tracing::debug!(session = %state.id, %kind, "Session reset");
        state
    }

    /// Advance a session by one frame
    pub fn step(&self, state: &SessionState, frame: &LandmarkFrame) -> StepOutcome {
        if frame.is_empty() {
            return StepOutcome::skipped(state, SkipReason::NoDetection);
        }

        let Some(profile) = self.table.get(state.kind) else {
            return StepOutcome::skipped(state, SkipReason::NoRule);
        };

        let Some(angle) = profile.selector.representative(&self.angles, frame) else {
            tracing::trace!(t = frame.timestamp_ms, "Representative angle undefined, skipping");
            return StepOutcome::skipped(state, SkipReason::UndefinedAngle);
        };

        let (phase, transition) = classify(state.phase, angle, &profile.thresholds);
        let mut next = SessionState { phase, ..*state };

        match transition {
            Transition::Unchanged => StepOutcome {
                state: next,
                rep: None,
                feedback: None,
                skipped: None,
            },
            Transition::EnteredDown => {
                tracing::debug!(
                    session = %state.id,
                    angle,
                    t = frame.timestamp_ms,
                    "Entered down phase"
                );
                StepOutcome {
                    state: next,
                    rep: None,
                    feedback: None,
                    skipped: None,
                }
            }
            Transition::CompletedRep => {
                next = self.counter.record_rep(&next);
                let event = RepEvent {
                    session_id: next.id,
                    kind: next.kind,
                    timestamp_ms: frame.timestamp_ms,
                    reps: next.reps,
                    sets: next.sets,
                    completes_set: self.counter.completes_set(next.reps),
                };
                let feedback = if profile.feedback_on_rep {
                    feedback::on_rep(next.kind)
                } else {
                    None
                };

                tracing::info!(
                    session = %next.id,
                    kind = %next.kind,
                    reps = next.reps,
                    sets = next.sets,
                    "Rep completed"
                );
                if event.completes_set {
                    tracing::info!(session = %next.id, next_set = next.sets, "Set completed");
                }

                StepOutcome {
                    state: next,
                    rep: Some(event),
                    feedback,
                    skipped: None,
                }
            }
        }
    }

    /// Stateless single-frame posture check
    pub fn quick_check(&self, kind: ExerciseKind, frame: &LandmarkFrame) -> FeedbackMessage {
        quick_check::evaluate(&self.angles, kind, frame)
    }
}
