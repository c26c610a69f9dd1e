//! Monitoring lifecycle around a single session.
//!
//! The frame path ([`Monitor::process_frame`]) and the stop path are the only
//! writers of the session state. A stop can be requested from anywhere through
//! a [`StopHandle`]; the frame path checks the flag before every mutation, so
//! once a stop is requested no further frame can change the counts.

use crate::engine::{Engine, SkipReason, StepOutcome};
use crate::{Error, ExerciseKind, LandmarkFrame, Result, SessionState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Cloneable request-to-stop flag for a running monitor
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Final tally of a monitoring session
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub kind: ExerciseKind,
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
    pub reps: u32,
    pub sets: u32,
    pub frames_processed: u64,
    pub frames_skipped: u64,
}

impl SessionSummary {
    pub fn duration_seconds(&self) -> i64 {
        (self.stopped_at - self.started_at).num_seconds()
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Session complete: {} reps across {} sets",
            self.reps, self.sets
        )
    }
}

#[derive(Debug)]
struct ActiveSession {
    state: SessionState,
    started_at: DateTime<Utc>,
    frames_processed: u64,
    frames_skipped: u64,
    last_timestamp_ms: Option<f64>,
}

/// Owns the session state between frames
#[derive(Debug)]
pub struct Monitor {
    engine: Engine,
    active: Option<ActiveSession>,
    stop: StopHandle,
}

impl Monitor {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            active: None,
            stop: StopHandle::default(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Start a fresh session; fails if one is already running
    pub fn start(&mut self, kind: ExerciseKind) -> Result<SessionState> {
        if self.active.is_some() {
            return Err(Error::Monitor("monitoring is already running".into()));
        }

        let state = self.engine.reset_session(kind);
        self.stop.clear();
        self.active = Some(ActiveSession {
            state,
            started_at: Utc::now(),
            frames_processed: 0,
            frames_skipped: 0,
            last_timestamp_ms: None,
        });

        tracing::info!(session = %state.id, %kind, "Monitoring started");
        Ok(state)
    }

    /// Handle that stops frame processing
    ///
    /// Every handle shares one flag with the monitor, so a handle taken
    /// before `start` still stops the session that `start` opens.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// True while a session is running and no stop has been requested
    pub fn is_monitoring(&self) -> bool {
        self.active.is_some() && !self.stop.is_stop_requested()
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.active.as_ref().map(|a| &a.state)
    }

    /// Feed one frame; returns None when not monitoring or a stop is pending
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Option<StepOutcome> {
        if self.stop.is_stop_requested() {
            return None;
        }
        let active = self.active.as_mut()?;

        if let Some(last) = active.last_timestamp_ms {
            if frame.timestamp_ms < last {
                tracing::debug!(
                    last,
                    t = frame.timestamp_ms,
                    "Frame timestamp went backwards; processing as delivered"
                );
            }
        }
        active.last_timestamp_ms = Some(frame.timestamp_ms);

        let outcome = self.engine.step(&active.state, frame);
        active.state = outcome.state;
        active.frames_processed += 1;
        if let Some(reason) = outcome.skipped {
            if reason != SkipReason::NoRule {
                active.frames_skipped += 1;
            }
        }

        Some(outcome)
    }

    /// Stop monitoring and summarize; None if nothing was running
    pub fn stop(&mut self) -> Option<SessionSummary> {
        self.stop.request_stop();
        let active = self.active.take()?;

        let summary = SessionSummary {
            session_id: active.state.id,
            kind: active.state.kind,
            started_at: active.started_at,
            stopped_at: Utc::now(),
            reps: active.state.reps,
            sets: active.state.sets,
            frames_processed: active.frames_processed,
            frames_skipped: active.frames_skipped,
        };

        tracing::info!(
            session = %summary.session_id,
            reps = summary.reps,
            sets = summary.sets,
            frames = summary.frames_processed,
            "Monitoring stopped"
        );
        Some(summary)
    }
}
