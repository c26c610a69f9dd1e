//! Captured estimator output in JSON Lines form.
//!
//! A frame log holds one [`LandmarkFrame`] per line. The capture side may
//! still be writing, so readers hold a shared lock while scanning.

use crate::{LandmarkFrame, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every frame from a frame log
///
/// Blank lines are ignored. A line that fails to parse is logged and read as
/// an empty frame (nobody detected) stamped with the previous frame's time, so
/// it is counted and skipped like any other frame without a person.
pub fn read_frames(path: &Path) -> Result<Vec<LandmarkFrame>> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut frames: Vec<LandmarkFrame> = Vec::new();
    let mut malformed = 0usize;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<LandmarkFrame>(&line) {
            Ok(frame) => frames.push(frame),
            Err(e) => {
                tracing::warn!("Malformed frame at line {}: {}", line_num + 1, e);
                let t = frames.last().map_or(0.0, |f| f.timestamp_ms);
                frames.push(LandmarkFrame::empty(t));
                malformed += 1;
            }
        }
    }

    file.unlock()?;
    tracing::debug!(
        "Read {} frames ({} malformed) from {:?}",
        frames.len(),
        malformed,
        path
    );
    Ok(frames)
}

/// Read a single JSON frame (used for one-shot quick checks)
pub fn read_frame(path: &Path) -> Result<LandmarkFrame> {
    let contents = std::fs::read_to_string(path)?;
    let frame = serde_json::from_str(&contents)?;
    Ok(frame)
}
