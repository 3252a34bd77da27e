//! Stage timing collection
//!
//! The pipeline never prints timings itself. Callers that want them pass a
//! [`TimingCollector`]; [`StageTimings`] simply keeps every measurement.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A step of the meshing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Mask,
    Extract,
    Prepare,
    /// Strip generation and packing of one level
    Pack { mip: usize },
    /// Simplification producing one level
    Simplify { mip: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Mask => write!(f, "mask"),
            Stage::Extract => write!(f, "extract"),
            Stage::Prepare => write!(f, "prepare"),
            Stage::Pack { mip } => write!(f, "pack[{}]", mip),
            Stage::Simplify { mip } => write!(f, "simplify[{}]", mip),
        }
    }
}

/// Receives the duration of each pipeline stage as it completes
pub trait TimingCollector {
    fn record(&mut self, stage: Stage, elapsed: Duration);
}

/// One recorded measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed: Duration,
}

/// Collects every measurement in the order it was recorded
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageTimings {
    entries: Vec<StageTiming>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageTiming> {
        self.entries.iter()
    }

    /// Time spent in `stage`, summed over repeated records
    pub fn get(&self, stage: Stage) -> Option<Duration> {
        let mut matching = self.entries.iter().filter(|e| e.stage == stage).peekable();
        matching.peek()?;
        Some(matching.map(|e| e.elapsed).sum())
    }

    pub fn total(&self) -> Duration {
        self.entries.iter().map(|e| e.elapsed).sum()
    }
}

impl TimingCollector for StageTimings {
    fn record(&mut self, stage: Stage, elapsed: Duration) {
        self.entries.push(StageTiming { stage, elapsed });
    }
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let millis = entry.elapsed.as_secs_f64() * 1e3;
            writeln!(f, "{:<12} {:>10.3} ms", entry.stage.to_string(), millis)?;
        }
        write!(f, "{:<12} {:>10.3} ms", "total", self.total().as_secs_f64() * 1e3)
    }
}
