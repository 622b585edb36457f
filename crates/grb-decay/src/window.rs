use std::fmt;

use grb_core::errors::{DecayError, ErrorInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::check_interval;

/// Largest number of windows a linear or log schedule may expand to.
pub const MAX_SCHEDULE_WINDOWS: usize = 100_000;

fn schedule_error(code: &str, message: impl Into<String>) -> DecayError {
    DecayError::Config(ErrorInfo::new(code, message.into()))
}

/// Closed observation interval `[t_min, t_max]` in absolute seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationWindow {
    /// Window start.
    pub t_min: f64,
    /// Window stop, strictly after `t_min`.
    pub t_max: f64,
}

impl ObservationWindow {
    /// Creates a validated window.
    pub fn new(t_min: f64, t_max: f64) -> Result<Self, DecayError> {
        check_interval(t_min, t_max)?;
        Ok(Self { t_min, t_max })
    }

    /// Creates a window from a start time and a live-time duration.
    pub fn from_livetime(start: f64, livetime: f64) -> Result<Self, DecayError> {
        if livetime <= 0.0 || !livetime.is_finite() {
            return Err(DecayError::Parameter(
                ErrorInfo::new("non_positive_livetime", "livetime must be positive and finite")
                    .with_context("start", start)
                    .with_context("livetime", livetime),
            ));
        }
        Self::new(start, start + livetime)
    }

    /// Elapsed wall-clock duration of the window.
    pub fn duration(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Centre of the window.
    pub fn midpoint(&self) -> f64 {
        self.t_min + 0.5 * self.duration()
    }
}

impl fmt::Display for ObservationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.t_min, self.t_max)
    }
}

/// Window layouts expressed in elapsed seconds since `t_ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WindowSchedule {
    /// Windows listed one by one as `[start, stop]` pairs.
    Explicit {
        /// Start/stop offsets of each window.
        windows: Vec<[f64; 2]>,
    },
    /// One window of fixed live time per start offset.
    Livetime {
        /// Start offsets.
        starts: Vec<f64>,
        /// Live time shared by every window.
        livetime: f64,
    },
    /// Contiguous windows of equal width.
    Linear {
        /// First edge.
        start: f64,
        /// Last edge.
        stop: f64,
        /// Number of windows.
        count: usize,
    },
    /// Contiguous windows with logarithmically spaced edges.
    Log {
        /// First edge, strictly positive.
        #[serde(default = "default_log_start")]
        start: f64,
        /// Last edge.
        #[serde(default = "default_log_stop")]
        stop: f64,
        /// Number of windows.
        #[serde(default = "default_log_count")]
        count: usize,
    },
}

fn default_log_start() -> f64 {
    80.0
}

fn default_log_stop() -> f64 {
    1000.0
}

fn default_log_count() -> usize {
    8
}

impl Default for WindowSchedule {
    fn default() -> Self {
        WindowSchedule::Log {
            start: default_log_start(),
            stop: default_log_stop(),
            count: default_log_count(),
        }
    }
}

impl WindowSchedule {
    /// Expands the schedule into absolute windows anchored at `t_ref`.
    pub fn windows(&self, t_ref: f64) -> Result<Vec<ObservationWindow>, DecayError> {
        let offsets: Vec<(f64, f64)> = match self {
            WindowSchedule::Explicit { windows } => {
                windows.iter().map(|pair| (pair[0], pair[1])).collect()
            }
            WindowSchedule::Livetime { starts, livetime } => {
                let mut windows = Vec::with_capacity(starts.len());
                for &start in starts {
                    let window = ObservationWindow::from_livetime(t_ref + start, *livetime)?;
                    windows.push(window);
                }
                debug!(count = windows.len(), "expanded livetime schedule");
                return Ok(windows);
            }
            WindowSchedule::Linear { start, stop, count } => {
                check_range(*start, *stop, *count)?;
                let width = (stop - start) / *count as f64;
                contiguous(
                    (0..=*count).map(|i| start + width * i as f64),
                    *stop,
                )
            }
            WindowSchedule::Log { start, stop, count } => {
                check_range(*start, *stop, *count)?;
                if *start <= 0.0 {
                    return Err(schedule_error(
                        "schedule_log_start",
                        "log schedules need a strictly positive start offset",
                    )
                    .with_context("start", start));
                }
                let ratio = (stop / start).powf(1.0 / *count as f64);
                contiguous((0..=*count).map(|i| start * ratio.powf(i as f64)), *stop)
            }
        };
        let windows = offsets
            .into_iter()
            .map(|(lo, hi)| ObservationWindow::new(t_ref + lo, t_ref + hi))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = windows.len(), "expanded window schedule");
        Ok(windows)
    }
}

fn check_range(start: f64, stop: f64, count: usize) -> Result<(), DecayError> {
    if count == 0 {
        return Err(schedule_error("schedule_count", "schedule needs at least one window"));
    }
    if count > MAX_SCHEDULE_WINDOWS {
        return Err(
            schedule_error("schedule_count", "schedule expands to too many windows")
                .with_context("count", count)
                .with_context("max", MAX_SCHEDULE_WINDOWS),
        );
    }
    if !start.is_finite() || !stop.is_finite() || stop <= start {
        return Err(
            schedule_error("schedule_range", "schedule stop must exceed start")
                .with_context("start", start)
                .with_context("stop", stop),
        );
    }
    Ok(())
}

/// Pairs consecutive edges, pinning the final edge to `stop` exactly.
fn contiguous(edges: impl Iterator<Item = f64>, stop: f64) -> Vec<(f64, f64)> {
    let mut edges: Vec<f64> = edges.collect();
    if let Some(last) = edges.last_mut() {
        *last = stop;
    }
    edges.windows(2).map(|pair| (pair[0], pair[1])).collect()
}
