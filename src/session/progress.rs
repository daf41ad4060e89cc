//! Progress notifications emitted to consumers of a run.

use crate::ga::{Generation, Generations};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Run state carried by each notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Running,
    Completed,
    Stopped,
    Error,
}

impl Status {
    /// Whether this status ends the stream.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// One notification of a run.
///
/// `generation` is `None` only when the run ended before any tick completed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Progress {
    pub generation: Option<Generation>,
    pub status: Status,
    /// Percentage of the effective generation budget consumed.
    pub progress: f64,
    /// Failure description on [`Status::Error`].
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}

/// `100 × ticks / effective_max`; an empty budget reports 100.
pub fn progress_percent(ticks: usize, generations: Generations) -> f64 {
    let max = generations.effective_max();
    if max == 0 {
        return 100.0;
    }
    ticks as f64 / max as f64 * 100.0
}
