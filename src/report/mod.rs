//! Diagnostic channel for state machines.
//!
//! Machines never surface errors to the host scheduler. Instead they hand
//! every transition trace and every problem to a [`Reporter`]:
//! - `TracingReporter` (the default) emits through `tracing`
//! - `RecordingReporter` keeps timestamped records for tests and tooling

mod recording;
mod tracing_reporter;

pub use recording::{Record, RecordingReporter};
pub use tracing_reporter::TracingReporter;

use crate::runtime::FsmError;

/// A single message on the diagnostic channel.
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// Info-level trace: `"<entity> state start <state>"`.
    Transition { entity: String, state: String },

    /// Recoverable oddity, e.g. a state failing to bind.
    Warning(FsmError),

    /// Configuration problem, failed transition or caught fault.
    Error(FsmError),
}

impl Report {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    /// The wrapped error for warnings and errors.
    pub fn error(&self) -> Option<&FsmError> {
        match self {
            Self::Warning(err) | Self::Error(err) => Some(err),
            Self::Transition { .. } => None,
        }
    }
}

/// Sink for the machine's diagnostics.
pub trait Reporter {
    fn report(&mut self, report: Report);
}

impl<F> Reporter for F
where
    F: FnMut(Report),
{
    fn report(&mut self, report: Report) {
        self(report)
    }
}
