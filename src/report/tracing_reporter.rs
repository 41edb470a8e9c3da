//! Reporter backed by `tracing`.

use super::{Report, Reporter};

/// Emits transitions at info level, warnings at warn level and errors at
/// error level, under the `entity_fsm` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, report: Report) {
        match report {
            Report::Transition { entity, state } => {
                tracing::info!(
                    target: "entity_fsm",
                    entity = %entity,
                    state = %state,
                    "{} state start {}",
                    entity,
                    state
                );
            }
            Report::Warning(err) => {
                tracing::warn!(target: "entity_fsm", error = %err, "state machine warning");
            }
            Report::Error(err) => {
                tracing::error!(target: "entity_fsm", error = %err, "state machine error");
            }
        }
    }
}
