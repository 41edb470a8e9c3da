//! Reporter that keeps every report in memory.

use super::{Report, Reporter};
use crate::runtime::FsmError;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;

/// A report together with the time it was received.
#[derive(Clone, Debug)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub report: Report,
}

/// Records reports into a shared buffer.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to the machine.
///
/// # Example
///
/// ```rust
/// use entity_fsm::report::{RecordingReporter, Report, Reporter};
///
/// let recorder = RecordingReporter::new();
/// let mut sink = recorder.clone();
/// sink.report(Report::Transition {
///     entity: "Player".to_string(),
///     state: "Idle".to_string(),
/// });
///
/// assert_eq!(recorder.transitions(), vec!["Player state start Idle".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    records: Rc<RefCell<Vec<Record>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.report.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<FsmError> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match &record.report {
                Report::Error(err) => Some(err.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<FsmError> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match &record.report {
                Report::Warning(err) => Some(err.clone()),
                _ => None,
            })
            .collect()
    }

    /// Transition traces rendered as `"<entity> state start <state>"`.
    pub fn transitions(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match &record.report {
                Report::Transition { entity, state } => {
                    Some(format!("{} state start {}", entity, state))
                }
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, report: Report) {
        self.records.borrow_mut().push(Record {
            timestamp: Utc::now(),
            report,
        });
    }
}
