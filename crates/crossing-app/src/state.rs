use crossing_core::store::AssessmentStore;
use tokio::sync::Mutex;

/// One open inspection.
///
/// `report_gate` is held for the whole of a report generation so a second
/// request is rejected instead of issuing duplicate model calls.
#[derive(Default)]
pub struct Session {
    pub store: Mutex<AssessmentStore>,
    pub(crate) report_gate: Mutex<()>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: AssessmentStore) -> Self {
        Self {
            store: Mutex::new(store),
            report_gate: Mutex::new(()),
        }
    }

    /// Whether a report generation is currently outstanding.
    pub fn report_in_flight(&self) -> bool {
        self.report_gate.try_lock().is_err()
    }
}
