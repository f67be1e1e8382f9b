use crate::chat::Orchestrator;

/// Process-wide state shared by every HTTP handler.
///
/// Built once in `main` and handed to axum behind an `Arc`.
pub struct AppState {
    orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}
