//! Application state for the HTTP server.

use crate::services::ObservationService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Observation assembler with its timezone and clock collaborators
    pub observations: ObservationService,
}

impl AppState {
    /// Create a new application state around an observation service.
    pub fn new(observations: ObservationService) -> Self {
        Self { observations }
    }
}
