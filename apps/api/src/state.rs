use std::sync::Arc;

use crate::ai::service::AiService;
use crate::models::resume::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator for every AI task. Holds the availability gate decided at startup.
    pub ai: AiService,
    /// Resume text lookup for tailoring and cold emails.
    pub resumes: Arc<dyn ResumeStore>,
}
