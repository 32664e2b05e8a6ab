use std::sync::Arc;

use crate::config::Config;
use crate::models::{Catalog, Officer};
use crate::services::officer_directory::OfficerDirectory;
use crate::services::session_store::SessionStore;

pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub officers: Arc<OfficerDirectory>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, roster: Vec<Officer>) -> Self {
        tracing::info!(
            "Engine ready: {} subjects, {} questions, {} officers",
            catalog.subject_count(),
            catalog.question_count(),
            roster.len()
        );

        Self {
            config,
            catalog: Arc::new(catalog),
            officers: Arc::new(OfficerDirectory::new(roster)),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

pub mod catalog_loader;
pub mod export_service;
pub mod officer_directory;
pub mod roster_loader;
pub mod scoring;
pub mod selection;
pub mod session_store;
pub mod test_service;
