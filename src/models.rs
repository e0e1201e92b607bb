use std::sync::Arc;

use crate::agents::StudyAgent;
use crate::config::Config;
use crate::storage::UploadStore;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub agent: Arc<StudyAgent>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: Config, agent: StudyAgent) -> Self {
        let uploads = UploadStore::new(config.storage.upload_dir.clone());
        Self {
            config,
            agent: Arc::new(agent),
            uploads,
        }
    }
}
