use std::path::PathBuf;
use std::sync::Arc;

use vidinfo_extractor::MetadataSource;

use crate::config::ServerConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MetadataSource>,
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(source: Arc<dyn MetadataSource>, config: &ServerConfig) -> Self {
        Self {
            source,
            template_path: config.template_path.clone(),
            static_dir: config.static_dir.clone(),
        }
    }
}
