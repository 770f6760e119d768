use filedrop_core::Config;
use filedrop_storage::Storage;
use std::sync::Arc;

/// Upload validation configuration
#[derive(Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub allowed_content_types: Vec<String>,
}

/// Main application state
///
/// Created once at startup and read-only afterwards; the storage client is
/// injected here rather than living in a module-level singleton.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub upload: UploadConfig,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            upload: UploadConfig {
                max_file_size: config.max_file_size_bytes,
                allowed_content_types: config.allowed_content_types.clone(),
            },
            storage,
            config,
        }
    }
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<AppState>();
    assert_sync::<AppState>();
}
