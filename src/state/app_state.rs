// Application state
// Built once at startup and shared read-only across request handlers

use crate::config::Config;
use crate::services::files::FileService;

/// State shared by all handlers
///
/// Nothing in here changes after startup, so handlers receive it as
/// `Arc<AppState>` without any lock.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service over the managed files directory
    pub files: FileService,
}

impl AppState {
    /// Create state around an existing file service
    pub fn new(files: FileService) -> Self {
        Self { files }
    }

    /// Build state from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(FileService::new(&config.storage.files_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_config_uses_files_dir() {
        let mut config = Config::default();
        config.storage.files_dir = "/tmp/managed".into();

        let state = AppState::from_config(&config);
        assert_eq!(state.files.root(), Path::new("/tmp/managed"));
    }
}
