//! Shared application state.
//!
//! Built once from the immutable [`Config`] and handed to every handler behind an `Arc`.

use retouch_core::Config;
use retouch_processing::{ImageEditor, ResponseEncoder, UploadValidator};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub editor: ImageEditor,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let validator = UploadValidator::new(
            config.max_upload_size_bytes,
            config.allowed_extensions.clone(),
        );
        let encoder = ResponseEncoder::new(config.jpeg_quality);

        Self {
            editor: ImageEditor::new(validator, encoder),
            config,
        }
    }

    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_config_limits() {
        let config = Config {
            max_upload_size_bytes: 1024,
            allowed_extensions: vec!["png".to_string()],
            ..Config::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.editor.validator().max_file_size(), 1024);
        assert_eq!(state.editor.validator().allowed_extensions(), ["png".to_string()]);
        assert!(!state.is_production());
    }
}
