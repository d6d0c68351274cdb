//! Session context wiring the helpers together.

use std::time::Duration;

use crate::api_client::ApiClient;
use crate::clipboard::{ClipboardManager, CopyOutcome};
use crate::config::Config;
use crate::toast::Toasts;

/// Explicit session context replacing page-global state: one API client,
/// one toast slot, one clipboard strategy. Created once, lives for the
/// session.
pub struct Console {
    config: Config,
    pub api: ApiClient,
    pub toasts: Toasts,
    clipboard: ClipboardManager,
}

impl Console {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::from_config(&config.api);
        let toasts = Toasts::with_hide_delay(Duration::from_millis(config.toast.hide_delay_ms));
        let clipboard = ClipboardManager::from_config(&config.clipboard);
        Self {
            config,
            api,
            toasts,
            clipboard,
        }
    }

    /// Context with default configuration: local server, 3s toasts,
    /// platform clipboard fallback.
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy text to the clipboard, reporting the outcome on this
    /// console's toast slot.
    pub fn copy_to_clipboard(&self, text: &str) -> CopyOutcome {
        self.clipboard.copy(&self.toasts, text)
    }
}
