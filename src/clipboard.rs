//! Clipboard copy with an external fallback.
//!
//! Copying tries the system clipboard first and, when that is unavailable
//! or denied, hands the text to an external copy utility through a
//! temporary spool file. The caller gets a tri-state [`CopyOutcome`];
//! nothing escapes as an error.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Result};
use arboard::Clipboard;
use tempfile::NamedTempFile;

use crate::config::ClipboardConfig;
use crate::toast::Toasts;

/// How a copy request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The system clipboard took the text directly.
    Copied,
    /// The external fallback utility took the text.
    CopiedViaFallback,
    /// Both strategies failed.
    Failed,
}

impl CopyOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, CopyOutcome::Failed)
    }
}

/// Seam over the primary clipboard so the fallback path is testable.
pub trait ClipboardBackend {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`. A fresh handle per operation;
/// construction fails where no clipboard is reachable (headless sessions).
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Marker replaced with the spool file path in fallback arguments.
pub const SPOOL_PLACEHOLDER: &str = "{spool}";

/// External copy utility invoked when the system clipboard is unavailable.
///
/// The text is spooled to a temporary file for the duration of the
/// attempt. Arguments containing `{spool}` receive the file's path;
/// without the placeholder the file is streamed to the utility's stdin.
/// The spool file is removed when the attempt ends, whatever the outcome.
#[derive(Debug, Clone)]
pub struct FallbackCopy {
    program: String,
    args: Vec<String>,
}

impl FallbackCopy {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The conventional copy utility for the current platform, if any.
    pub fn platform_default() -> Option<Self> {
        if cfg!(target_os = "macos") {
            Some(Self::new("pbcopy", Vec::new()))
        } else if cfg!(target_os = "windows") {
            Some(Self::new("clip", Vec::new()))
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Some(Self::new("wl-copy", Vec::new()))
        } else {
            Some(Self::new(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            ))
        }
    }

    pub fn from_config(config: &ClipboardConfig) -> Option<Self> {
        match &config.fallback_program {
            Some(program) => Some(Self::new(program.clone(), config.fallback_args.clone())),
            None => Self::platform_default(),
        }
    }

    /// Spool `text` and run the utility over it.
    pub fn copy(&self, text: &str) -> Result<()> {
        // The spool file lives exactly as long as this attempt; dropping
        // `spool` removes it on every exit path.
        let mut spool = NamedTempFile::new()?;
        spool.write_all(text.as_bytes())?;
        spool.flush()?;

        let mut command = Command::new(&self.program);
        if self.args.iter().any(|arg| arg.contains(SPOOL_PLACEHOLDER)) {
            let path = spool.path().to_string_lossy().into_owned();
            for arg in &self.args {
                command.arg(arg.replace(SPOOL_PLACEHOLDER, &path));
            }
            command.stdin(Stdio::null());
        } else {
            command.args(&self.args);
            command.stdin(Stdio::from(spool.reopen()?));
        }

        let status = command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(anyhow!("{} exited with {}", self.program, status))
        }
    }
}

/// Pairs the system clipboard with the fallback utility and reports
/// outcomes on the toast slot.
pub struct ClipboardManager {
    primary: Box<dyn ClipboardBackend + Send + Sync>,
    fallback: Option<FallbackCopy>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self::with_backend(Box::new(SystemClipboard), FallbackCopy::platform_default())
    }

    pub fn from_config(config: &ClipboardConfig) -> Self {
        Self::with_backend(Box::new(SystemClipboard), FallbackCopy::from_config(config))
    }

    pub fn with_backend(
        primary: Box<dyn ClipboardBackend + Send + Sync>,
        fallback: Option<FallbackCopy>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Copy `text`, trying the system clipboard first and the external
    /// utility second.
    ///
    /// Success on either path shows a success toast; failure of both shows
    /// an error toast. A primary failure on its own is silent, it only
    /// routes to the fallback.
    pub fn copy(&self, toasts: &Toasts, text: &str) -> CopyOutcome {
        match self.primary.write_text(text) {
            Ok(()) => {
                toasts.success("Copied to clipboard");
                return CopyOutcome::Copied;
            }
            Err(err) => {
                tracing::debug!("system clipboard unavailable: {}", err);
            }
        }

        match self.fallback.as_ref().map(|fallback| fallback.copy(text)) {
            Some(Ok(())) => {
                toasts.success("Copied to clipboard");
                CopyOutcome::CopiedViaFallback
            }
            Some(Err(err)) => {
                tracing::debug!("fallback copy failed: {}", err);
                toasts.error("Copy failed");
                CopyOutcome::Failed
            }
            None => {
                toasts.error("Copy failed");
                CopyOutcome::Failed
            }
        }
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
