//! Transient status notifications.
//!
//! A [`Toasts`] handle owns a single notification slot, created lazily on
//! the first [`Toasts::show`] and kept for the life of the handle. Showing
//! a toast overwrites whatever the slot held and schedules a hide after the
//! configured delay. The scheduled hide keeps no cancellation handle and
//! does not check whether a newer message replaced the one it was armed
//! for, so a rapid second toast can have its display cut short when the
//! first call's timer fires.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How long a toast stays visible unless configured otherwise.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Category of a notification; doubles as its styling class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    /// Operation completed.
    #[default]
    Success,
    /// Operation failed.
    Error,
    /// Neutral status information.
    Info,
}

impl ToastKind {
    /// Stable class token consumers style against.
    pub fn as_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone)]
struct ToastSlot {
    message: String,
    kind: ToastKind,
    visible: bool,
}

/// Point-in-time view of the notification slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    pub kind: ToastKind,
    pub visible: bool,
}

impl ToastView {
    /// Combined class string, `"toast {kind} show"` while visible.
    pub fn class_list(&self) -> String {
        if self.visible {
            format!("toast {} show", self.kind.as_class())
        } else {
            format!("toast {}", self.kind.as_class())
        }
    }
}

/// Shared handle to the session's notification slot.
///
/// Cloning is cheap; all clones observe the same slot.
#[derive(Clone)]
pub struct Toasts {
    slot: Arc<Mutex<Option<ToastSlot>>>,
    hide_delay: Duration,
}

impl Toasts {
    pub fn new() -> Self {
        Self::with_hide_delay(DEFAULT_HIDE_DELAY)
    }

    /// Handle with a non-default display window.
    pub fn with_hide_delay(hide_delay: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            hide_delay,
        }
    }

    /// Show `message`, replacing whatever the slot currently holds.
    ///
    /// Every call arms its own hide timer. Timers are not cancelled by
    /// later calls: an earlier call's timer clears the visible flag even
    /// when a newer message is on display.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        {
            let mut slot = self.slot.lock().unwrap();
            *slot = Some(ToastSlot {
                message: message.into(),
                kind,
                visible: true,
            });
        }

        let slot = Arc::clone(&self.slot);
        let delay = self.hide_delay;
        thread::spawn(move || {
            thread::sleep(delay);
            if let Some(state) = slot.lock().unwrap().as_mut() {
                state.visible = false;
            }
        });
    }

    /// Show a success toast and record it on the diagnostic channel.
    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.show(message, ToastKind::Success);
    }

    /// Show an error toast and record it on the diagnostic channel.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.show(message, ToastKind::Error);
    }

    /// Show an informational toast and record it on the diagnostic channel.
    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.show(message, ToastKind::Info);
    }

    /// Snapshot of the slot; `None` until the first show.
    pub fn current(&self) -> Option<ToastView> {
        self.slot.lock().unwrap().as_ref().map(|state| ToastView {
            message: state.message.clone(),
            kind: state.kind,
            visible: state.visible,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.current().map(|view| view.visible).unwrap_or(false)
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}
