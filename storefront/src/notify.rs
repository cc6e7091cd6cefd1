//! Transient user notifications (toasts)

use std::time::Duration;

/// How long a notification stays before fading out
pub const AUTO_DISMISS: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl NotificationLevel {
    /// Alert style class of the toast
    pub fn alert_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "alert-success",
            NotificationLevel::Info => "alert-info",
            NotificationLevel::Error => "alert-danger",
        }
    }
}

/// A dismissible message shown to the shopper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        AUTO_DISMISS
    }
}
