// File: src/notify.rs
// Purpose: Transient user notifications

use std::fmt;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Background colour of the notification banner
    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => "#4CAF50",
            Self::Error => "#F44336",
            Self::Warning => "#FF9800",
            Self::Info => "#2196F3",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, duration: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            duration,
        }
    }
}

/// Surface that shows notifications to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let tag = notification.severity.as_str().to_uppercase();
        match notification.severity {
            Severity::Error => error!("[{}] {}", tag, notification.message),
            Severity::Warning => warn!("[{}] {}", tag, notification.message),
            Severity::Success | Severity::Info => info!("[{}] {}", tag, notification.message),
        }
    }
}
