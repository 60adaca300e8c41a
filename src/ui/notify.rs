//! Single-slot transient notifications ("toasts").

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::UiSettings;

use super::html::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "check",
            ToastKind::Error | ToastKind::Info => "times",
        }
    }
}

/// Where a toast is in its lifetime at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

/// Holds at most one toast; showing a new one replaces the old.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Toast>,
    visible_for: Duration,
    fade_for: Duration,
}

impl Notifier {
    pub fn new(settings: &UiSettings) -> Self {
        Self {
            current: None,
            visible_for: Duration::from_millis(settings.toast_ms),
            fade_for: Duration::from_millis(settings.fade_ms),
        }
    }

    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Error => warn!(toast = %message, "Notification"),
            _ => info!(toast = %message, kind = kind.as_str(), "Notification"),
        }
        self.current = Some(Toast {
            kind,
            message,
            shown_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    /// Most recent toast regardless of whether it has expired
    #[cfg(test)]
    pub fn last(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn phase_at(&self, now: Instant) -> ToastPhase {
        let Some(toast) = &self.current else {
            return ToastPhase::Dismissed;
        };
        let age = now.saturating_duration_since(toast.shown_at);
        if age < self.visible_for {
            ToastPhase::Visible
        } else if age < self.visible_for + self.fade_for {
            ToastPhase::Fading
        } else {
            ToastPhase::Dismissed
        }
    }

    /// Toast still on screen (visible or fading) at `now`
    pub fn current_at(&self, now: Instant) -> Option<&Toast> {
        match self.phase_at(now) {
            ToastPhase::Dismissed => None,
            _ => self.current.as_ref(),
        }
    }

    /// Markup for the floating message at `now`, if one is on screen
    pub fn render_at(&self, now: Instant) -> Option<String> {
        let toast = self.current_at(now)?;
        let shown = if self.phase_at(now) == ToastPhase::Visible { " show" } else { "" };
        Some(format!(
            r#"<div class="floating-message {}{}"><i class="fas fa-{}"></i> {}</div>"#,
            toast.kind.as_str(),
            shown,
            toast.kind.icon(),
            escape_html(&toast.message)
        ))
    }
}
