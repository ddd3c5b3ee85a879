//! Notifications
//!
//! Transient, advisory messages for the user ("toasts"). Nothing in the
//! crate depends on a notice being shown.

use std::fmt;

use crate::cart::{CartLine, CartObserver};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Something the user asked for happened.
    Success,

    /// Neutral information.
    Info,

    /// The user's input was rejected.
    Error,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    level: NoticeLevel,
    message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Create a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    /// Create an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    /// Create an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Severity
    pub fn level(&self) -> NoticeLevel {
        self.level
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered log of notices waiting to be shown.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice.
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Notices in the order they were raised.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Take every pending notice, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Number of pending notices.
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Check if there are no pending notices.
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl CartObserver for NoticeLog {
    fn on_item_added(&mut self, line: &CartLine) {
        self.push(Notice::success(format!("Added {} to cart", line.name())));
    }

    fn on_item_removed(&mut self, line: &CartLine) {
        self.push(Notice::info(format!("Removed {} from cart", line.name())));
    }
}
