//! User notification port
//!
//! Every failure in the session is converted into a non-fatal notice that
//! the presentation shell shows to the user.

use std::fmt;

use domain::value_objects::FieldId;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Informational
    Info,
    /// Something did not happen, state is unchanged
    Warning,
    /// An operation failed
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A user-visible, non-fatal message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message text
    pub message: String,
    /// Input field the notice relates to
    pub field: Option<FieldId>,
}

impl Notice {
    /// Create a warning
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            field: None,
        }
    }

    /// Create an error notice
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the related input field
    #[must_use]
    pub fn for_field(mut self, field: FieldId) -> Self {
        self.field = Some(field);
        self
    }
}

/// Port for user-visible notifications
#[cfg_attr(test, automock)]
pub trait NotificationPort: Send + Sync {
    /// Show a notice to the user
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn NotificationPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn NotificationPort>();
    }

    #[test]
    fn builders() {
        let notice = Notice::warning("offline").for_field(FieldId::Source);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "offline");
        assert_eq!(notice.field, Some(FieldId::Source));

        assert_eq!(Notice::error("x").level.to_string(), "error");
    }
}
