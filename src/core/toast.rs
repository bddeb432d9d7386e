// Transient user-facing messages shown by the front-end.

use serde::{Deserialize, Serialize};

/// Event name the front-end listens on
pub const TOAST_EVENT: &str = "toast";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// "<n> notifications <action>", as shown after bulk operations.
    pub fn bulk(count: usize, action: &str) -> Self {
        Self::success(format!("{} notifications {}", count, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_message() {
        let toast = Toast::bulk(3, "moved to bin");
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "3 notifications moved to bin");
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(Toast::error("nope")).unwrap();
        assert_eq!(value["kind"], "error");
        assert_eq!(value["message"], "nope");
    }
}
