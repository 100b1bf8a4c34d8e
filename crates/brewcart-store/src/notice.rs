//! # User Notices
//!
//! Short-lived messages the screens show as toasts.
//!
//! ## Serialization
//! ```json
//! { "code": "REMOTE_REJECTED", "message": "Invalid credentials" }
//! ```

use brewcart_core::{CoreError, ValidationError};
use serde::{Deserialize, Serialize};

use crate::auth::AuthFlow;
use crate::error::StoreError;
use crate::state::CatalogClearReason;

/// Machine-readable notice category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeCode {
    Success,
    /// Form input rejected locally
    ValidationError,
    /// Service answered with a failure
    RemoteRejected,
    /// No usable response
    NetworkError,
    /// Cart limit reached
    CartError,
    CatalogUnavailable,
    ConfigError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub code: NoticeCode,
    pub message: String,
}

impl Notice {
    pub fn new(code: NoticeCode, message: impl Into<String>) -> Self {
        Notice {
            code,
            message: message.into(),
        }
    }

    pub fn added_to_cart(title: &str) -> Self {
        Notice::new(NoticeCode::Success, format!("{} is Added to Cart", title))
    }

    pub fn auth_succeeded(flow: AuthFlow) -> Self {
        Notice::new(NoticeCode::Success, flow.success_message())
    }

    pub fn is_error(&self) -> bool {
        self.code != NoticeCode::Success
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::InvalidForm { flow, source } => match source {
                ValidationError::Required { .. } => {
                    Notice::new(NoticeCode::ValidationError, flow.missing_fields_message())
                }
                ValidationError::Mismatch { .. } => {
                    Notice::new(NoticeCode::ValidationError, "Passwords do not match")
                }
                other => Notice::new(NoticeCode::ValidationError, other.to_string()),
            },
            StoreError::Rejected { flow, message } => Notice::new(
                NoticeCode::RemoteRejected,
                message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(flow.rejection_fallback()),
            ),
            StoreError::Transport { flow, .. } => {
                Notice::new(NoticeCode::NetworkError, flow.transport_fallback())
            }
            StoreError::Core(core) => match core {
                CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                    Notice::new(NoticeCode::CartError, core.to_string())
                }
                CoreError::MalformedPayload(_) => Notice::new(
                    NoticeCode::NetworkError,
                    "An error occurred. Please try again later.",
                ),
                CoreError::Validation(e) => Notice::new(NoticeCode::ValidationError, e.to_string()),
            },
            StoreError::Config(_) | StoreError::Url(_) => {
                tracing::error!(error = %err, "Configuration error surfaced to user");
                Notice::new(NoticeCode::ConfigError, "App is misconfigured")
            }
        }
    }
}

impl From<CatalogClearReason> for Notice {
    fn from(reason: CatalogClearReason) -> Self {
        match reason {
            CatalogClearReason::Unsuccessful => {
                Notice::new(NoticeCode::CatalogUnavailable, "No Coffee Available")
            }
            CatalogClearReason::TransportFailed => Notice::new(
                NoticeCode::NetworkError,
                "Could not load products. Please try again later.",
            ),
        }
    }
}
