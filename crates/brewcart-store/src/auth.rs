//! # Authentication Flow Support
//!
//! Glue between the login/register screens, the (external) network layer and
//! the session.
//!
//! ```text
//! Screen form ──► prepare_login / prepare_registration
//!                     │  validation failed → StoreError::InvalidForm
//!                     ▼
//!              LoginRequest / SignupRequest ──► network layer (not here)
//!                                                    │
//!                     AuthOutcome::from_http(...) ◄──┘
//!                     │
//!                     ▼
//!              Store::apply_auth(flow, outcome) ──► session updated or error
//! ```

use std::fmt;

use brewcart_core::validation::{validate_login, validate_registration};
use brewcart_core::wire::{AuthResponse, ErrorPayload, LoginRequest, SignupRequest};
use brewcart_core::{LoginForm, RegistrationForm};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Which authentication exchange is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFlow {
    Login,
    Register,
}

impl AuthFlow {
    pub fn success_message(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Login Successful!",
            AuthFlow::Register => "Registration Successful!",
        }
    }

    /// Shown when the service refuses without a message of its own.
    pub fn rejection_fallback(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Login failed. Please try again.",
            AuthFlow::Register => "Registration failed",
        }
    }

    pub fn transport_fallback(&self) -> &'static str {
        match self {
            AuthFlow::Login => "An error occurred. Please try again later.",
            AuthFlow::Register => "Something went wrong",
        }
    }

    pub fn missing_fields_message(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Please fill in both fields",
            AuthFlow::Register => "All fields are required",
        }
    }
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFlow::Login => write!(f, "login"),
            AuthFlow::Register => write!(f, "registration"),
        }
    }
}

/// Resolved result of a login or signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// 2xx with a readable `userDetails` body.
    Accepted(AuthResponse),
    /// Non-2xx; the payload may carry a message for the user.
    Rejected(ErrorPayload),
    /// No response, or a body that could not be read.
    TransportFailed(String),
}

impl AuthOutcome {
    /// Classifies a raw HTTP result.
    ///
    /// An unreadable success body counts as a transport failure, matching
    /// what the user sees when the response cannot be parsed.
    pub fn from_http(success: bool, body: &str) -> Self {
        if !success {
            return AuthOutcome::Rejected(ErrorPayload::from_json_lossy(body));
        }
        match AuthResponse::from_json(body) {
            Ok(response) => AuthOutcome::Accepted(response),
            Err(e) => AuthOutcome::TransportFailed(e.to_string()),
        }
    }
}

/// Validates the login form and builds the request body.
pub fn prepare_login(form: &LoginForm) -> StoreResult<LoginRequest> {
    validate_login(form).map_err(|source| StoreError::InvalidForm {
        flow: AuthFlow::Login,
        source,
    })?;
    Ok(LoginRequest::from(form))
}

/// Validates the registration form and builds the request body.
pub fn prepare_registration(form: &RegistrationForm) -> StoreResult<SignupRequest> {
    validate_registration(form).map_err(|source| StoreError::InvalidForm {
        flow: AuthFlow::Register,
        source,
    })?;
    Ok(SignupRequest::from(form))
}
