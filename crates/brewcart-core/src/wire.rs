//! # Wire Payloads
//!
//! Request and response bodies of the remote storefront service.
//!
//! ```text
//! GET  <base>/app/product/getallproductlist?search=<text>
//!      ◄── { "success": bool, "products": [Product] }
//!
//! POST <base>/app/auth/login   { "emailId", "password" }
//! POST <base>/app/auth/signup  { "name", "emailId", "password" }
//!      ◄── 2xx: { "userDetails": UserProfile }
//!      ◄── otherwise: { "message": "..." }
//! ```
//!
//! The transport itself lives outside this workspace; these types only fix
//! the shapes so both sides agree.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{LoginForm, Product, RegistrationForm, UserProfile};

/// Catalog listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub success: bool,

    /// Absent on failure responses.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogResponse {
    pub fn from_json(body: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// `POST /app/auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_id: String,
    pub password: String,
}

impl From<&LoginForm> for LoginRequest {
    fn from(form: &LoginForm) -> Self {
        LoginRequest {
            email_id: form.email.trim().to_string(),
            password: form.password.clone(),
        }
    }
}

/// `POST /app/auth/signup` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email_id: String,
    pub password: String,
}

impl From<&RegistrationForm> for SignupRequest {
    fn from(form: &RegistrationForm) -> Self {
        SignupRequest {
            name: form.name.trim().to_string(),
            email_id: form.email.trim().to_string(),
            password: form.password.clone(),
        }
    }
}

/// Successful login/signup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_details: UserProfile,
}

impl AuthResponse {
    pub fn from_json(body: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Failure payload; `message` is shown to the user when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    /// Lenient parse: an unreadable error body is just an error without a
    /// message.
    pub fn from_json_lossy(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
