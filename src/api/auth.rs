//! Authentication endpoints
//!
//! - `POST /api/login` - Exchange credentials for a bearer token
//! - `GET /api/me` - Current account
//! - `POST /api/change-credentials` - Replace the default username and password
//! - `POST /api/change-password` - Replace the password only
//!
//! `login` does not touch the session; the caller decides whether and when
//! to persist the returned token.

use super::{ApiClient, ApiError};
use crate::models::{ChangeCredentialsInput, ChangePasswordInput, LoginInput, LoginResponse, Me};

impl ApiClient {
    /// POST /api/login
    pub async fn login(&self, input: &LoginInput) -> Result<LoginResponse, ApiError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(ApiError::InvalidRequest(
                "Username and password are required".to_string(),
            ));
        }
        self.send_json(self.post("/login").json(input)).await
    }

    /// GET /api/me
    pub async fn me(&self) -> Result<Me, ApiError> {
        self.send_json(self.get("/me")).await
    }

    /// POST /api/change-credentials (form-encoded)
    pub async fn change_credentials(&self, input: &ChangeCredentialsInput) -> Result<(), ApiError> {
        self.send_empty(self.post("/change-credentials").form(input)).await?;
        tracing::info!(username = %input.new_username, "Credentials changed");
        Ok(())
    }

    /// POST /api/change-password (form-encoded)
    pub async fn change_password(&self, input: &ChangePasswordInput) -> Result<(), ApiError> {
        self.send_empty(self.post("/change-password").form(input)).await?;
        tracing::info!("Password changed");
        Ok(())
    }
}
