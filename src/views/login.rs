//! Admin login form

use crate::context::AppContext;
use crate::models::LoginInput;
use crate::router::Route;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Log in and return where to go next.
    ///
    /// Accounts still on their default credentials go to first setup.
    pub async fn submit(&mut self, ctx: &AppContext) -> Option<Route> {
        self.error = None;
        let input = LoginInput {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };

        let response = match ctx.api.login(&input).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Login failed: {}", e);
                self.error = Some(INVALID_CREDENTIALS.to_string());
                return None;
            }
        };

        if let Err(e) = ctx.session.login(&response.access_token) {
            tracing::warn!("Failed to store session: {}", e);
            self.error = Some(e.to_string());
            return None;
        }

        self.password.clear();
        Some(if response.must_change_password {
            Route::FirstSetup
        } else {
            Route::Admin
        })
    }
}
