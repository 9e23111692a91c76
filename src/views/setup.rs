//! First setup: replace the default admin credentials

use super::form::{required, FormError};
use super::ViewError;
use crate::context::AppContext;
use crate::models::ChangeCredentialsInput;
use crate::router::Route;

pub const SETUP_DONE: &str = "Credentials updated. Please log in with your new username and password.";

#[derive(Debug, Clone, Default)]
pub struct SetupForm {
    pub old_password: String,
    pub new_username: String,
    pub new_password: String,
    pub confirm_password: String,
    error: Option<String>,
}

impl SetupForm {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn validate(&self) -> Result<ChangeCredentialsInput, FormError> {
        if self.old_password.is_empty() {
            return Err(FormError::Required("current_password"));
        }
        let new_username = required("new_username", &self.new_username)?;
        if self.new_password.is_empty() {
            return Err(FormError::Required("new_password"));
        }
        if self.new_password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(ChangeCredentialsInput {
            old_password: self.old_password.clone(),
            new_username: new_username.to_string(),
            new_password: self.new_password.clone(),
        })
    }

    /// Change the credentials, then log out: the old token names the old
    /// username. Returns the next route on success.
    pub async fn submit(&mut self, ctx: &AppContext) -> Option<Route> {
        match self.try_submit(ctx).await {
            Ok(route) => {
                self.error = None;
                Some(route)
            }
            Err(e) => {
                self.error = Some(e.message());
                None
            }
        }
    }

    async fn try_submit(&self, ctx: &AppContext) -> Result<Route, ViewError> {
        let input = self.validate()?;
        ctx.api.change_credentials(&input).await?;
        ctx.session.logout()?;
        Ok(Route::Login)
    }
}
