//! Contact endpoints
//!
//! Visitors post messages; the administrator lists and deletes them.

use super::client::segment;
use super::{ApiClient, ApiError};
use crate::models::{ContactInput, ContactMessage, ListQuery, PagedList};

impl ApiClient {
    /// POST /api/contact
    ///
    /// The server rate limits senders; a 429 carries the wait time in `detail`.
    pub async fn send_contact(&self, input: &ContactInput) -> Result<(), ApiError> {
        self.send_empty(self.post("/contact").json(input)).await?;
        tracing::info!("Contact message sent");
        Ok(())
    }

    /// GET /api/contact-messages
    pub async fn list_contact_messages(
        &self,
        query: &ListQuery,
    ) -> Result<PagedList<ContactMessage>, ApiError> {
        self.send_json(self.get("/contact-messages").query(query)).await
    }

    /// DELETE /api/contact-messages/{id}
    pub async fn delete_contact_message(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.delete(&format!("/contact-messages/{}", segment(id)))).await?;
        tracing::info!(id, "Contact message deleted");
        Ok(())
    }
}
