//! Contact messages panel (read and delete only)

use async_trait::async_trait;

use super::Resource;
use crate::api::{ApiClient, ApiError};
use crate::models::ContactMessage;
use crate::paging::MessageSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct Messages;

#[async_trait]
impl Resource for Messages {
    type Item = ContactMessage;
    type Source = MessageSource;
    type Form = ();

    const NAME: &'static str = "Message";

    fn source(&self, api: ApiClient) -> MessageSource {
        MessageSource::new(api)
    }

    fn id<'a>(&self, item: &'a ContactMessage) -> &'a str {
        &item.id
    }

    async fn delete(&self, api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_contact_message(id).await
    }
}
