use std::sync::Arc;

use async_trait::async_trait;

use crate::{entities::email::OutgoingEmail, errors::MailError};

/// Outbound transactional mail provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Short provider name for health output and logs.
    fn kind(&self) -> &'static str;
}

#[async_trait]
impl<T> Mailer for Arc<T>
where
    T: Mailer + ?Sized,
{
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        (**self).send(email).await
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}
