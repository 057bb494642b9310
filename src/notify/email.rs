use async_trait::async_trait;
use tracing::info;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteEmail {
    pub to: String,
    pub inviter_name: String,
    pub org_name: String,
    pub accept_url: String,
}

impl InviteEmail {
    pub fn subject(&self) -> String {
        format!("{} invited you to join {}", self.inviter_name, self.org_name)
    }
}

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_invite(&self, email: &InviteEmail) -> Result<()>;
}

/// Hands rendered invitations to the log for an external relay to pick up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_invite(&self, email: &InviteEmail) -> Result<()> {
        info!(
            to = %email.to,
            subject = %email.subject(),
            accept_url = %email.accept_url,
            "Outbound invitation email"
        );
        Ok(())
    }
}
