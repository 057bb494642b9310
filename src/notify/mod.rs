//! Best-effort notifications about invitations.
//!
//! Everything here runs detached from the request that triggered it. A failed
//! delivery is logged and never reaches the caller.

use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::Result;

pub mod email;
pub mod slack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Invited {
        inviter: String,
        org_name: String,
        email: String,
    },
    InviteAccepted {
        member: String,
        org_name: String,
    },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// `webhook_url` is the organization's configured hook, if any.
    async fn notify(&self, webhook_url: Option<&str>, event: &Event) -> Result<()>;
}

/// Runs `task` in the background. Its outcome is only ever logged.
pub fn detach<F>(label: &'static str, task: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(error) = task.await {
            warn!(task = label, %error, "Detached notification failed");
        }
    });
}
