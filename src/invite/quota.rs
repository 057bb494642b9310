use std::sync::Arc;

use async_trait::async_trait;

use crate::{config::DeploymentMode, errors::Result, store::Store};

/// Per-inviter allowance that bounds how many invitations can be sent.
#[async_trait]
pub trait QuotaGate: Send + Sync {
    /// Consumes one invitation, or fails with `QuotaExceeded`.
    async fn check_and_decrement(&self, user_id: &str) -> Result<()>;
}

/// Quota kept on the user record. Trusted deployments skip the counter entirely.
pub struct StoreQuotaGate {
    store: Arc<dyn Store>,
    mode: DeploymentMode,
}

impl StoreQuotaGate {
    pub fn new(store: Arc<dyn Store>, mode: DeploymentMode) -> Self {
        Self { store, mode }
    }
}

#[async_trait]
impl QuotaGate for StoreQuotaGate {
    async fn check_and_decrement(&self, user_id: &str) -> Result<()> {
        if self.mode.is_trusted() {
            return Ok(());
        }
        self.store.check_and_decrement_invite_quota(user_id).await
    }
}
