use std::sync::Arc;

use async_trait::async_trait;

use crate::{config::DeploymentMode, errors::Result, models::user::Actor, store::Store};

/// Source of truth for whether an identity has confirmed its email.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn email_verified(&self, actor: &Actor) -> Result<bool>;
}

/// Reads the `email_verified` flag the identity service keeps on the user.
pub struct StoreEmailVerifier {
    store: Arc<dyn Store>,
}

impl StoreEmailVerifier {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EmailVerifier for StoreEmailVerifier {
    async fn email_verified(&self, actor: &Actor) -> Result<bool> {
        Ok(self
            .store
            .get_user(&actor.user_id)
            .await?
            .is_some_and(|user| user.email_verified))
    }
}

pub struct VerificationGate {
    verifier: Arc<dyn EmailVerifier>,
    mode: DeploymentMode,
}

impl VerificationGate {
    pub fn new(verifier: Arc<dyn EmailVerifier>, mode: DeploymentMode) -> Self {
        Self { verifier, mode }
    }

    /// Only natively authenticated identities on multi-tenant deployments
    /// have to prove their address.
    pub fn applies_to(&self, actor: &Actor) -> bool {
        !self.mode.is_trusted() && actor.provider.is_native()
    }

    pub async fn is_verified(&self, actor: &Actor) -> Result<bool> {
        if !self.applies_to(actor) {
            return Ok(true);
        }
        self.verifier.email_verified(actor).await
    }
}
