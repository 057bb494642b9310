//! Organization invitations.
//!
//! [`Invitations::issue`] mints a signed token for an email address and
//! [`Invitations::accept`] later redeems it, usually from another request.
//! The token is the only state the two share. A token can be replayed; the
//! single-membership guarantee of the store is what makes a second redemption
//! fail with `AlreadyMember`.

use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    consts::invite_const::ACCEPT_INVITE_PATH,
    notify::{Notifier, email::Mailer},
    store::Store,
};

pub mod issuer;
pub mod quota;
pub mod redeemer;
pub mod tags;
pub mod token;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;

use quota::{QuotaGate, StoreQuotaGate};
use tags::TagPolicy;
use token::TokenCodec;
use verification::{EmailVerifier, VerificationGate};

pub struct Invitations {
    store: Arc<dyn Store>,
    codec: TokenCodec,
    quota: Arc<dyn QuotaGate>,
    verification: VerificationGate,
    tags: TagPolicy,
    /// `None` when outbound email is disabled.
    mailer: Option<Arc<dyn Mailer>>,
    notifier: Arc<dyn Notifier>,
    app_url: String,
    token_ttl: Option<Duration>,
}

impl Invitations {
    pub fn new(
        config: &Config,
        store: Arc<dyn Store>,
        verifier: Arc<dyn EmailVerifier>,
        mailer: Arc<dyn Mailer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            codec: TokenCodec::new(config.invite_secret.as_bytes()),
            quota: Arc::new(StoreQuotaGate::new(store.clone(), config.deployment)),
            verification: VerificationGate::new(verifier, config.deployment),
            tags: TagPolicy::invitee_tags(config.invitee_tags.iter().cloned()),
            mailer: config.send_email.then_some(mailer),
            notifier,
            app_url: config.app_url.trim_end_matches('/').to_string(),
            token_ttl: config.invite_ttl(),
            store,
        }
    }

    fn accept_invite_url(&self, token: &str) -> String {
        format!("{}{}?token={}", self.app_url, ACCEPT_INVITE_PATH, token)
    }
}
