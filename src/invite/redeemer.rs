use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::{
    errors::{Error, Result},
    invite::Invitations,
    models::{invitation::AcceptInviteResult, user::Actor},
    notify::{Event, detach},
};

impl Invitations {
    /// Redeems an invitation token for `actor`.
    ///
    /// An unverified native identity gets `email_verified: false` back and
    /// nothing else happens, so the client can prompt for verification and
    /// retry with the same token. Redeeming twice reports `AlreadyMember`.
    pub async fn accept(&self, actor: Option<&Actor>, token: &str) -> Result<AcceptInviteResult> {
        let actor = actor.ok_or(Error::NotAuthenticated)?;

        if !self.verification.is_verified(actor).await? {
            info!(user = %actor.user_id, "Invite acceptance deferred until email is verified");
            return Ok(AcceptInviteResult {
                email_verified: false,
            });
        }

        let invite = self.codec.decode(token)?;
        if let Some(ttl) = self.token_ttl {
            if invite.is_expired(ttl, Utc::now()) {
                return Err(Error::InviteExpired);
            }
        }

        let org = self
            .store
            .get_org(&invite.org_id)
            .await?
            .ok_or_else(|| Error::OrgNotFound(invite.org_id.clone()))?;

        self.store
            .create_membership(&org.id, &actor.user_id)
            .await?;
        info!(
            org = %org.id,
            user = %actor.user_id,
            invited = %invite.email,
            "Accepted organization invitation"
        );

        let member = match self.store.get_user(&actor.user_id).await {
            Ok(Some(user)) => user.name().to_string(),
            _ => actor.email.clone(),
        };
        let notifier = Arc::clone(&self.notifier);
        let webhook_url = org.slack_webhook_url.clone();
        let event = Event::InviteAccepted {
            member,
            org_name: org.name.clone(),
        };
        detach("accept webhook", async move {
            notifier.notify(webhook_url.as_deref(), &event).await
        });

        Ok(AcceptInviteResult {
            email_verified: true,
        })
    }
}
