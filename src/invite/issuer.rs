use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    errors::{Error, Result},
    invite::Invitations,
    models::{
        invitation::InviteUserResult,
        organization::Organization,
        user::{Actor, User},
    },
    notify::{Event, detach, email::InviteEmail},
};

impl Invitations {
    /// Invites `email` to `org_id` on behalf of `actor` and returns the link
    /// that redeems the invitation.
    ///
    /// Every check runs before anything is written: an address that already
    /// belongs to the organization never costs quota, and a failed gate leaves
    /// no token behind. Tag propagation, email and webhook delivery happen
    /// afterwards and cannot fail the call.
    pub async fn issue(
        &self,
        actor: Option<&Actor>,
        org_id: &str,
        email: &str,
    ) -> Result<InviteUserResult> {
        let actor = actor.ok_or(Error::NotAuthenticated)?;

        // 🚨 SECURITY: only members may invite into an organization.
        if self
            .store
            .get_membership(org_id, &actor.user_id)
            .await?
            .is_none()
        {
            return Err(Error::Forbidden(org_id.to_string()));
        }
        let org = self
            .store
            .get_org(org_id)
            .await?
            .ok_or_else(|| Error::OrgNotFound(org_id.to_string()))?;
        let inviter = self
            .store
            .get_user(&actor.user_id)
            .await?
            .ok_or(Error::NotAuthenticated)?;

        let invitee = self.store.get_user_by_email(email).await?;
        if let Some(invitee) = &invitee {
            if self
                .store
                .get_membership(&org.id, &invitee.id)
                .await?
                .is_some()
            {
                return Err(Error::AlreadyMember(email.to_string(), org.id.clone()));
            }
        }

        if !self.verification.is_verified(actor).await? {
            return Err(Error::EmailNotVerified);
        }
        self.quota.check_and_decrement(&actor.user_id).await?;

        let token = self.codec.mint(&org.id, email)?;
        let accept_invite_url = self.accept_invite_url(&token);
        info!(org = %org.id, inviter = %inviter.id, "Issued organization invitation");

        if let Some(invitee) = &invitee {
            self.grant_invitee_tags(&org, invitee).await;
        }
        self.dispatch_invite(&inviter, &org, email, &accept_invite_url);

        Ok(InviteUserResult { accept_invite_url })
    }

    async fn grant_invitee_tags(&self, org: &Organization, invitee: &User) {
        let org_tags = match self.store.org_tags(&org.id).await {
            Ok(tags) => tags,
            Err(error) => {
                warn!(org = %org.id, %error, "Could not load organization tags");
                return;
            }
        };

        for tag in self.tags.tags_for_invitee(&org_tags) {
            if let Err(error) = self.store.add_user_tag(&invitee.id, tag).await {
                warn!(user = %invitee.id, tag, %error, "Could not propagate tag to invitee");
            }
        }
    }

    fn dispatch_invite(&self, inviter: &User, org: &Organization, email: &str, accept_url: &str) {
        if let Some(mailer) = &self.mailer {
            let mailer = Arc::clone(mailer);
            let message = InviteEmail {
                to: email.to_string(),
                inviter_name: inviter.name().to_string(),
                org_name: org.name.clone(),
                accept_url: accept_url.to_string(),
            };
            detach("invite email", async move { mailer.send_invite(&message).await });
        }

        let notifier = Arc::clone(&self.notifier);
        let webhook_url = org.slack_webhook_url.clone();
        let event = Event::Invited {
            inviter: inviter.name().to_string(),
            org_name: org.name.clone(),
            email: email.to_string(),
        };
        detach("invite webhook", async move {
            notifier.notify(webhook_url.as_deref(), &event).await
        });
    }
}
