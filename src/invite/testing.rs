//! Shared fixtures for invitation tests.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    config::{Config, DeploymentMode, LogFormat, SurrealConfig},
    consts::invite_const::EDITOR_BETA_TAG,
    errors::{Error, Result},
    invite::{Invitations, verification::StoreEmailVerifier},
    models::user::{Actor, AuthProvider},
    notify::{
        Event, Notifier,
        email::{InviteEmail, Mailer},
    },
    store::memory::MemoryStore,
};

pub struct RecordingNotifier {
    sent: UnboundedSender<(Option<String>, Event)>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, webhook_url: Option<&str>, event: &Event) -> Result<()> {
        let _ = self
            .sent
            .send((webhook_url.map(str::to_string), event.clone()));
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _webhook_url: Option<&str>, _event: &Event) -> Result<()> {
        Err(Error::NotFound)
    }
}

pub struct RecordingMailer {
    sent: UnboundedSender<InviteEmail>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_invite(&self, email: &InviteEmail) -> Result<()> {
        let _ = self.sent.send(email.clone());
        Ok(())
    }
}

pub fn config(mode: DeploymentMode) -> Config {
    Config {
        listen: ([127, 0, 0, 1], 0).into(),
        app_url: "https://app.example.com/".into(),
        deployment: mode,
        session_secret: Fixture::SESSION_SECRET.into(),
        invite_secret: String::from_utf8_lossy(Fixture::INVITE_SECRET).into_owned(),
        send_email: true,
        invite_ttl_hours: None,
        invitee_tags: vec![EDITOR_BETA_TAG.to_string()],
        log_format: LogFormat::Text,
        surreal: SurrealConfig {
            url: "localhost:8050".into(),
            username: "root".into(),
            password: "secret".into(),
            namespace: "test".into(),
            database: "test".into(),
        },
    }
}

/// Organization `O1` ("acme") with a webhook, and `alice` as a verified
/// native member holding [`Fixture::ALICE_QUOTA`] invitations.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub invitations: Invitations,
    pub alice: Actor,
    pub notifications: UnboundedReceiver<(Option<String>, Event)>,
    pub emails: UnboundedReceiver<InviteEmail>,
}

impl Fixture {
    pub const INVITE_SECRET: &'static [u8] = b"invite-secret";
    pub const SESSION_SECRET: &'static str = "session-secret";
    pub const WEBHOOK: &'static str = "https://hooks.example.com/acme";
    pub const ALICE_QUOTA: i64 = 10;

    pub fn new(mode: DeploymentMode) -> Self {
        Self::build(config(mode), None)
    }

    pub fn with_config(config: Config) -> Self {
        Self::build(config, None)
    }

    pub fn with_failing_notifier(mode: DeploymentMode) -> Self {
        Self::build(config(mode), Some(Arc::new(FailingNotifier) as Arc<dyn Notifier>))
    }

    fn build(config: Config, notifier: Option<Arc<dyn Notifier>>) -> Self {
        let store = Arc::new(MemoryStore::new());
        store.insert_org("O1", "acme", Some(Self::WEBHOOK));
        store.insert_user(
            "alice",
            "alice@example.com",
            AuthProvider::Classic,
            true,
            Self::ALICE_QUOTA,
        );
        store.insert_member("O1", "alice");

        let (notify_tx, notifications) = mpsc::unbounded_channel();
        let (email_tx, emails) = mpsc::unbounded_channel();
        let notifier = notifier
            .unwrap_or_else(|| Arc::new(RecordingNotifier { sent: notify_tx }) as Arc<dyn Notifier>);

        let invitations = Invitations::new(
            &config,
            store.clone(),
            Arc::new(StoreEmailVerifier::new(store.clone())),
            Arc::new(RecordingMailer { sent: email_tx }),
            notifier,
        );

        Self {
            store,
            invitations,
            alice: Actor {
                user_id: "alice".into(),
                email: "alice@example.com".into(),
                provider: AuthProvider::Classic,
            },
            notifications,
            emails,
        }
    }

    pub fn user(
        &self,
        id: &str,
        email: &str,
        provider: AuthProvider,
        email_verified: bool,
        invite_quota: i64,
    ) -> Actor {
        self.store
            .insert_user(id, email, provider, email_verified, invite_quota);
        Actor {
            user_id: id.to_string(),
            email: email.to_string(),
            provider,
        }
    }

    pub async fn next_notification(&mut self) -> (Option<String>, Event) {
        tokio::time::timeout(Duration::from_secs(5), self.notifications.recv())
            .await
            .expect("notification dispatched")
            .expect("notifier alive")
    }

    pub async fn next_email(&mut self) -> InviteEmail {
        tokio::time::timeout(Duration::from_secs(5), self.emails.recv())
            .await
            .expect("email dispatched")
            .expect("mailer alive")
    }
}
