use async_trait::async_trait;
use serde_json::json;

use crate::{
    errors::Result,
    notify::{Event, Notifier},
};

/// Posts Slack-compatible `{"text": ...}` payloads to the organization webhook.
#[derive(Debug, Clone, Default)]
pub struct SlackNotifier {
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

pub fn message(event: &Event) -> String {
    match event {
        Event::Invited {
            inviter,
            org_name,
            email,
        } => format!("*{inviter}* invited {email} to join *{org_name}*"),
        Event::InviteAccepted { member, org_name } => {
            format!("*{member}* accepted an invitation to join *{org_name}*")
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, webhook_url: Option<&str>, event: &Event) -> Result<()> {
        let Some(url) = webhook_url.filter(|url| !url.is_empty()) else {
            return Ok(());
        };

        self.client
            .post(url)
            .json(&json!({ "text": message(event) }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
