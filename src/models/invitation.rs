use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded contents of an invitation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationToken {
    pub org_id: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

impl InvitationToken {
    /// A deadline past what chrono can represent never expires.
    pub fn is_expired(&self, ttl: std::time::Duration, now: DateTime<Utc>) -> bool {
        chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| self.issued_at.checked_add_signed(ttl))
            .is_some_and(|deadline| deadline < now)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InviteUserResult {
    pub accept_invite_url: String,
}

/// `email_verified: false` means the invite was left untouched until the
/// caller verifies their address.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteResult {
    pub email_verified: bool,
}
