use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Organization {
    pub id: String,
    pub name: String, // ! & (len = 255)
    pub display_name: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub created_at: String,
}

/// At most one per (organization_id, user_id); the pair is the identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrganizationMembership {
    pub organization_id: String,
    pub user_id: String,
    pub created_at: String,
}

impl OrganizationMembership {
    pub fn is_for(&self, organization_id: &str, user_id: &str) -> bool {
        self.organization_id == organization_id && self.user_id == user_id
    }
}
