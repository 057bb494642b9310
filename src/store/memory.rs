use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    errors::{Error, Result},
    models::{
        organization::{Organization, OrganizationMembership},
        user::{AuthProvider, User},
    },
    store::Store,
    utils::time::time_now,
};

#[derive(Default)]
struct Tables {
    orgs: HashMap<String, Organization>,
    users: HashMap<String, User>,
    memberships: HashMap<(String, String), OrganizationMembership>,
    org_tags: BTreeSet<(String, String)>,
    user_tags: BTreeSet<(String, String)>,
}

/// In-process [`Store`]; every operation runs under a single lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_org(&self, id: &str, name: &str, slack_webhook_url: Option<&str>) -> Organization {
        let org = Organization {
            id: id.to_string(),
            name: name.to_string(),
            display_name: None,
            slack_webhook_url: slack_webhook_url.map(str::to_string),
            created_at: time_now(),
        };
        self.tables.lock().orgs.insert(org.id.clone(), org.clone());
        org
    }

    pub fn insert_user(
        &self,
        id: &str,
        email: &str,
        auth_provider: AuthProvider,
        email_verified: bool,
        invite_quota: i64,
    ) -> User {
        let user = User {
            id: id.to_string(),
            email: email.to_string(),
            display_name: None,
            email_verified,
            auth_provider,
            invite_quota,
            created_at: time_now(),
        };
        self.tables.lock().users.insert(user.id.clone(), user.clone());
        user
    }

    pub fn set_email_verified(&self, user_id: &str, verified: bool) {
        if let Some(user) = self.tables.lock().users.get_mut(user_id) {
            user.email_verified = verified;
        }
    }

    pub fn add_org_tag(&self, org_id: &str, tag: &str) {
        self.tables
            .lock()
            .org_tags
            .insert((org_id.to_string(), tag.to_string()));
    }

    pub fn user_tags(&self, user_id: &str) -> Vec<String> {
        self.tables
            .lock()
            .user_tags
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, tag)| tag.clone())
            .collect()
    }

    pub fn invite_quota(&self, user_id: &str) -> Option<i64> {
        self.tables.lock().users.get(user_id).map(|u| u.invite_quota)
    }

    pub fn members_of(&self, org_id: &str) -> Vec<OrganizationMembership> {
        self.tables
            .lock()
            .memberships
            .values()
            .filter(|m| m.organization_id == org_id)
            .cloned()
            .collect()
    }

    /// Direct insert, as the org-creation flow would do for the first member.
    pub fn insert_member(&self, org_id: &str, user_id: &str) {
        self.tables.lock().memberships.insert(
            (org_id.to_string(), user_id.to_string()),
            OrganizationMembership {
                organization_id: org_id.to_string(),
                user_id: user_id.to_string(),
                created_at: time_now(),
            },
        );
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_org(&self, org_id: &str) -> Result<Option<Organization>> {
        Ok(self.tables.lock().orgs.get(org_id).cloned())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.tables.lock().users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn check_and_decrement_invite_quota(&self, user_id: &str) -> Result<()> {
        let mut tables = self.tables.lock();
        let user = tables.users.get_mut(user_id).ok_or(Error::NotFound)?;
        if user.invite_quota <= 0 {
            return Err(Error::QuotaExceeded);
        }
        user.invite_quota -= 1;
        Ok(())
    }

    async fn get_membership(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<Option<OrganizationMembership>> {
        let key = (org_id.to_string(), user_id.to_string());
        Ok(self
            .tables
            .lock()
            .memberships
            .get(&key)
            .filter(|m| m.is_for(org_id, user_id))
            .cloned())
    }

    async fn create_membership(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<OrganizationMembership> {
        let key = (org_id.to_string(), user_id.to_string());
        let mut tables = self.tables.lock();
        if tables.memberships.contains_key(&key) {
            return Err(Error::AlreadyMember(user_id.to_string(), org_id.to_string()));
        }
        let membership = OrganizationMembership {
            organization_id: org_id.to_string(),
            user_id: user_id.to_string(),
            created_at: time_now(),
        };
        tables.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn org_tags(&self, org_id: &str) -> Result<Vec<String>> {
        Ok(self
            .tables
            .lock()
            .org_tags
            .iter()
            .filter(|(org, _)| org == org_id)
            .map(|(_, tag)| tag.clone())
            .collect())
    }

    async fn add_user_tag(&self, user_id: &str, tag: &str) -> Result<()> {
        self.tables
            .lock()
            .user_tags
            .insert((user_id.to_string(), tag.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn quota_stops_at_zero() {
        let store = MemoryStore::new();
        store.insert_user("u1", "u1@example.com", AuthProvider::Classic, true, 2);

        store.check_and_decrement_invite_quota("u1").await.unwrap();
        store.check_and_decrement_invite_quota("u1").await.unwrap();
        assert!(matches!(
            store.check_and_decrement_invite_quota("u1").await,
            Err(Error::QuotaExceeded)
        ));
        assert_eq!(store.invite_quota("u1"), Some(0));
    }

    #[tokio::test]
    async fn duplicate_membership_is_rejected() {
        let store = MemoryStore::new();

        store.create_membership("o1", "u1").await.unwrap();
        let err = store.create_membership("o1", "u1").await.unwrap_err();

        assert!(matches!(err, Error::AlreadyMember(..)));
        assert_eq!(store.members_of("o1").len(), 1);
    }

    #[tokio::test]
    async fn separator_in_ids_does_not_merge_memberships() {
        let store = MemoryStore::new();
        store.insert_member("a/b", "c");

        assert!(store.get_membership("a", "b/c").await.unwrap().is_none());
        store.create_membership("a", "b/c").await.unwrap();

        assert_eq!(store.members_of("a").len(), 1);
        assert_eq!(store.members_of("a/b").len(), 1);
    }

    #[tokio::test]
    async fn user_tags_are_idempotent() {
        let store = MemoryStore::new();

        store.add_user_tag("u1", "editor-beta").await.unwrap();
        store.add_user_tag("u1", "editor-beta").await.unwrap();

        assert_eq!(store.user_tags("u1"), vec!["editor-beta".to_string()]);
    }
}
