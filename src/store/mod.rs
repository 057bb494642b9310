//! Persistence seam for organizations, users, memberships and tags.
//!
//! Implementations must make [`Store::check_and_decrement_invite_quota`] and
//! [`Store::create_membership`] individually atomic; the invitation flow
//! relies on them for its quota and single-membership guarantees.

use async_trait::async_trait;

use crate::{
    errors::Result,
    models::{
        organization::{Organization, OrganizationMembership},
        user::User,
    },
};

#[cfg(test)]
pub mod memory;
pub mod surreal;

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_org(&self, org_id: &str) -> Result<Option<Organization>>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Takes one invitation from the user's allowance, or fails with
    /// `QuotaExceeded` when none is left.
    async fn check_and_decrement_invite_quota(&self, user_id: &str) -> Result<()>;

    async fn get_membership(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<Option<OrganizationMembership>>;

    /// Fails with `AlreadyMember` when the pair already exists.
    async fn create_membership(&self, org_id: &str, user_id: &str)
    -> Result<OrganizationMembership>;

    async fn org_tags(&self, org_id: &str) -> Result<Vec<String>>;

    /// Idempotent.
    async fn add_user_tag(&self, user_id: &str, tag: &str) -> Result<()>;
}
