use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::{
    Surreal,
    engine::remote::ws::{Client, Ws},
    opt::auth::Root,
};
use tracing::info;

use crate::{
    config::SurrealConfig,
    consts::store_const::{
        ORGANIZATION_MEMBERSHIP_TABLE, ORGANIZATION_TABLE, ORGANIZATION_TAG_TABLE, USER_TABLE,
        USER_TAG_TABLE,
    },
    errors::{Error, Result},
    models::{
        organization::{Organization, OrganizationMembership},
        user::{AuthProvider, User},
    },
    store::Store,
    utils::{get_record_id::get_record_id, time::time_now},
};

#[derive(Debug, Clone)]
pub struct SurrealStore {
    sdb: Surreal<Client>,
}

#[derive(Deserialize, Debug)]
struct OrganizationRow {
    key: String,
    name: String,
    display_name: Option<String>,
    slack_webhook_url: Option<String>,
    created_at: String,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Self {
            id: row.key,
            name: row.name,
            display_name: row.display_name,
            slack_webhook_url: row.slack_webhook_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
struct UserRow {
    key: String,
    email: String,
    display_name: Option<String>,
    email_verified: Option<bool>,
    auth_provider: Option<AuthProvider>,
    invite_quota: Option<i64>,
    created_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.key,
            email: row.email,
            display_name: row.display_name,
            email_verified: row.email_verified.unwrap_or(false),
            auth_provider: row.auth_provider.unwrap_or(AuthProvider::Classic),
            invite_quota: row.invite_quota.unwrap_or(0),
            created_at: row.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UserTagRow {
    user_id: String,
    name: String,
}

impl SurrealStore {
    pub async fn connect(config: &SurrealConfig) -> Result<Self> {
        let sdb = Surreal::new::<Ws>(config.url.as_str()).await?;
        sdb.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;
        sdb.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        info!(url = %config.url, "Connected to SurrealDB");
        Ok(Self { sdb })
    }
}

#[async_trait]
impl Store for SurrealStore {
    async fn get_org(&self, org_id: &str) -> Result<Option<Organization>> {
        let org = self
            .sdb
            .query("SELECT *, record::id(id) AS key FROM $id;")
            .bind(("id", get_record_id(ORGANIZATION_TABLE, org_id)))
            .await?
            .take::<Vec<OrganizationRow>>(0)?
            .into_iter()
            .next()
            .map(Organization::from);
        Ok(org)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let user = self
            .sdb
            .query("SELECT *, record::id(id) AS key FROM $id WHERE deleted_at == None;")
            .bind(("id", get_record_id(USER_TABLE, user_id)))
            .await?
            .take::<Vec<UserRow>>(0)?
            .into_iter()
            .next()
            .map(User::from);
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .sdb
            .query(
                "SELECT *, record::id(id) AS key FROM type::table($table) WHERE email = $email AND deleted_at == None LIMIT 1;",
            )
            .bind(("table", USER_TABLE))
            .bind(("email", email.to_string()))
            .await?
            .take::<Vec<UserRow>>(0)?
            .into_iter()
            .next()
            .map(User::from);
        Ok(user)
    }

    async fn check_and_decrement_invite_quota(&self, user_id: &str) -> Result<()> {
        // Single statement, so the read and the decrement cannot interleave.
        let remaining = self
            .sdb
            .query("UPDATE $id SET invite_quota -= 1 WHERE invite_quota > 0 RETURN VALUE invite_quota;")
            .bind(("id", get_record_id(USER_TABLE, user_id)))
            .await?
            .take::<Vec<i64>>(0)?;

        match remaining.first() {
            Some(_) => Ok(()),
            None => Err(Error::QuotaExceeded),
        }
    }

    async fn get_membership(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<Option<OrganizationMembership>> {
        // Keyed on the [org, user] array so no two pairs share a record.
        let membership = self
            .sdb
            .query(
                "SELECT * FROM type::thing($table, [$organization_id, $user_id]) WHERE organization_id = $organization_id AND user_id = $user_id;",
            )
            .bind(("table", ORGANIZATION_MEMBERSHIP_TABLE))
            .bind(("organization_id", org_id.to_string()))
            .bind(("user_id", user_id.to_string()))
            .await?
            .take::<Vec<OrganizationMembership>>(0)?
            .into_iter()
            .find(|m| m.is_for(org_id, user_id));
        Ok(membership)
    }

    async fn create_membership(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<OrganizationMembership> {
        let membership = OrganizationMembership {
            organization_id: org_id.to_string(),
            user_id: user_id.to_string(),
            created_at: time_now(),
        };

        let created = self
            .sdb
            .query("CREATE type::thing($table, [$organization_id, $user_id]) CONTENT $membership;")
            .bind(("table", ORGANIZATION_MEMBERSHIP_TABLE))
            .bind(("organization_id", org_id.to_string()))
            .bind(("user_id", user_id.to_string()))
            .bind(("membership", membership.clone()))
            .await
            .and_then(|mut response| response.take::<Vec<OrganizationMembership>>(0));

        match created {
            Ok(rows) if !rows.is_empty() => Ok(membership),
            Ok(_) => Err(Error::NotFound),
            // The record id is the (org, user) pair, so a losing racer lands here.
            Err(error) => match self.get_membership(org_id, user_id).await? {
                Some(_) => Err(Error::AlreadyMember(
                    user_id.to_string(),
                    org_id.to_string(),
                )),
                None => Err(error.into()),
            },
        }
    }

    async fn org_tags(&self, org_id: &str) -> Result<Vec<String>> {
        let tags = self
            .sdb
            .query("SELECT VALUE name FROM type::table($table) WHERE organization_id = $organization_id;")
            .bind(("table", ORGANIZATION_TAG_TABLE))
            .bind(("organization_id", org_id.to_string()))
            .await?
            .take::<Vec<String>>(0)?;
        Ok(tags)
    }

    async fn add_user_tag(&self, user_id: &str, tag: &str) -> Result<()> {
        self.sdb
            .query("UPSERT type::thing($table, [$user_id, $name]) CONTENT $tag RETURN NONE;")
            .bind(("table", USER_TAG_TABLE))
            .bind(("user_id", user_id.to_string()))
            .bind(("name", tag.to_string()))
            .bind(("tag", UserTagRow {
                user_id: user_id.to_string(),
                name: tag.to_string(),
            }))
            .await?
            .check()?;
        Ok(())
    }
}
