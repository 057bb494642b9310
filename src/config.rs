//! Service configuration.
//!
//! Every flag can also be supplied through its `ORG_INVITES_*` environment
//! variable; command-line arguments take precedence.

use std::{net::SocketAddr, time::Duration};

use clap::{Args, Parser, ValueEnum};

use crate::consts::invite_const::EDITOR_BETA_TAG;

#[derive(Parser, Debug, Clone)]
#[command(name = "org-invites", version, about = "Organization invitation service")]
pub struct Config {
    #[arg(long, env = "ORG_INVITES_LISTEN", default_value = "127.0.0.1:3587")]
    pub listen: SocketAddr,

    /// Public base URL used to build accept-invite links.
    #[arg(long, env = "ORG_INVITES_APP_URL", default_value = "http://localhost:3587")]
    pub app_url: String,

    #[arg(
        long,
        env = "ORG_INVITES_DEPLOYMENT",
        value_enum,
        default_value_t = DeploymentMode::MultiTenant
    )]
    pub deployment: DeploymentMode,

    /// HS256 secret the session issuer signs bearer tokens with.
    #[arg(long, env = "ORG_INVITES_SESSION_SECRET")]
    pub session_secret: String,

    /// HS256 secret for invitation tokens.
    #[arg(long, env = "ORG_INVITES_INVITE_SECRET")]
    pub invite_secret: String,

    /// Send invitation emails. When off, the caller shows the link instead.
    #[arg(long, env = "ORG_INVITES_SEND_EMAIL")]
    pub send_email: bool,

    /// Reject invitation tokens older than this. Unset means tokens never expire.
    #[arg(long, env = "ORG_INVITES_INVITE_TTL_HOURS")]
    pub invite_ttl_hours: Option<u64>,

    /// Organization tags copied onto already registered invitees.
    #[arg(
        long = "invitee-tag",
        env = "ORG_INVITES_INVITEE_TAGS",
        value_delimiter = ',',
        default_value = EDITOR_BETA_TAG
    )]
    pub invitee_tags: Vec<String>,

    #[arg(long, env = "ORG_INVITES_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub surreal: SurrealConfig,
}

#[derive(Args, Debug, Clone)]
pub struct SurrealConfig {
    #[arg(long = "surreal-url", env = "ORG_INVITES_SURREAL_URL", default_value = "localhost:8050")]
    pub url: String,
    #[arg(long = "surreal-user", env = "ORG_INVITES_SURREAL_USER", default_value = "root")]
    pub username: String,
    #[arg(long = "surreal-pass", env = "ORG_INVITES_SURREAL_PASS", default_value = "secret")]
    pub password: String,
    #[arg(long = "surreal-ns", env = "ORG_INVITES_SURREAL_NS", default_value = "orgs")]
    pub namespace: String,
    #[arg(long = "surreal-db", env = "ORG_INVITES_SURREAL_DB", default_value = "orgs")]
    pub database: String,
}

/// Distinguishes hosted deployments from trusted single-tenant installs,
/// where the quota and email-verification gates are skipped.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    #[default]
    MultiTenant,
    SingleTenant,
}

impl DeploymentMode {
    pub fn is_trusted(self) -> bool {
        matches!(self, DeploymentMode::SingleTenant)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// An age too large to represent is treated as no expiry.
    pub fn invite_ttl(&self) -> Option<Duration> {
        self.invite_ttl_hours
            .and_then(|hours| hours.checked_mul(60 * 60))
            .map(Duration::from_secs)
    }
}
