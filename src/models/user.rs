use serde::{Deserialize, Serialize};

use crate::utils::jwt::Claims;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Classic, //Email and Password
    PasswordLess,
    MagicLink,
    Amazon,
    Discord,
    Github,
    Facebook,
    Google,
    Linkedin,
    Stripe,
}

impl AuthProvider {
    /// Native identities prove their email with us; federated providers are
    /// trusted to have verified it already.
    pub fn is_native(self) -> bool {
        matches!(
            self,
            AuthProvider::Classic | AuthProvider::PasswordLess | AuthProvider::MagicLink
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String, // ! unique & (len = 255)
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub auth_provider: AuthProvider,
    pub invite_quota: i64, // ! never below 0
    pub created_at: String,
}

impl User {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// The identity a request acts as, taken from its bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub email: String,
    pub provider: AuthProvider,
}

impl From<Claims> for Actor {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            provider: claims.provider,
        }
    }
}
