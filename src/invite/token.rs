//! Self-contained invitation tokens.
//!
//! A token is an HS256 JWT over the organization, the invited address and the
//! issue time. Nothing is stored server side; whoever holds the invite secret
//! can check a token without a database round trip. Expiry is left to the
//! caller, which compares `issued_at` against its own policy.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    models::invitation::InvitationToken,
};

#[derive(Debug, Serialize, Deserialize)]
struct InviteClaims {
    org: String,
    email: String,
    iat: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn mint(&self, org_id: &str, email: &str) -> Result<String> {
        self.mint_at(org_id, email, Utc::now())
    }

    /// Issue time is kept to whole seconds.
    pub fn mint_at(&self, org_id: &str, email: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = InviteClaims {
            org: org_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn decode(&self, token: &str) -> Result<InvitationToken> {
        let claims = decode::<InviteClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| Error::InvalidInviteToken)?
            .claims;

        if claims.org.is_empty() || claims.email.is_empty() {
            return Err(Error::InvalidInviteToken);
        }
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(Error::InvalidInviteToken)?;

        Ok(InvitationToken {
            org_id: claims.org,
            email: claims.email,
            issued_at,
        })
    }
}
