use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{Error, Result as RResult};
use crate::models::user::Actor;
use crate::state::AppState;
use crate::utils::jwt::decode_jwt;

/// Attaches the [`Actor`] of a valid bearer session to the request.
///
/// Requests without an `Authorization` header pass through anonymously and
/// handlers decide; a header that is present but invalid is rejected here.
pub async fn session_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, Response> {
    let (mut parts, body) = request.into_parts();
    if let Some(actor) = check_auth_headers(&parts.headers, &state.config.session_secret)
        .map_err(IntoResponse::into_response)?
    {
        parts.extensions.insert(actor);
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn check_auth_headers(headers: &HeaderMap, secret: &str) -> RResult<Option<Actor>> {
    let Some(header_value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let header_value = header_value.to_str().map_err(|_| Error::InvalidToken)?;

    let mut parts = header_value.trim().splitn(2, ' ');

    let scheme = parts.next().ok_or(Error::MissingToken)?;
    let token = parts.next().ok_or(Error::MissingToken)?;

    if scheme != "Bearer" {
        tracing::warn!("Invalid auth scheme: {scheme}");
        return Err(Error::InvalidScheme);
    }

    decode_jwt(token.trim(), secret).map(|data| Some(Actor::from(data.claims)))
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or(Error::NotAuthenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Actor>().cloned())
    }
}
