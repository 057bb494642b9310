use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    errors::Result,
    models::{
        invitation::{AcceptInviteResult, InviteUserResult},
        user::Actor,
    },
    state::AppState,
    utils::validated_form::ValidatedJson,
};

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
pub struct InviteUserRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
}

#[derive(serde::Deserialize, Debug, Clone, validator::Validate)]
pub struct AcceptInviteRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

pub async fn invite_user(
    State(state): State<AppState>,
    actor: Option<Actor>,
    Path(org_id): Path<String>,
    ValidatedJson(input): ValidatedJson<InviteUserRequest>,
) -> Result<(StatusCode, Json<InviteUserResult>)> {
    let result = state
        .invitations
        .issue(actor.as_ref(), &org_id, &input.email)
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn accept_invite(
    State(state): State<AppState>,
    actor: Option<Actor>,
    ValidatedJson(input): ValidatedJson<AcceptInviteRequest>,
) -> Result<Json<AcceptInviteResult>> {
    let result = state
        .invitations
        .accept(actor.as_ref(), input.token.trim())
        .await?;

    Ok(Json(result))
}
