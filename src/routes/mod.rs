use axum::{Router, middleware, routing::post};

use crate::{
    middleware::session_middleware,
    routes::invitation::{accept_invite, invite_user},
    state::AppState,
};

pub mod invitation;

pub fn api_router(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/orgs/{org_id}/invitations", post(invite_user))
        .route("/invitations/accept", post(accept_invite))
        .layer(middleware::from_fn_with_state(
            config.clone(),
            session_middleware,
        ))
        .with_state(config)
}
