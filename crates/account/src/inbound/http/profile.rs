use app_core::extractors::AppJson;
use app_core::middleware::AuthUser;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, debug_handler};

use crate::domain::inout::prelude::*;
use crate::inbound::model::prelude::*;
use crate::inbound::state::AccountState;

#[debug_handler]
pub async fn get_profile(State(state): State<AccountState>, user: AuthUser) -> impl IntoResponse {
    state
        .profile
        .get_profile(GetProfileInput { user_id: user.id })
        .await
        .map(ProfileResponse::from)
        .map(Json)
}

#[debug_handler]
pub async fn update_profile(
    State(state): State<AccountState>,
    user: AuthUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> impl IntoResponse {
    state
        .profile
        .update_profile(UpdateProfileInput {
            user_id: user.id,
            username: req.username,
            email: req.email,
            new_password: req.new_password,
            confirm_password: req.confirm_password,
        })
        .await
        .map(UpdateProfileResponse::from)
        .map(Json)
}
