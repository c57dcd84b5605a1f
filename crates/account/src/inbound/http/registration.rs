use app_core::extractors::AppJson;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, debug_handler};

use crate::domain::inout::prelude::*;
use crate::inbound::model::prelude::*;
use crate::inbound::state::AccountState;

#[debug_handler]
pub async fn register_profile(
    State(state): State<AccountState>,
    AppJson(req): AppJson<RegisterProfileRequest>,
) -> impl IntoResponse {
    state
        .registration
        .register_profile(RegisterProfileInput { id: req.id, username: req.username, email: req.email })
        .await
        .map(|output| output.profiles.into_iter().map(ProfileResponse::from).collect::<Vec<_>>())
        .map(Json)
}
