use std::sync::Arc;

use app_core::identity::IdentityProvider;
use app_core::middleware::auth;
use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::inbound::http::profile::*;
use crate::inbound::http::registration::*;
use crate::inbound::state::AccountState;

pub fn create_router(state: AccountState, identity: Arc<dyn IdentityProvider>) -> Router {
    let protected_routes = Router::new()
        // account scope
        .route("/api/accountInfo", get(get_profile).put(update_profile))
        .route_layer(middleware::from_fn_with_state(identity, auth));

    let public_routes = Router::new()
        // sign-up scope
        .route("/api/supabase-auth", post(register_profile));

    Router::new().merge(public_routes).merge(protected_routes).with_state(state)
}

#[cfg(test)]
mod tests {
    use app_core::error::AppError;
    use app_core::identity::{IdentityError, IdentityUser, MockIdentityProvider};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use mockall::predicate::eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::entity::profile::{NewProfile, Profile};
    use crate::outbound::repository::MockProfileRepository;
    use crate::usecase::profile::ProfileService;
    use crate::usecase::registration::RegistrationService;

    const TOKEN: &str = "valid_token";
    const USER_ID: &str = "user-123";

    fn app(identity: MockIdentityProvider, repo: MockProfileRepository) -> Router {
        let identity: Arc<dyn IdentityProvider> = Arc::new(identity);
        let repo = Arc::new(repo);
        let state = AccountState::new(
            Arc::new(ProfileService::new(identity.clone(), repo.clone())),
            Arc::new(RegistrationService::new(repo)),
        );
        create_router(state, identity)
    }

    fn signed_in() -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::new();
        identity.expect_get_user().with(eq(TOKEN)).returning(|_| {
            Box::pin(async move { Ok(IdentityUser { id: USER_ID.to_string(), email: Some("old@x.com".to_string()) }) })
        });
        identity
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri).header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_update_without_token_is_rejected_before_any_write() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_get_user().never();
        identity.expect_update_user_email().never();
        let mut repo = MockProfileRepository::new();
        repo.expect_update_username().never();
        repo.expect_update_email().never();

        let request = json_request(Method::PUT, "/api/accountInfo", None, json!({ "username": "alice" }));
        let response = app(identity, repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Missing or invalid authorization header");
    }

    #[tokio::test]
    async fn test_update_with_rejected_token() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_get_user().returning(|_| Box::pin(async move { Err(IdentityError::InvalidToken) }));
        let mut repo = MockProfileRepository::new();
        repo.expect_update_username().never();

        let request = json_request(Method::PUT, "/api/accountInfo", Some("stale"), json!({ "username": "alice" }));
        let response = app(identity, repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_update_username() {
        let mut repo = MockProfileRepository::new();
        repo.expect_update_username()
            .with(eq(USER_ID), eq("alice"))
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(()) }));
        repo.expect_update_email().never();

        let request = json_request(Method::PUT, "/api/accountInfo", Some(TOKEN), json!({ "username": "alice" }));
        let response = app(signed_in(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Profile updated successfully! Updated: username");
        assert_eq!(body["updates"], json!(["username"]));
    }

    #[tokio::test]
    async fn test_update_with_mismatched_passwords() {
        let mut repo = MockProfileRepository::new();
        repo.expect_update_username().never();
        repo.expect_update_email().never();

        let request = json_request(
            Method::PUT,
            "/api/accountInfo",
            Some(TOKEN),
            json!({ "username": "alice", "newPassword": "abc", "confirmPassword": "abd" }),
        );
        let response = app(signed_in(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "New passwords don't match");
    }

    #[tokio::test]
    async fn test_update_email_when_identity_provider_fails() {
        let mut identity = signed_in();
        identity.expect_update_user_email().with(eq(USER_ID), eq("new@x.com")).times(1).returning(|_, _| {
            Box::pin(async move {
                Err(IdentityError::Rejected { status: 422, message: "Email rate limit exceeded".to_string() })
            })
        });
        let mut repo = MockProfileRepository::new();
        repo.expect_update_email()
            .with(eq(USER_ID), eq("new@x.com"))
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(()) }));

        let request = json_request(Method::PUT, "/api/accountInfo", Some(TOKEN), json!({ "email": "new@x.com" }));
        let response = app(identity, repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to update email: Email rate limit exceeded");
    }

    #[tokio::test]
    async fn test_update_with_empty_body_changes_nothing() {
        let mut repo = MockProfileRepository::new();
        repo.expect_update_username().never();
        repo.expect_update_email().never();

        let request = json_request(Method::PUT, "/api/accountInfo", Some(TOKEN), json!({ "username": "" }));
        let response = app(signed_in(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Profile updated successfully! Updated: ");
        assert_eq!(body["updates"], json!([]));
    }

    #[tokio::test]
    async fn test_update_with_malformed_body() {
        let mut repo = MockProfileRepository::new();
        repo.expect_update_username().never();

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/accountInfo")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {TOKEN}"))
            .body(Body::from("{not json"))
            .unwrap();
        let response = app(signed_in(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_profile_by_id().with(eq(USER_ID)).times(1).returning(|id| {
            let id = id.to_string();
            Box::pin(async move {
                Ok(Some(Profile { id, username: "alice".to_string(), email: "alice@x.com".to_string() }))
            })
        });

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/accountInfo")
            .header("authorization", format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();
        let response = app(signed_in(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "id": USER_ID, "username": "alice", "email": "alice@x.com" }));
    }

    #[tokio::test]
    async fn test_register_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_insert_profile()
            .with(eq(NewProfile {
                id: "u1".to_string(),
                username: "alice".to_string(),
                email: "alice@x.com".to_string(),
            }))
            .times(1)
            .returning(|new| Box::pin(async move { Ok(Profile::from(new)) }));

        let request = json_request(
            Method::POST,
            "/api/supabase-auth",
            None,
            json!({ "id": "u1", "username": " alice ", "email": "Alice@X.com", "password": "ignored" }),
        );
        let response = app(MockIdentityProvider::new(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([{ "id": "u1", "username": "alice", "email": "alice@x.com" }]));
    }

    #[tokio::test]
    async fn test_register_duplicate_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_insert_profile().times(1).returning(|_| {
            Box::pin(async move { Err(AppError::DuplicateOrInsert("User already exists".to_string())) })
        });

        let request = json_request(
            Method::POST,
            "/api/supabase-auth",
            None,
            json!({ "id": "u1", "username": "alice", "email": "alice@x.com" }),
        );
        let response = app(MockIdentityProvider::new(), repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "User already exists");
    }
}
