//! Client for the hosted identity provider (Supabase Auth / GoTrue).
//!
//! The service never decodes bearer tokens itself. It forwards them to the
//! provider and asks whose token it is.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Token was rejected by the identity provider")]
    InvalidToken,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid URL format: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The identity provider's view of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[async_trait::async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to the user it was issued for.
    async fn get_user(&self, token: &str) -> Result<IdentityUser, IdentityError>;

    /// Replaces the email on the provider's own user record.
    async fn update_user_email(&self, user_id: &str, email: &str) -> Result<(), IdentityError>;
}

#[derive(Serialize)]
struct EmailUpdate<'a> {
    email: &'a str,
}

/// GoTrue puts its message in one of several fields depending on the
/// endpoint and version.
#[derive(Deserialize, Default)]
struct ProviderErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ProviderErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error_description).or(self.error)
    }
}

#[derive(Debug, Clone)]
pub struct SupabaseIdentity {
    client: Client,
    base_url: Url,
    service_key: String,
}

impl SupabaseIdentity {
    pub fn new(base_url: &str, service_key: String, timeout: Duration) -> Result<Self, IdentityError> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let base_url = if base_url.ends_with('/') { Url::parse(base_url)? } else { Url::parse(&format!("{base_url}/"))? };
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url, service_key })
    }

    fn user_url(&self) -> Result<Url, IdentityError> {
        Ok(self.base_url.join("auth/v1/user")?)
    }

    fn admin_user_url(&self, user_id: &str) -> Result<Url, IdentityError> {
        let mut url = self.base_url.join("auth/v1/admin/users/")?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(user_id);
        Ok(url)
    }

    async fn rejection(response: reqwest::Response) -> IdentityError {
        let status = response.status();
        let body = response.json::<ProviderErrorBody>().await.unwrap_or_default();
        let message = body
            .into_message()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("identity provider error").to_string());

        IdentityError::Rejected { status: status.as_u16(), message }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn get_user(&self, token: &str) -> Result<IdentityUser, IdentityError> {
        let response = self
            .client
            .get(self.user_url()?)
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<IdentityUser>().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(IdentityError::InvalidToken),
            _ => Err(Self::rejection(response).await),
        }
    }

    async fn update_user_email(&self, user_id: &str, email: &str) -> Result<(), IdentityError> {
        let response = self
            .client
            .put(self.admin_user_url(user_id)?)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&EmailUpdate { email })
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let err = Self::rejection(response).await;
        tracing::error!(user_id, "identity provider rejected email update: {}", err);
        Err(err)
    }
}
