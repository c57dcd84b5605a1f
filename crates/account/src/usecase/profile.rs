use std::sync::Arc;

use app_core::error::AppError;
use app_core::identity::IdentityProvider;
use async_trait::async_trait;

use crate::domain::inout::prelude::*;
use crate::outbound::repository::ProfileRepository;

const PROFILE_NOT_FOUND_MSG: &str = "Profile not found";
const PASSWORD_MISMATCH_MSG: &str = "New passwords don't match";

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ProfileUseCase: Send + Sync {
    async fn get_profile(&self, input: GetProfileInput) -> Result<GetProfileOutput, AppError>;
    async fn update_profile(&self, input: UpdateProfileInput) -> Result<UpdateProfileOutput, AppError>;
}

#[derive(Clone)]
pub struct ProfileService {
    identity: Arc<dyn IdentityProvider>,
    repo: Arc<dyn ProfileRepository>,
}

/// Drops empty strings so `""` from the account form means "unchanged".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ProfileService {
    pub fn new(identity: Arc<dyn IdentityProvider>, repo: Arc<dyn ProfileRepository>) -> Self {
        Self { identity, repo }
    }

    async fn update_username(&self, user_id: &str, username: &str) -> Result<(), AppError> {
        self.repo.update_username(user_id, username).await.map_err(|err| {
            AppError::profile_write(format!("Failed to update username: {}", err.upstream_message()))
        })
    }

    /// Writes the email to the profile row and to the identity provider.
    ///
    /// Both writes are always issued. Nothing is rolled back when only one
    /// side succeeds, so the two records can disagree until the next
    /// successful update.
    async fn update_email(&self, user_id: &str, email: &str) -> Result<(), AppError> {
        let (profile_result, identity_result) =
            tokio::join!(self.repo.update_email(user_id, email), self.identity.update_user_email(user_id, email));

        match (&profile_result, &identity_result) {
            (Ok(()), Err(_)) => {
                tracing::warn!(user_id, "profile email updated but identity provider email was not")
            },
            (Err(_), Ok(())) => {
                tracing::warn!(user_id, "identity provider email updated but profile email was not")
            },
            _ => {},
        }

        profile_result.map_err(|err| {
            AppError::profile_write(format!("Failed to update profile email: {}", err.upstream_message()))
        })?;
        identity_result.map_err(|err| AppError::identity_write(format!("Failed to update email: {err}")))?;

        Ok(())
    }
}

#[async_trait]
impl ProfileUseCase for ProfileService {
    async fn get_profile(&self, input: GetProfileInput) -> Result<GetProfileOutput, AppError> {
        self.repo
            .find_profile_by_id(&input.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND_MSG.to_string()))
    }

    async fn update_profile(&self, input: UpdateProfileInput) -> Result<UpdateProfileOutput, AppError> {
        let username = present(input.username);
        let email = present(input.email);

        // The password pair is only checked for agreement; it is never stored.
        if let Some(new_password) = present(input.new_password) {
            if input.confirm_password.as_deref() != Some(new_password.as_str()) {
                return Err(AppError::ValidationStr(PASSWORD_MISMATCH_MSG.to_string()));
            }
        }

        let mut updates = Vec::new();

        if let Some(username) = username {
            self.update_username(&input.user_id, &username).await?;
            updates.push(ProfileField::Username);
        }

        if let Some(email) = email {
            self.update_email(&input.user_id, &email).await?;
            updates.push(ProfileField::Email);
        }

        tracing::info!(user_id = %input.user_id, ?updates, "profile updated");

        Ok(UpdateProfileOutput { updates })
    }
}
