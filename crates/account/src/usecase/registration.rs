use std::sync::Arc;

use app_core::error::AppError;
use async_trait::async_trait;
use validator::Validate;

use crate::domain::entity::profile::NewProfile;
use crate::domain::inout::prelude::*;
use crate::outbound::repository::ProfileRepository;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait RegistrationUseCase: Send + Sync {
    async fn register_profile(&self, input: RegisterProfileInput) -> Result<RegisterProfileOutput, AppError>;
}

/// Creates the profile row that accompanies a freshly signed-up identity.
///
/// There is no retry or idempotency key: if the insert fails after the
/// identity provider already created the account, the account simply has no
/// profile until one is inserted.
#[derive(Clone)]
pub struct RegistrationService {
    repo: Arc<dyn ProfileRepository>,
}

impl RegistrationService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RegistrationUseCase for RegistrationService {
    async fn register_profile(&self, input: RegisterProfileInput) -> Result<RegisterProfileOutput, AppError> {
        let input = input.normalized();
        input.validate()?;

        let profile = self
            .repo
            .insert_profile(NewProfile { id: input.id.clone(), username: input.username, email: input.email })
            .await
            .map_err(|err| match err {
                AppError::DuplicateOrInsert(_) => err,
                other => {
                    let message = other.upstream_message();
                    tracing::error!(user_id = %input.id, "profile insert rejected: {:?}", other);
                    AppError::DuplicateOrInsert(message)
                },
            })?;

        tracing::info!(user_id = %profile.id, "profile registered");

        Ok(RegisterProfileOutput { profiles: vec![profile] })
    }
}
