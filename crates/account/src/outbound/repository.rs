use app_core::error::AppError;
use async_trait::async_trait;

use crate::domain::entity::profile::{NewProfile, Profile};

/// Persistence boundary for profile rows.
///
/// Updates are keyed by the identity provider's user id and do not fail when
/// no row matches.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    async fn find_profile_by_id(&self, id: &str) -> Result<Option<Profile>, AppError>;
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, AppError>;
    async fn update_username(&self, id: &str, username: &str) -> Result<(), AppError>;
    async fn update_email(&self, id: &str, email: &str) -> Result<(), AppError>;
}
