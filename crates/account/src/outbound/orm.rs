use std::sync::Arc;

use app_core::error::AppError;
use async_trait::async_trait;
use sea_orm::prelude::Expr;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr};

use super::entity::prelude::Profiles;
use super::entity::profiles;
use super::repository::ProfileRepository;
use crate::domain::entity::profile::{NewProfile, Profile};

pub(crate) const USER_EXISTS_MSG: &str = "User already exists";

/// `ProfileORM` reads and writes the `profiles` table that lives next to the
/// identity provider's own user records.
pub struct ProfileORM {
    db: Arc<DatabaseConnection>,
}

impl ProfileORM {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_profile(model: profiles::Model) -> Profile {
        Profile { id: model.id, username: model.username, email: model.email }
    }

    /// Uniqueness violations get a stable message; anything else keeps the
    /// store's error so the caller can report it.
    fn map_insert_error(err: DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("profile insert hit a uniqueness constraint: {}", detail);
                AppError::DuplicateOrInsert(USER_EXISTS_MSG.to_string())
            },
            _ => AppError::Database(err),
        }
    }
}

#[async_trait]
impl ProfileRepository for ProfileORM {
    async fn find_profile_by_id(&self, id: &str) -> Result<Option<Profile>, AppError> {
        let model = Profiles::find_by_id(id.to_owned()).one(self.db.as_ref()).await?;

        Ok(model.map(Self::to_profile))
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, AppError> {
        let active_model = profiles::ActiveModel {
            id: ActiveValue::Set(profile.id.clone()),
            username: ActiveValue::Set(profile.username.clone()),
            email: ActiveValue::Set(profile.email.clone()),
        };

        Profiles::insert(active_model)
            .exec(self.db.as_ref())
            .await
            .map_err(Self::map_insert_error)?;

        Ok(Profile::from(profile))
    }

    async fn update_username(&self, id: &str, username: &str) -> Result<(), AppError> {
        Profiles::update_many()
            .col_expr(profiles::Column::Username, Expr::value(username.to_owned()))
            .filter(profiles::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn update_email(&self, id: &str, email: &str) -> Result<(), AppError> {
        Profiles::update_many()
            .col_expr(profiles::Column::Email, Expr::value(email.to_owned()))
            .filter(profiles::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }
}
