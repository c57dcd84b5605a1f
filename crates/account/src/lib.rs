mod domain;
mod inbound;
mod outbound;
mod usecase;

use std::sync::Arc;

use app_core::identity::IdentityProvider;
pub use inbound::router::create_router;
pub use inbound::state::AccountState;
use sea_orm::DatabaseConnection;

use crate::outbound::orm::ProfileORM;
use crate::usecase::profile::ProfileService;
use crate::usecase::registration::RegistrationService;

pub struct Dependency {
    pub db: Arc<DatabaseConnection>,
    pub identity: Arc<dyn IdentityProvider>,
}

pub fn new(dep: Dependency) -> AccountState {
    let repo = Arc::new(ProfileORM::new(dep.db));

    let profile_svc = Arc::new(ProfileService::new(dep.identity, repo.clone()));
    let registration_svc = Arc::new(RegistrationService::new(repo));

    AccountState::new(profile_svc, registration_svc)
}
