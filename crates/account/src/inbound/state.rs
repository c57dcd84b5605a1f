use std::sync::Arc;

use crate::usecase::profile::ProfileUseCase;
use crate::usecase::registration::RegistrationUseCase;

#[derive(Clone)]
pub struct AccountState {
    pub profile: Arc<dyn ProfileUseCase>,
    pub registration: Arc<dyn RegistrationUseCase>,
}

impl AccountState {
    pub fn new(profile: Arc<dyn ProfileUseCase>, registration: Arc<dyn RegistrationUseCase>) -> Self {
        Self { profile, registration }
    }
}
