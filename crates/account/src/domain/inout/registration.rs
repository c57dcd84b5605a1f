use validator::Validate;

use crate::domain::entity::profile::Profile;

// ╔════════════════════════════╗
// ║     Register Profile       ║
// ╚════════════════════════════╝

#[derive(Debug, Clone, Validate)]
pub struct RegisterProfileInput {
    #[validate(length(min = 1, message = "id cannot be empty"))]
    pub id: String,

    #[validate(length(min = 1, max = 64, message = "username must be between 1 and 64 characters"))]
    pub username: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl RegisterProfileInput {
    /// Trims the username and canonicalizes the email.
    pub fn normalized(self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
        }
    }
}

#[derive(Debug)]
pub struct RegisterProfileOutput {
    pub profiles: Vec<Profile>,
}
