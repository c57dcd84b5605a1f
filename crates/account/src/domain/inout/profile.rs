use crate::domain::entity::profile::Profile;

// ╔════════════════════════════╗
// ║        Get Profile         ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct GetProfileInput {
    pub user_id: String,
}

pub type GetProfileOutput = Profile;

// ╔════════════════════════════╗
// ║      Update Profile        ║
// ╚════════════════════════════╝

/// Every field is optional. Empty strings count as absent because the
/// account form submits untouched inputs as `""`.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Username => "username",
            ProfileField::Email => "email",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UpdateProfileOutput {
    pub updates: Vec<ProfileField>,
}

impl UpdateProfileOutput {
    pub fn message(&self) -> String {
        let fields = self.updates.iter().map(ProfileField::as_str).collect::<Vec<_>>();
        format!("Profile updated successfully! Updated: {}", fields.join(", "))
    }
}
