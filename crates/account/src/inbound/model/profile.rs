use serde::{Deserialize, Serialize};

use crate::domain::entity::profile::Profile;
use crate::domain::inout::profile::UpdateProfileOutput;

// ╔════════════════════════════╗
// ║    Get Profile             ║
// ╚════════════════════════════╝

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self { id: profile.id, username: profile.username, email: profile.email }
    }
}

// ╔════════════════════════════╗
// ║    Update Profile          ║
// ╚════════════════════════════╝

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub message: String,
    pub updates: Vec<&'static str>,
}

impl From<UpdateProfileOutput> for UpdateProfileResponse {
    fn from(output: UpdateProfileOutput) -> Self {
        Self {
            success: true,
            message: output.message(),
            updates: output.updates.iter().map(|field| field.as_str()).collect(),
        }
    }
}
