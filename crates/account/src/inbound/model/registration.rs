use serde::Deserialize;

// ╔════════════════════════════╗
// ║    Register Profile        ║
// ╚════════════════════════════╝

/// The profile row posted by the sign-up modal right after the identity
/// provider created the account. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterProfileRequest {
    pub id: String,
    pub username: String,
    pub email: String,
}
