/// A per-user profile row, keyed by the identity provider's subject id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<NewProfile> for Profile {
    fn from(value: NewProfile) -> Self {
        Self { id: value.id, username: value.username, email: value.email }
    }
}
