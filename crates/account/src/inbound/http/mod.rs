pub mod profile;
pub mod registration;
