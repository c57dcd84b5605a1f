pub mod profiles;

pub mod prelude {
    pub use super::profiles::Entity as Profiles;
}
