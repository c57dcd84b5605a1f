pub mod profile;
pub mod registration;

pub mod prelude {
    pub use super::profile::*;
    pub use super::registration::*;
}
