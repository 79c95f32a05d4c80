pub mod home;
pub mod projects;
pub mod system;
