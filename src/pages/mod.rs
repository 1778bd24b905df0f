pub mod demo;
pub mod home;
pub mod not_found;
