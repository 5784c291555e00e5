pub mod contact;
pub mod home;
pub mod json_error;
pub mod portfolio;
pub mod system;
