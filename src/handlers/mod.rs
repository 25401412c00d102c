pub mod home;
pub mod info;
pub mod links;
pub mod redirect;
