pub mod account;
pub mod edit_profile;
pub mod login_user;
pub mod pagination;
pub mod post;
pub mod register_user;
pub mod reset_password;
