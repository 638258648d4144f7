pub mod app_error;
pub mod delete_not_activated_expired_accounts;
pub mod post;
pub mod register;
pub mod token;
