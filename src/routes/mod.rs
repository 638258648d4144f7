pub mod edit_profile_route;
pub mod email_confirm_route;
pub mod follow_user_route;
pub mod get_posts;
pub mod get_profile_route;
pub mod login_route;
pub mod logout_route;
pub mod publish_post;
pub mod register_route;
pub mod reset_password_route;
pub mod unfollow_user_route;
