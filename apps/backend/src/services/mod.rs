pub mod auth;
pub mod blogs;
pub mod comments;
pub mod dashboard;
