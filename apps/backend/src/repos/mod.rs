pub mod admins;
pub mod blogs;
pub mod comments;
