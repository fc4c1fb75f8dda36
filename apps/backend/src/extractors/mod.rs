pub mod current_admin;

pub use current_admin::CurrentAdmin;
