pub mod db;
pub mod env_admin;
