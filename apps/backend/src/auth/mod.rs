pub mod claims;
pub mod jwt;
pub mod policy;
