pub mod adaptors;
pub mod auth;
pub mod authz;
