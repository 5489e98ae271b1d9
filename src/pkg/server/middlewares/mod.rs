pub mod authn;
pub mod roles;
