//! Business services on top of the repositories.

pub mod auth;
