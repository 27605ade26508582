//! HTTP client for the Hostrix backend

pub mod client;
pub mod deployments;
pub mod projects;
