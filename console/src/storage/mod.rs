//! Persistent client state

pub mod kv;
pub mod layout;
pub mod settings;
