//! Outbound adapters implementing the domain ports.

pub mod local;
pub mod remote;
