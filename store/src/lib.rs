//! Company credential records with local storage and remote fallback.
//!
//! The [`domain`] module holds the record model, the ports, and the two
//! services: [`domain::SyncCoordinator`] chooses between local and remote
//! backends, and [`domain::RecordStore`] derives credentials and keeps the
//! record list. Adapters for local files and the remote protocols live in
//! [`outbound`]. [`bootstrap::open_store`] wires everything from
//! [`config::StoreSettings`].

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;
