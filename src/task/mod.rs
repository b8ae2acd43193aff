//! Task state synchronization for a single task board.
//!
//! This module keeps a client-side view of the board's tasks consistent with
//! the remote store. Mutations go through the repository client, every
//! successful mutation invalidates the cache, and the board projection is
//! recomputed from whatever snapshot the cache holds. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
