//! Shared interface of the game economy contracts.
//!
//! The asset factory, the vault and the trade, rental and auction engines are
//! deployed as separate contracts. This package holds the message types they
//! exchange and thin helpers (`LedgerContract`, `VaultContract`) for building
//! those messages and running the queries the contracts need from each other.

pub mod ledger;
pub mod pagination;
pub mod sequence;
pub mod vault;

pub use crate::ledger::LedgerContract;
pub use crate::vault::VaultContract;

/// Token id of the fungible in-game currency.
pub const IGC_TOKEN_ID: u64 = 0;

/// Block count of roughly one hour at six second blocks.
pub const BLOCKS_PER_HOUR: u64 = 600;
