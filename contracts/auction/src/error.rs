use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use crate::state::AuctionStatus;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Auction {id} not found")]
    AuctionNotFound { id: u64 },

    #[error("Only the seller {seller} may do this, not {caller}")]
    NotTheSeller { caller: String, seller: String },

    #[error("Auction is {status}, not open")]
    NotOpen { status: AuctionStatus },

    #[error("Auction deadline {deadline_block} has passed (current block {current_block})")]
    DeadlineHasPassed {
        current_block: u64,
        deadline_block: u64,
    },

    #[error("Auction deadline {deadline_block} has not passed (current block {current_block})")]
    DeadlineNotPassed {
        current_block: u64,
        deadline_block: u64,
    },

    #[error("Bid of {amount} does not beat the highest bid of {highest_bid}")]
    BidTooLow {
        amount: Uint128,
        highest_bid: Uint128,
    },
}
