use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, BlockInfo, Uint128};
use cw_storage_plus::{Item, Map};
use game_economy::VaultContract;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub vault: VaultContract,
    /// Token id bids are made in.
    pub currency_id: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    Open,
    Canceled,
    Ended,
    ReserveNotMet,
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = match self {
            AuctionStatus::Open => "open",
            AuctionStatus::Canceled => "canceled",
            AuctionStatus::Ended => "ended",
            AuctionStatus::ReserveNotMet => "reserve_not_met",
        };
        f.write_str(status)
    }
}

/// The auctioned unit and the standing highest bid are both held in vault
/// escrow while the auction is open.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Auction {
    pub id: u64,
    pub seller: Addr,
    pub asset_id: u64,
    pub reserve_price: Uint128,
    pub deadline_block: u64,
    pub highest_bid: Uint128,
    pub highest_bidder: Option<Addr>,
    pub winning_bid: Uint128,
    pub winning_bidder: Option<Addr>,
    pub status: AuctionStatus,
}

impl Auction {
    pub fn is_expired(&self, block: &BlockInfo) -> bool {
        block.height >= self.deadline_block
    }
}

pub const AUCTIONS: Map<u64, Auction> = Map::new("auctions");
pub const AUCTION_SEQ: Item<u64> = Item::new("auction_seq");
