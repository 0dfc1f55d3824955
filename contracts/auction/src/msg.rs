use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::Uint128;

use crate::state::Auction;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Vault holding auctioned assets and bids. This contract must be one of
    /// its approved callers.
    pub vault: String,
    /// Token id bids are made in. Defaults to the in-game currency.
    pub currency_id: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Escrows one unit of `asset_id` from the sender and opens bidding for
    /// `duration_blocks` blocks.
    CreateAuction {
        asset_id: u64,
        reserve_price: Uint128,
        duration_blocks: u64,
    },
    CancelAuction { id: u64 },
    /// Escrows `amount` from the sender and refunds the bid it replaces.
    PlaceBid { id: u64, amount: Uint128 },
    /// Settles an auction once its deadline has passed. Anyone may call it.
    CompleteAuction { id: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns Auction
    Auction { id: u64 },
    /// Returns CountResponse
    AuctionCount {},
    /// Returns AuctionsResponse, ordered by id
    Auctions {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Returns ConfigResponse
    Config {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct AuctionsResponse {
    pub auctions: Vec<Auction>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub vault: String,
    pub currency_id: u64,
}
