use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use game_economy::VaultContract;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub vault: VaultContract,
}

pub const CONFIG: Item<Config> = Item::new("config");

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    Canceled,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Canceled => "canceled",
        };
        f.write_str(status)
    }
}

/// One unit of `offered_asset_id` from the proposer against one unit of
/// `requested_asset_id` from the receiver. The offered unit sits in vault
/// escrow for as long as the proposal is pending.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TradeProposal {
    pub id: u64,
    pub proposer: Addr,
    pub receiver: Addr,
    pub offered_asset_id: u64,
    pub requested_asset_id: u64,
    pub status: ProposalStatus,
}

pub const PROPOSALS: Map<u64, TradeProposal> = Map::new("proposals");
pub const PROPOSAL_SEQ: Item<u64> = Item::new("proposal_seq");
