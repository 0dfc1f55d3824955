use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::TradeProposal;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Vault holding the escrowed assets. This contract must be one of its
    /// approved callers.
    pub vault: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Escrows one unit of `offered_asset_id` from the sender and proposes
    /// swapping it for one unit of `requested_asset_id` held by `receiver`.
    CreateProposal {
        receiver: String,
        offered_asset_id: u64,
        requested_asset_id: u64,
    },
    CancelProposal { id: u64 },
    AcceptProposal { id: u64 },
    RejectProposal { id: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns TradeProposal
    Proposal { id: u64 },
    /// Returns CountResponse
    ProposalCount {},
    /// Returns ProposalsResponse, ordered by id
    Proposals {
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
pub struct ProposalsResponse {
    pub proposals: Vec<TradeProposal>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub vault: String,
}
