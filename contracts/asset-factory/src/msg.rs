use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use game_economy::ledger::{
    ApprovedForAllResponse, BalanceResponse, LedgerExecuteMsg as ExecuteMsg,
    LedgerQueryMsg as QueryMsg, MinterResponse, TotalSupplyResponse,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InitialBalance {
    pub address: String,
    pub token_id: u64,
    pub amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Address allowed to mint. Defaults to the instantiating sender.
    pub minter: Option<String>,
    pub initial_balances: Vec<InitialBalance>,
}
