use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use game_economy::vault::{
    AccountBalancesResponse, ApprovedCallersResponse, IsApprovedCallerResponse, TokenBalance,
    VaultBalanceResponse as BalanceResponse, VaultConfigResponse as ConfigResponse,
    VaultExecuteMsg as ExecuteMsg, VaultQueryMsg as QueryMsg,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Address allowed to approve and revoke callers. Defaults to the sender.
    pub admin: Option<String>,
    /// Token ledger holding the real custody of deposited tokens.
    pub ledger: String,
}
