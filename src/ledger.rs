use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, CustomQuery, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Execute interface of the multi-token ledger that holds real token custody.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LedgerExecuteMsg {
    /// Creates `amount` new units of `token_id` for `to`. Minter only.
    Mint {
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    /// Destroys `amount` units of `token_id` held by the sender.
    Burn { token_id: u64, amount: Uint128 },
    Transfer {
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    BatchTransfer {
        to: String,
        token_ids: Vec<u64>,
        amounts: Vec<Uint128>,
    },
    /// Moves tokens out of `from`. The sender must be `from` or one of its
    /// approved operators.
    TransferFrom {
        from: String,
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    BatchTransferFrom {
        from: String,
        to: String,
        token_ids: Vec<u64>,
        amounts: Vec<Uint128>,
    },
    /// Lets `operator` move any of the sender's tokens.
    ApproveAll { operator: String },
    RevokeAll { operator: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LedgerQueryMsg {
    /// Returns BalanceResponse
    Balance { owner: String, token_id: u64 },
    /// Returns ApprovedForAllResponse
    IsApprovedForAll { owner: String, operator: String },
    /// Returns TotalSupplyResponse
    TotalSupply { token_id: u64 },
    /// Returns MinterResponse
    Minter {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ApprovedForAllResponse {
    pub approved: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TotalSupplyResponse {
    pub supply: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MinterResponse {
    pub minter: String,
}

/// LedgerContract is a wrapper around Addr that provides helpers for
/// working with the token ledger contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LedgerContract(pub Addr);

impl LedgerContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: LedgerExecuteMsg) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        }
        .into())
    }

    /// Real token balance of `owner` as recorded by the ledger.
    pub fn balance<CQ: CustomQuery>(
        &self,
        querier: &QuerierWrapper<CQ>,
        owner: impl Into<String>,
        token_id: u64,
    ) -> StdResult<Uint128> {
        let res: BalanceResponse = querier.query_wasm_smart(
            self.addr(),
            &LedgerQueryMsg::Balance {
                owner: owner.into(),
                token_id,
            },
        )?;
        Ok(res.balance)
    }
}
