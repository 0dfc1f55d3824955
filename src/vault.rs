use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, CustomQuery, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VaultExecuteMsg {
    /// Pulls real tokens from the sender into vault custody and credits the
    /// sender's available balance. The vault must be an approved operator of
    /// the sender on the ledger.
    Deposit { token_id: u64, amount: Uint128 },
    DepositBatch {
        token_ids: Vec<u64>,
        amounts: Vec<Uint128>,
    },
    /// Debits the sender's available balance and releases real tokens to `to`.
    Withdraw {
        to: String,
        token_id: u64,
        amount: Uint128,
    },
    WithdrawBatch {
        to: String,
        token_ids: Vec<u64>,
        amounts: Vec<Uint128>,
    },
    /// Escrows `amount` of `account`'s available balance. Approved callers only.
    LockAsset {
        account: String,
        token_id: u64,
        amount: Uint128,
    },
    /// Credits `amount` to `account` out of escrow. Approved callers only.
    UnlockAsset {
        account: String,
        token_id: u64,
        amount: Uint128,
    },
    ApproveCaller { address: String },
    RevokeCaller { address: String },
    UpdateAdmin { admin: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VaultQueryMsg {
    /// Returns VaultBalanceResponse
    Balance { account: String, token_id: u64 },
    /// Returns IsApprovedCallerResponse
    IsApprovedCaller { address: String },
    /// Returns VaultConfigResponse
    Config {},
    /// Returns AccountBalancesResponse, ordered by token id
    AccountBalances {
        account: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Returns ApprovedCallersResponse
    ApprovedCallers {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct VaultBalanceResponse {
    pub balance: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct IsApprovedCallerResponse {
    pub approved: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct VaultConfigResponse {
    pub admin: String,
    pub ledger: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TokenBalance {
    pub token_id: u64,
    pub amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct AccountBalancesResponse {
    pub balances: Vec<TokenBalance>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ApprovedCallersResponse {
    pub callers: Vec<String>,
}

/// VaultContract is the narrow view of the vault the escrow engines depend on:
/// building lock/unlock messages and reading available balances.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct VaultContract(pub Addr);

impl VaultContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: VaultExecuteMsg) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        }
        .into())
    }

    pub fn lock(
        &self,
        account: impl Into<String>,
        token_id: u64,
        amount: Uint128,
    ) -> StdResult<CosmosMsg> {
        self.call(VaultExecuteMsg::LockAsset {
            account: account.into(),
            token_id,
            amount,
        })
    }

    pub fn unlock(
        &self,
        account: impl Into<String>,
        token_id: u64,
        amount: Uint128,
    ) -> StdResult<CosmosMsg> {
        self.call(VaultExecuteMsg::UnlockAsset {
            account: account.into(),
            token_id,
            amount,
        })
    }

    pub fn balance<CQ: CustomQuery>(
        &self,
        querier: &QuerierWrapper<CQ>,
        account: impl Into<String>,
        token_id: u64,
    ) -> StdResult<Uint128> {
        let res: VaultBalanceResponse = querier.query_wasm_smart(
            self.addr(),
            &VaultQueryMsg::Balance {
                account: account.into(),
                token_id,
            },
        )?;
        Ok(res.balance)
    }
}
