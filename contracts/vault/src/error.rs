use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {caller} is not {required}")]
    Unauthorized { caller: String, required: String },

    #[error("Insufficient balance of token {token_id} for {account} (balance {balance}, requested {requested})")]
    InsufficientBalance {
        account: String,
        balance: Uint128,
        requested: Uint128,
        token_id: u64,
    },

    #[error("Array length mismatch (token_ids {token_ids}, amounts {amounts})")]
    ArrayLengthMismatch { token_ids: usize, amounts: usize },
}
