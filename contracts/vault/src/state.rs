use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Empty, Uint128};
use cw_storage_plus::{Item, Map};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub admin: Addr,
    pub ledger: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (account, token_id) -> available balance. Escrowed value is not tracked
/// here: a lock debits the owner and the matching unlock credits the payee.
pub const BALANCES: Map<(&Addr, u64), Uint128> = Map::new("balances");

/// Contracts trusted to lock and unlock any account's balance.
pub const APPROVED_CALLERS: Map<&Addr, Empty> = Map::new("approved_callers");
