use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Empty, Uint128};
use cw_storage_plus::{Item, Map};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub minter: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (owner, token_id) -> real token balance
pub const BALANCES: Map<(&Addr, u64), Uint128> = Map::new("balances");

/// (owner, operator) pairs allowed to move the owner's tokens
pub const OPERATORS: Map<(&Addr, &Addr), Empty> = Map::new("operators");

pub const TOTAL_SUPPLY: Map<u64, Uint128> = Map::new("total_supply");
