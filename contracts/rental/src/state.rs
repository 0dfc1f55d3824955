use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, BlockInfo, Uint128};
use cw_storage_plus::{Item, Map};
use game_economy::VaultContract;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub vault: VaultContract,
    /// Token id rent is paid in.
    pub currency_id: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Available,
    Rented,
    Unavailable,
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = match self {
            RentalStatus::Available => "available",
            RentalStatus::Rented => "rented",
            RentalStatus::Unavailable => "unavailable",
        };
        f.write_str(status)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RentalListing {
    pub id: u64,
    pub owner: Addr,
    pub renter: Option<Addr>,
    pub asset_id: u64,
    /// Paid once per term, in the configured currency.
    pub price: Uint128,
    /// Term length in blocks.
    pub term_length: u64,
    /// Zero unless rented.
    pub expiration_block: u64,
    pub status: RentalStatus,
}

impl RentalListing {
    /// A rented listing whose term has run out stays `Rented` in storage
    /// until its status is checked, but is no longer logically active.
    pub fn is_active(&self, block: &BlockInfo) -> bool {
        self.status == RentalStatus::Rented && block.height < self.expiration_block
    }
}

pub const RENTALS: Map<u64, RentalListing> = Map::new("rentals");
pub const RENTAL_SEQ: Item<u64> = Item::new("rental_seq");

/// (renter, asset_id) -> number of listings of that asset currently rented
pub const RENTED_ASSETS: Map<(&Addr, u64), u64> = Map::new("rented_assets");
