use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::Uint128;

use crate::state::RentalListing;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Vault holding listed assets and rent payments. This contract must be
    /// one of its approved callers.
    pub vault: String,
    /// Token id rent is paid in. Defaults to the in-game currency.
    pub currency_id: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Escrows one unit of `asset_id` from the sender and lists it for rent.
    CreateRental {
        asset_id: u64,
        price: Uint128,
        term_length: u64,
    },
    /// Takes an available listing off the market and returns the asset.
    UnlistRental { id: u64 },
    UpdateRental {
        id: u64,
        price: Uint128,
        term_length: u64,
    },
    /// Pays the owner and rents the listing for one term.
    RentAsset { id: u64 },
    /// Expires the rental if its term has run out. Returns whether it is
    /// still active, as JSON encoded response data.
    CheckRentalStatus { id: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns RentalListing
    Rental { id: u64 },
    /// Returns CountResponse
    RentalCount {},
    /// Returns CountResponse
    RentedAssetCount { renter: String, asset_id: u64 },
    /// Returns RentalActiveResponse, without expiring anything
    RentalActive { id: u64 },
    /// Returns RentalsResponse, ordered by id
    Rentals {
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
pub struct RentalActiveResponse {
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RentalsResponse {
    pub rentals: Vec<RentalListing>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub vault: String,
    pub currency_id: u64,
}
