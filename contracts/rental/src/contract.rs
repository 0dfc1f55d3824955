#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdError,
    StdResult, Storage, Uint128, Uint64,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use game_economy::pagination::page_limit;
use game_economy::sequence::{count, next_id};
use game_economy::{VaultContract, IGC_TOKEN_ID};

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, CountResponse, ExecuteMsg, InstantiateMsg, QueryMsg, RentalActiveResponse,
    RentalsResponse,
};
use crate::state::{
    Config, RentalListing, RentalStatus, CONFIG, RENTALS, RENTAL_SEQ, RENTED_ASSETS,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:game-rental";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        vault: VaultContract(deps.api.addr_validate(&msg.vault)?),
        currency_id: msg.currency_id.unwrap_or(IGC_TOKEN_ID),
    };
    CONFIG.save(deps.storage, &config)?;
    RENTAL_SEQ.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("vault", msg.vault)
        .add_attribute("currency_id", config.currency_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateRental {
            asset_id,
            price,
            term_length,
        } => execute_create_rental(deps, info, asset_id, price, term_length),
        ExecuteMsg::UnlistRental { id } => execute_unlist_rental(deps, info, id),
        ExecuteMsg::UpdateRental {
            id,
            price,
            term_length,
        } => execute_update_rental(deps, info, id, price, term_length),
        ExecuteMsg::RentAsset { id } => execute_rent_asset(deps, env, info, id),
        ExecuteMsg::CheckRentalStatus { id } => execute_check_rental_status(deps, env, id),
    }
}

pub fn execute_create_rental(
    deps: DepsMut,
    info: MessageInfo,
    asset_id: u64,
    price: Uint128,
    term_length: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let id = next_id(deps.storage, &RENTAL_SEQ)?;
    let listing = RentalListing {
        id,
        owner: info.sender.clone(),
        renter: None,
        asset_id,
        price,
        term_length,
        expiration_block: 0,
        status: RentalStatus::Available,
    };
    RENTALS.save(deps.storage, id, &listing)?;

    let lock = config
        .vault
        .lock(info.sender.as_str(), asset_id, Uint128::one())?;

    Ok(Response::new()
        .add_message(lock)
        .add_attribute("action", "create_rental")
        .add_attribute("id", id.to_string())
        .add_attribute("owner", info.sender)
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("price", price)
        .add_attribute("term_length", term_length.to_string()))
}

pub fn execute_unlist_rental(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut listing = load_owned_available(deps.storage, &info, id)?;

    listing.status = RentalStatus::Unavailable;
    RENTALS.save(deps.storage, id, &listing)?;

    let refund = config
        .vault
        .unlock(listing.owner.as_str(), listing.asset_id, Uint128::one())?;

    Ok(Response::new()
        .add_message(refund)
        .add_attribute("action", "unlist_rental")
        .add_attribute("id", id.to_string()))
}

pub fn execute_update_rental(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
    price: Uint128,
    term_length: u64,
) -> Result<Response, ContractError> {
    let mut listing = load_owned_available(deps.storage, &info, id)?;

    listing.price = price;
    listing.term_length = term_length;
    RENTALS.save(deps.storage, id, &listing)?;

    Ok(Response::new()
        .add_attribute("action", "update_rental")
        .add_attribute("id", id.to_string())
        .add_attribute("price", price)
        .add_attribute("term_length", term_length.to_string()))
}

/// Rent goes straight from the renter's vault balance to the owner's. Only
/// the stored status is consulted: an expired rental that nobody has checked
/// yet still counts as rented.
pub fn execute_rent_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut listing = load_rental(deps.storage, id)?;
    if listing.status != RentalStatus::Available {
        return Err(ContractError::NotAvailable {
            status: listing.status,
        });
    }
    let expiration_block = Uint64::new(env.block.height)
        .checked_add(Uint64::new(listing.term_length))
        .map_err(StdError::from)?
        .u64();

    listing.status = RentalStatus::Rented;
    listing.renter = Some(info.sender.clone());
    listing.expiration_block = expiration_block;
    RENTALS.save(deps.storage, id, &listing)?;
    RENTED_ASSETS.update(
        deps.storage,
        (&info.sender, listing.asset_id),
        |rented| -> StdResult<_> { Ok(rented.unwrap_or_default() + 1) },
    )?;

    let vault = &config.vault;
    let messages = vec![
        vault.lock(info.sender.as_str(), config.currency_id, listing.price)?,
        vault.unlock(listing.owner.as_str(), config.currency_id, listing.price)?,
    ];

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "rent_asset")
        .add_attribute("id", id.to_string())
        .add_attribute("renter", info.sender)
        .add_attribute("price", listing.price)
        .add_attribute("expiration_block", expiration_block.to_string()))
}

/// Anyone may call this. A rental whose term has run out goes back to
/// `Available` and the renter's usage count drops.
pub fn execute_check_rental_status(
    deps: DepsMut,
    env: Env,
    id: u64,
) -> Result<Response, ContractError> {
    let mut listing = load_rental(deps.storage, id)?;

    let active = listing.is_active(&env.block);
    if listing.status == RentalStatus::Rented && !active {
        if let Some(renter) = listing.renter.take() {
            RENTED_ASSETS.update(
                deps.storage,
                (&renter, listing.asset_id),
                |rented| -> StdResult<_> { Ok(rented.unwrap_or_default().saturating_sub(1)) },
            )?;
        }
        listing.expiration_block = 0;
        listing.status = RentalStatus::Available;
        RENTALS.save(deps.storage, id, &listing)?;
    }

    Ok(Response::new()
        .set_data(to_json_binary(&active)?)
        .add_attribute("action", "check_rental_status")
        .add_attribute("id", id.to_string())
        .add_attribute("active", active.to_string()))
}

fn load_rental(storage: &dyn Storage, id: u64) -> Result<RentalListing, ContractError> {
    RENTALS
        .may_load(storage, id)?
        .ok_or(ContractError::RentalNotFound { id })
}

fn load_owned_available(
    storage: &dyn Storage,
    info: &MessageInfo,
    id: u64,
) -> Result<RentalListing, ContractError> {
    let listing = load_rental(storage, id)?;
    if listing.owner != info.sender {
        return Err(ContractError::NotTheOwner {
            caller: info.sender.to_string(),
            owner: listing.owner.into_string(),
        });
    }
    if listing.status != RentalStatus::Available {
        return Err(ContractError::NotAvailable {
            status: listing.status,
        });
    }
    Ok(listing)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Rental { id } => to_json_binary(&RENTALS.load(deps.storage, id)?),
        QueryMsg::RentalCount {} => to_json_binary(&CountResponse {
            count: count(deps.storage, &RENTAL_SEQ)?,
        }),
        QueryMsg::RentedAssetCount { renter, asset_id } => {
            to_json_binary(&query_rented_asset_count(deps, renter, asset_id)?)
        }
        QueryMsg::RentalActive { id } => {
            let listing = RENTALS.load(deps.storage, id)?;
            to_json_binary(&RentalActiveResponse {
                active: listing.is_active(&env.block),
            })
        }
        QueryMsg::Rentals { start_after, limit } => {
            to_json_binary(&query_rentals(deps, start_after, limit)?)
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                vault: config.vault.addr().into_string(),
                currency_id: config.currency_id,
            })
        }
    }
}

fn query_rented_asset_count(deps: Deps, renter: String, asset_id: u64) -> StdResult<CountResponse> {
    let renter = deps.api.addr_validate(&renter)?;
    let count = RENTED_ASSETS
        .may_load(deps.storage, (&renter, asset_id))?
        .unwrap_or_default();
    Ok(CountResponse { count })
}

fn query_rentals(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<RentalsResponse> {
    let start = start_after.map(Bound::exclusive);
    let rentals = RENTALS
        .range(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| item.map(|(_, listing)| listing))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(RentalsResponse { rentals })
}
