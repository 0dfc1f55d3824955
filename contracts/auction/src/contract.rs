#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult, Storage, Uint128, Uint64,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use game_economy::pagination::page_limit;
use game_economy::sequence::{count, next_id};
use game_economy::{VaultContract, IGC_TOKEN_ID};

use crate::error::ContractError;
use crate::msg::{
    AuctionsResponse, ConfigResponse, CountResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
};
use crate::state::{Auction, AuctionStatus, Config, AUCTIONS, AUCTION_SEQ, CONFIG};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:game-auction";
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
    AUCTION_SEQ.save(deps.storage, &0)?;

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
        ExecuteMsg::CreateAuction {
            asset_id,
            reserve_price,
            duration_blocks,
        } => execute_create_auction(deps, env, info, asset_id, reserve_price, duration_blocks),
        ExecuteMsg::CancelAuction { id } => execute_cancel_auction(deps, env, info, id),
        ExecuteMsg::PlaceBid { id, amount } => execute_place_bid(deps, env, info, id, amount),
        ExecuteMsg::CompleteAuction { id } => execute_complete_auction(deps, env, id),
    }
}

pub fn execute_create_auction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset_id: u64,
    reserve_price: Uint128,
    duration_blocks: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let deadline_block = Uint64::new(env.block.height)
        .checked_add(Uint64::new(duration_blocks))
        .map_err(StdError::from)?
        .u64();

    let id = next_id(deps.storage, &AUCTION_SEQ)?;
    let auction = Auction {
        id,
        seller: info.sender.clone(),
        asset_id,
        reserve_price,
        deadline_block,
        highest_bid: Uint128::zero(),
        highest_bidder: None,
        winning_bid: Uint128::zero(),
        winning_bidder: None,
        status: AuctionStatus::Open,
    };
    AUCTIONS.save(deps.storage, id, &auction)?;

    let lock = config
        .vault
        .lock(info.sender.as_str(), asset_id, Uint128::one())?;

    Ok(Response::new()
        .add_message(lock)
        .add_attribute("action", "create_auction")
        .add_attribute("id", id.to_string())
        .add_attribute("seller", info.sender)
        .add_attribute("asset_id", asset_id.to_string())
        .add_attribute("reserve_price", reserve_price)
        .add_attribute("deadline_block", deadline_block.to_string()))
}

pub fn execute_cancel_auction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut auction = load_auction(deps.storage, id)?;
    if auction.seller != info.sender {
        return Err(ContractError::NotTheSeller {
            caller: info.sender.into_string(),
            seller: auction.seller.into_string(),
        });
    }
    check_open(&auction)?;
    check_before_deadline(&auction, &env)?;

    auction.status = AuctionStatus::Canceled;
    AUCTIONS.save(deps.storage, id, &auction)?;

    let mut messages = vec![config
        .vault
        .unlock(auction.seller.as_str(), auction.asset_id, Uint128::one())?];
    messages.extend(refund_highest_bid(&config, &auction)?);

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "cancel_auction")
        .add_attribute("id", id.to_string()))
}

/// The new bid is escrowed before the one it replaces is released, so a
/// bidder topping their own bid needs the full new amount available.
pub fn execute_place_bid(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut auction = load_auction(deps.storage, id)?;
    check_open(&auction)?;
    check_before_deadline(&auction, &env)?;
    if amount <= auction.highest_bid {
        return Err(ContractError::BidTooLow {
            amount,
            highest_bid: auction.highest_bid,
        });
    }

    let mut messages = vec![config
        .vault
        .lock(info.sender.as_str(), config.currency_id, amount)?];
    messages.extend(refund_highest_bid(&config, &auction)?);

    auction.highest_bid = amount;
    auction.highest_bidder = Some(info.sender.clone());
    AUCTIONS.save(deps.storage, id, &auction)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "place_bid")
        .add_attribute("id", id.to_string())
        .add_attribute("bidder", info.sender)
        .add_attribute("amount", amount))
}

/// Pays the seller and delivers the asset when the reserve was met.
/// Otherwise the asset goes back to the seller and the standing bid, if any,
/// back to its bidder.
pub fn execute_complete_auction(
    deps: DepsMut,
    env: Env,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut auction = load_auction(deps.storage, id)?;
    check_open(&auction)?;
    if !auction.is_expired(&env.block) {
        return Err(ContractError::DeadlineNotPassed {
            current_block: env.block.height,
            deadline_block: auction.deadline_block,
        });
    }

    let vault = &config.vault;
    let mut messages: Vec<CosmosMsg> = vec![];
    match auction.highest_bidder.clone() {
        Some(winner) if auction.highest_bid >= auction.reserve_price => {
            messages.push(vault.unlock(
                auction.seller.as_str(),
                config.currency_id,
                auction.highest_bid,
            )?);
            messages.push(vault.unlock(winner.as_str(), auction.asset_id, Uint128::one())?);
            auction.winning_bid = auction.highest_bid;
            auction.winning_bidder = Some(winner);
            auction.status = AuctionStatus::Ended;
        }
        _ => {
            messages.push(vault.unlock(
                auction.seller.as_str(),
                auction.asset_id,
                Uint128::one(),
            )?);
            messages.extend(refund_highest_bid(&config, &auction)?);
            auction.status = AuctionStatus::ReserveNotMet;
        }
    }
    AUCTIONS.save(deps.storage, id, &auction)?;

    let mut res = Response::new()
        .add_messages(messages)
        .add_attribute("action", "complete_auction")
        .add_attribute("id", id.to_string())
        .add_attribute("status", auction.status.to_string());
    if let Some(winner) = auction.winning_bidder {
        res = res
            .add_attribute("winning_bidder", winner)
            .add_attribute("winning_bid", auction.winning_bid);
    }
    Ok(res)
}

fn load_auction(storage: &dyn Storage, id: u64) -> Result<Auction, ContractError> {
    AUCTIONS
        .may_load(storage, id)?
        .ok_or(ContractError::AuctionNotFound { id })
}

fn check_open(auction: &Auction) -> Result<(), ContractError> {
    if auction.status != AuctionStatus::Open {
        return Err(ContractError::NotOpen {
            status: auction.status,
        });
    }
    Ok(())
}

fn check_before_deadline(auction: &Auction, env: &Env) -> Result<(), ContractError> {
    if auction.is_expired(&env.block) {
        return Err(ContractError::DeadlineHasPassed {
            current_block: env.block.height,
            deadline_block: auction.deadline_block,
        });
    }
    Ok(())
}

/// Unlock message returning the standing bid to its bidder, if there is one.
fn refund_highest_bid(config: &Config, auction: &Auction) -> StdResult<Option<CosmosMsg>> {
    auction
        .highest_bidder
        .as_ref()
        .map(|bidder| {
            config
                .vault
                .unlock(bidder.as_str(), config.currency_id, auction.highest_bid)
        })
        .transpose()
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Auction { id } => to_json_binary(&AUCTIONS.load(deps.storage, id)?),
        QueryMsg::AuctionCount {} => to_json_binary(&CountResponse {
            count: count(deps.storage, &AUCTION_SEQ)?,
        }),
        QueryMsg::Auctions { start_after, limit } => {
            to_json_binary(&query_auctions(deps, start_after, limit)?)
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

fn query_auctions(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<AuctionsResponse> {
    let start = start_after.map(Bound::exclusive);
    let auctions = AUCTIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| item.map(|(_, auction)| auction))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(AuctionsResponse { auctions })
}
