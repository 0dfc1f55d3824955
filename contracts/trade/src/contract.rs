#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult,
    Storage, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use game_economy::pagination::page_limit;
use game_economy::sequence::{count, next_id};
use game_economy::VaultContract;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, CountResponse, ExecuteMsg, InstantiateMsg, ProposalsResponse, QueryMsg,
};
use crate::state::{Config, ProposalStatus, TradeProposal, CONFIG, PROPOSALS, PROPOSAL_SEQ};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:game-trade";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let vault = deps.api.addr_validate(&msg.vault)?;
    CONFIG.save(
        deps.storage,
        &Config {
            vault: VaultContract(vault),
        },
    )?;
    PROPOSAL_SEQ.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("vault", msg.vault))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateProposal {
            receiver,
            offered_asset_id,
            requested_asset_id,
        } => execute_create_proposal(deps, info, receiver, offered_asset_id, requested_asset_id),
        ExecuteMsg::CancelProposal { id } => execute_cancel_proposal(deps, info, id),
        ExecuteMsg::AcceptProposal { id } => execute_accept_proposal(deps, info, id),
        ExecuteMsg::RejectProposal { id } => execute_reject_proposal(deps, info, id),
    }
}

pub fn execute_create_proposal(
    deps: DepsMut,
    info: MessageInfo,
    receiver: String,
    offered_asset_id: u64,
    requested_asset_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let receiver = deps.api.addr_validate(&receiver)?;

    let id = next_id(deps.storage, &PROPOSAL_SEQ)?;
    let proposal = TradeProposal {
        id,
        proposer: info.sender.clone(),
        receiver,
        offered_asset_id,
        requested_asset_id,
        status: ProposalStatus::Pending,
    };
    PROPOSALS.save(deps.storage, id, &proposal)?;

    let lock = config
        .vault
        .lock(info.sender.as_str(), offered_asset_id, Uint128::one())?;

    Ok(Response::new()
        .add_message(lock)
        .add_attribute("action", "create_proposal")
        .add_attribute("id", id.to_string())
        .add_attribute("proposer", proposal.proposer)
        .add_attribute("receiver", proposal.receiver)
        .add_attribute("offered_asset_id", offered_asset_id.to_string())
        .add_attribute("requested_asset_id", requested_asset_id.to_string()))
}

pub fn execute_cancel_proposal(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = load_pending(deps.storage, id)?;
    if proposal.proposer != info.sender {
        return Err(ContractError::NotProposer {
            caller: info.sender.into_string(),
            proposer: proposal.proposer.into_string(),
        });
    }

    proposal.status = ProposalStatus::Canceled;
    PROPOSALS.save(deps.storage, id, &proposal)?;

    let refund = config.vault.unlock(
        proposal.proposer.as_str(),
        proposal.offered_asset_id,
        Uint128::one(),
    )?;

    Ok(Response::new()
        .add_message(refund)
        .add_attribute("action", "cancel_proposal")
        .add_attribute("id", id.to_string()))
}

/// Escrows the receiver's unit of the requested asset and releases both
/// escrowed units crosswise.
pub fn execute_accept_proposal(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = load_pending(deps.storage, id)?;
    check_receiver(&proposal, &info.sender)?;

    proposal.status = ProposalStatus::Accepted;
    PROPOSALS.save(deps.storage, id, &proposal)?;

    let vault = &config.vault;
    let messages = vec![
        vault.lock(
            proposal.receiver.as_str(),
            proposal.requested_asset_id,
            Uint128::one(),
        )?,
        vault.unlock(
            proposal.proposer.as_str(),
            proposal.requested_asset_id,
            Uint128::one(),
        )?,
        vault.unlock(
            proposal.receiver.as_str(),
            proposal.offered_asset_id,
            Uint128::one(),
        )?,
    ];

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "accept_proposal")
        .add_attribute("id", id.to_string()))
}

pub fn execute_reject_proposal(
    deps: DepsMut,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = load_pending(deps.storage, id)?;
    check_receiver(&proposal, &info.sender)?;

    proposal.status = ProposalStatus::Rejected;
    PROPOSALS.save(deps.storage, id, &proposal)?;

    let refund = config.vault.unlock(
        proposal.proposer.as_str(),
        proposal.offered_asset_id,
        Uint128::one(),
    )?;

    Ok(Response::new()
        .add_message(refund)
        .add_attribute("action", "reject_proposal")
        .add_attribute("id", id.to_string()))
}

fn load_pending(storage: &dyn Storage, id: u64) -> Result<TradeProposal, ContractError> {
    let proposal = PROPOSALS
        .may_load(storage, id)?
        .ok_or(ContractError::ProposalNotFound { id })?;
    if proposal.status != ProposalStatus::Pending {
        return Err(ContractError::NotPending {
            status: proposal.status,
        });
    }
    Ok(proposal)
}

fn check_receiver(proposal: &TradeProposal, sender: &Addr) -> Result<(), ContractError> {
    if proposal.receiver != *sender {
        return Err(ContractError::NotReceiver {
            caller: sender.to_string(),
            receiver: proposal.receiver.to_string(),
        });
    }
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Proposal { id } => to_json_binary(&PROPOSALS.load(deps.storage, id)?),
        QueryMsg::ProposalCount {} => to_json_binary(&CountResponse {
            count: count(deps.storage, &PROPOSAL_SEQ)?,
        }),
        QueryMsg::Proposals { start_after, limit } => {
            to_json_binary(&query_proposals(deps, start_after, limit)?)
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                vault: config.vault.addr().into_string(),
            })
        }
    }
}

fn query_proposals(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ProposalsResponse> {
    let start = start_after.map(Bound::exclusive);
    let proposals = PROPOSALS
        .range(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| item.map(|(_, proposal)| proposal))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ProposalsResponse { proposals })
}
