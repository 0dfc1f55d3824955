use std::collections::BTreeMap;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Storage, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    ApprovedForAllResponse, BalanceResponse, ExecuteMsg, InstantiateMsg, MinterResponse, QueryMsg,
    TotalSupplyResponse,
};
use crate::state::{Config, BALANCES, CONFIG, OPERATORS, TOTAL_SUPPLY};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:asset-factory";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let minter = match msg.minter {
        Some(minter) => deps.api.addr_validate(&minter)?,
        None => info.sender,
    };
    CONFIG.save(
        deps.storage,
        &Config {
            minter: minter.clone(),
        },
    )?;

    for row in msg.initial_balances {
        let address = deps.api.addr_validate(&row.address)?;
        credit(deps.storage, &address, row.token_id, row.amount)?;
        add_supply(deps.storage, row.token_id, row.amount)?;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("minter", minter))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint {
            to,
            token_id,
            amount,
        } => execute_mint(deps, info, to, token_id, amount),
        ExecuteMsg::Burn { token_id, amount } => execute_burn(deps, info, token_id, amount),
        ExecuteMsg::Transfer {
            to,
            token_id,
            amount,
        } => {
            let from = info.sender.to_string();
            execute_transfer_from(deps, info, from, to, vec![token_id], vec![amount])
        }
        ExecuteMsg::BatchTransfer {
            to,
            token_ids,
            amounts,
        } => {
            let from = info.sender.to_string();
            execute_transfer_from(deps, info, from, to, token_ids, amounts)
        }
        ExecuteMsg::TransferFrom {
            from,
            to,
            token_id,
            amount,
        } => execute_transfer_from(deps, info, from, to, vec![token_id], vec![amount]),
        ExecuteMsg::BatchTransferFrom {
            from,
            to,
            token_ids,
            amounts,
        } => execute_transfer_from(deps, info, from, to, token_ids, amounts),
        ExecuteMsg::ApproveAll { operator } => execute_approve_all(deps, info, operator),
        ExecuteMsg::RevokeAll { operator } => execute_revoke_all(deps, info, operator),
    }
}

pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.minter {
        return Err(ContractError::Unauthorized {
            caller: info.sender.into_string(),
        });
    }

    let to_addr = deps.api.addr_validate(&to)?;
    credit(deps.storage, &to_addr, token_id, amount)?;
    add_supply(deps.storage, token_id, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("to", to)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount))
}

/// Burn tokens
///
/// Remove `amount` of `token_id` from the system irreversibly, from the signer's account
pub fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    debit_all(deps.storage, &info.sender, &[(token_id, amount)])?;
    TOTAL_SUPPLY.update(deps.storage, token_id, |supply| -> StdResult<_> {
        Ok(supply.unwrap_or_default().checked_sub(amount)?)
    })?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("account", info.sender)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount))
}

pub fn execute_transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    from: String,
    to: String,
    token_ids: Vec<u64>,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    if token_ids.len() != amounts.len() {
        return Err(ContractError::ArrayLengthMismatch {
            token_ids: token_ids.len(),
            amounts: amounts.len(),
        });
    }

    let from_addr = deps.api.addr_validate(&from)?;
    let to_addr = deps.api.addr_validate(&to)?;
    check_operator(deps.storage, &from_addr, &info.sender)?;

    let transfers: Vec<(u64, Uint128)> = token_ids.into_iter().zip(amounts).collect();
    debit_all(deps.storage, &from_addr, &transfers)?;
    for (token_id, amount) in &transfers {
        credit(deps.storage, &to_addr, *token_id, *amount)?;
    }

    let token_ids = transfers
        .iter()
        .map(|(id, _)| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("operator", info.sender)
        .add_attribute("from", from)
        .add_attribute("to", to)
        .add_attribute("token_ids", token_ids))
}

pub fn execute_approve_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    let operator_addr = deps.api.addr_validate(&operator)?;
    OPERATORS.save(deps.storage, (&info.sender, &operator_addr), &Empty {})?;

    Ok(Response::new()
        .add_attribute("action", "approve_all")
        .add_attribute("owner", info.sender)
        .add_attribute("operator", operator))
}

pub fn execute_revoke_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    let operator_addr = deps.api.addr_validate(&operator)?;
    OPERATORS.remove(deps.storage, (&info.sender, &operator_addr));

    Ok(Response::new()
        .add_attribute("action", "revoke_all")
        .add_attribute("owner", info.sender)
        .add_attribute("operator", operator))
}

fn check_operator(
    storage: &dyn Storage,
    owner: &Addr,
    operator: &Addr,
) -> Result<(), ContractError> {
    if owner == operator || OPERATORS.has(storage, (owner, operator)) {
        return Ok(());
    }
    Err(ContractError::NotApproved {
        owner: owner.to_string(),
        operator: operator.to_string(),
    })
}

/// Debits every (token_id, amount) pair from `owner`. All balances are
/// checked before the first write, with repeated token ids summed.
fn debit_all(
    storage: &mut dyn Storage,
    owner: &Addr,
    transfers: &[(u64, Uint128)],
) -> Result<(), ContractError> {
    let mut requested: BTreeMap<u64, Uint128> = BTreeMap::new();
    for (token_id, amount) in transfers {
        let total = requested.entry(*token_id).or_default();
        *total = total.checked_add(*amount).map_err(StdError::from)?;
    }

    let mut remaining = Vec::with_capacity(requested.len());
    for (token_id, amount) in requested {
        let balance = BALANCES
            .may_load(storage, (owner, token_id))?
            .unwrap_or_default();
        if balance < amount {
            return Err(ContractError::InsufficientBalance {
                account: owner.to_string(),
                balance,
                requested: amount,
                token_id,
            });
        }
        remaining.push((token_id, balance - amount));
    }

    for (token_id, balance) in remaining {
        BALANCES.save(storage, (owner, token_id), &balance)?;
    }
    Ok(())
}

fn credit(
    storage: &mut dyn Storage,
    owner: &Addr,
    token_id: u64,
    amount: Uint128,
) -> StdResult<()> {
    BALANCES.update(storage, (owner, token_id), |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn add_supply(storage: &mut dyn Storage, token_id: u64, amount: Uint128) -> StdResult<()> {
    TOTAL_SUPPLY.update(storage, token_id, |supply| -> StdResult<_> {
        Ok(supply.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { owner, token_id } => {
            to_json_binary(&query_balance(deps, owner, token_id)?)
        }
        QueryMsg::IsApprovedForAll { owner, operator } => {
            to_json_binary(&query_approved_for_all(deps, owner, operator)?)
        }
        QueryMsg::TotalSupply { token_id } => to_json_binary(&TotalSupplyResponse {
            supply: TOTAL_SUPPLY
                .may_load(deps.storage, token_id)?
                .unwrap_or_default(),
        }),
        QueryMsg::Minter {} => to_json_binary(&MinterResponse {
            minter: CONFIG.load(deps.storage)?.minter.into_string(),
        }),
    }
}

fn query_balance(deps: Deps, owner: String, token_id: u64) -> StdResult<BalanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let balance = BALANCES
        .may_load(deps.storage, (&owner, token_id))?
        .unwrap_or_default();
    Ok(BalanceResponse { balance })
}

fn query_approved_for_all(
    deps: Deps,
    owner: String,
    operator: String,
) -> StdResult<ApprovedForAllResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    Ok(ApprovedForAllResponse {
        approved: OPERATORS.has(deps.storage, (&owner, &operator)),
    })
}
