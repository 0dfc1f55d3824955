use std::collections::BTreeMap;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Order, Response,
    StdError, StdResult, Storage, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use game_economy::ledger::LedgerExecuteMsg;
use game_economy::pagination::page_limit;
use game_economy::LedgerContract;

use crate::error::ContractError;
use crate::msg::{
    AccountBalancesResponse, ApprovedCallersResponse, BalanceResponse, ConfigResponse,
    ExecuteMsg, InstantiateMsg, IsApprovedCallerResponse, QueryMsg, TokenBalance,
};
use crate::state::{Config, APPROVED_CALLERS, BALANCES, CONFIG};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:game-vault";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };
    let config = Config {
        admin: admin.clone(),
        ledger: deps.api.addr_validate(msg.ledger.as_str())?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("ledger", msg.ledger))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Deposit { token_id, amount } => {
            execute_deposit(deps, env, info, token_id, amount)
        }
        ExecuteMsg::DepositBatch { token_ids, amounts } => {
            execute_deposit_batch(deps, env, info, token_ids, amounts)
        }
        ExecuteMsg::Withdraw {
            to,
            token_id,
            amount,
        } => execute_withdraw(deps, info, to, token_id, amount),
        ExecuteMsg::WithdrawBatch {
            to,
            token_ids,
            amounts,
        } => execute_withdraw_batch(deps, info, to, token_ids, amounts),
        ExecuteMsg::LockAsset {
            account,
            token_id,
            amount,
        } => execute_lock_asset(deps, info, account, token_id, amount),
        ExecuteMsg::UnlockAsset {
            account,
            token_id,
            amount,
        } => execute_unlock_asset(deps, env, info, account, token_id, amount),
        ExecuteMsg::ApproveCaller { address } => execute_approve_caller(deps, info, address),
        ExecuteMsg::RevokeCaller { address } => execute_revoke_caller(deps, info, address),
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, info, admin),
    }
}

/// Credits the sender first and then pulls the real tokens from the ledger.
/// The ledger transfer runs after this call has committed its writes, and if
/// it fails the whole transaction is reverted.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    credit(deps.storage, &info.sender, token_id, amount)?;

    let transfer = LedgerContract(config.ledger).call(LedgerExecuteMsg::TransferFrom {
        from: info.sender.to_string(),
        to: env.contract.address.to_string(),
        token_id,
        amount,
    })?;

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "deposit")
        .add_attribute("account", info.sender)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount))
}

pub fn execute_deposit_batch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_ids: Vec<u64>,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    check_lengths(&token_ids, &amounts)?;
    let config = CONFIG.load(deps.storage)?;

    for (token_id, amount) in token_ids.iter().zip(amounts.iter()) {
        credit(deps.storage, &info.sender, *token_id, *amount)?;
    }

    let attr_ids = join_ids(&token_ids);
    let transfer = LedgerContract(config.ledger).call(LedgerExecuteMsg::BatchTransferFrom {
        from: info.sender.to_string(),
        to: env.contract.address.to_string(),
        token_ids,
        amounts,
    })?;

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "deposit_batch")
        .add_attribute("account", info.sender)
        .add_attribute("token_ids", attr_ids))
}

pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    deps.api.addr_validate(&to)?;
    debit_all(deps.storage, &info.sender, &[(token_id, amount)])?;

    let transfer = LedgerContract(config.ledger).call(LedgerExecuteMsg::Transfer {
        to: to.clone(),
        token_id,
        amount,
    })?;

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "withdraw")
        .add_attribute("account", info.sender)
        .add_attribute("to", to)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount))
}

/// Either every element of the batch is withdrawn or none is: lengths are
/// compared before anything else and all balances are checked before the
/// first debit.
pub fn execute_withdraw_batch(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    token_ids: Vec<u64>,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    check_lengths(&token_ids, &amounts)?;
    let config = CONFIG.load(deps.storage)?;
    deps.api.addr_validate(&to)?;

    let withdrawals: Vec<(u64, Uint128)> = token_ids
        .iter()
        .copied()
        .zip(amounts.iter().copied())
        .collect();
    debit_all(deps.storage, &info.sender, &withdrawals)?;

    let attr_ids = join_ids(&token_ids);
    let transfer = LedgerContract(config.ledger).call(LedgerExecuteMsg::BatchTransfer {
        to: to.clone(),
        token_ids,
        amounts,
    })?;

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "withdraw_batch")
        .add_attribute("account", info.sender)
        .add_attribute("to", to)
        .add_attribute("token_ids", attr_ids))
}

/// Moves `amount` out of `account`'s available balance into escrow. Approved
/// callers may lock any account; they are trusted to authorize their own users.
pub fn execute_lock_asset(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    check_approved_caller(deps.storage, &info.sender)?;

    let account_addr = deps.api.addr_validate(&account)?;
    debit_all(deps.storage, &account_addr, &[(token_id, amount)])?;

    Ok(Response::new()
        .add_attribute("action", "lock_asset")
        .add_attribute("caller", info.sender)
        .add_attribute("account", account)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount))
}

/// Credits `amount` to `account`, which need not be the account the value was
/// locked from. Unlocking zero is always a no-op, whatever the account.
pub fn execute_unlock_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account: String,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    check_approved_caller(deps.storage, &info.sender)?;

    let res = Response::new()
        .add_attribute("action", "unlock_asset")
        .add_attribute("caller", info.sender.as_str());
    if amount.is_zero() {
        return Ok(res.add_attribute("amount", amount));
    }

    let account_addr = deps.api.addr_validate(&account)?;

    // never credit more than the ledger says the vault actually holds
    let config = CONFIG.load(deps.storage)?;
    let custody = LedgerContract(config.ledger).balance(
        &deps.querier,
        env.contract.address.as_str(),
        token_id,
    )?;
    if custody < amount {
        return Err(ContractError::InsufficientBalance {
            account: env.contract.address.into_string(),
            balance: custody,
            requested: amount,
            token_id,
        });
    }

    credit(deps.storage, &account_addr, token_id, amount)?;

    Ok(res
        .add_attribute("account", account)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("amount", amount))
}

pub fn execute_approve_caller(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    check_admin(deps.storage, &info.sender)?;

    let caller = deps.api.addr_validate(&address)?;
    APPROVED_CALLERS.save(deps.storage, &caller, &Empty {})?;

    Ok(Response::new()
        .add_attribute("action", "approve_caller")
        .add_attribute("address", address))
}

pub fn execute_revoke_caller(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    check_admin(deps.storage, &info.sender)?;

    let caller = deps.api.addr_validate(&address)?;
    APPROVED_CALLERS.remove(deps.storage, &caller);

    Ok(Response::new()
        .add_attribute("action", "revoke_caller")
        .add_attribute("address", address))
}

pub fn execute_update_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    check_admin(deps.storage, &info.sender)?;

    let new_admin = deps.api.addr_validate(&admin)?;
    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.admin = new_admin;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("admin", admin))
}

fn check_admin(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if config.admin != *sender {
        return Err(ContractError::Unauthorized {
            caller: sender.to_string(),
            required: "admin".to_string(),
        });
    }
    Ok(())
}

fn check_approved_caller(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !APPROVED_CALLERS.has(storage, sender) {
        return Err(ContractError::Unauthorized {
            caller: sender.to_string(),
            required: "an approved caller".to_string(),
        });
    }
    Ok(())
}

fn check_lengths(token_ids: &[u64], amounts: &[Uint128]) -> Result<(), ContractError> {
    if token_ids.len() != amounts.len() {
        return Err(ContractError::ArrayLengthMismatch {
            token_ids: token_ids.len(),
            amounts: amounts.len(),
        });
    }
    Ok(())
}

/// Debits every (token_id, amount) pair from `account`. Repeated token ids
/// are summed and every balance is checked before the first write.
fn debit_all(
    storage: &mut dyn Storage,
    account: &Addr,
    debits: &[(u64, Uint128)],
) -> Result<(), ContractError> {
    let mut requested: BTreeMap<u64, Uint128> = BTreeMap::new();
    for (token_id, amount) in debits {
        let total = requested.entry(*token_id).or_default();
        *total = total.checked_add(*amount).map_err(StdError::from)?;
    }

    let mut remaining = Vec::with_capacity(requested.len());
    for (token_id, amount) in requested {
        let balance = BALANCES
            .may_load(storage, (account, token_id))?
            .unwrap_or_default();
        if balance < amount {
            return Err(ContractError::InsufficientBalance {
                account: account.to_string(),
                balance,
                requested: amount,
                token_id,
            });
        }
        remaining.push((token_id, balance - amount));
    }

    for (token_id, balance) in remaining {
        BALANCES.save(storage, (account, token_id), &balance)?;
    }
    Ok(())
}

fn credit(
    storage: &mut dyn Storage,
    account: &Addr,
    token_id: u64,
    amount: Uint128,
) -> StdResult<()> {
    BALANCES.update(storage, (account, token_id), |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn join_ids(token_ids: &[u64]) -> String {
    token_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { account, token_id } => {
            to_json_binary(&query_balance(deps, account, token_id)?)
        }
        QueryMsg::IsApprovedCaller { address } => {
            to_json_binary(&query_is_approved_caller(deps, address)?)
        }
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::AccountBalances {
            account,
            start_after,
            limit,
        } => to_json_binary(&query_account_balances(deps, account, start_after, limit)?),
        QueryMsg::ApprovedCallers { start_after, limit } => {
            to_json_binary(&query_approved_callers(deps, start_after, limit)?)
        }
    }
}

fn query_balance(deps: Deps, account: String, token_id: u64) -> StdResult<BalanceResponse> {
    let account = deps.api.addr_validate(&account)?;
    let balance = BALANCES
        .may_load(deps.storage, (&account, token_id))?
        .unwrap_or_default();
    Ok(BalanceResponse { balance })
}

fn query_is_approved_caller(deps: Deps, address: String) -> StdResult<IsApprovedCallerResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(IsApprovedCallerResponse {
        approved: APPROVED_CALLERS.has(deps.storage, &address),
    })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin.into_string(),
        ledger: config.ledger.into_string(),
    })
}

fn query_account_balances(
    deps: Deps,
    account: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<AccountBalancesResponse> {
    let account = deps.api.addr_validate(&account)?;
    let start = start_after.map(Bound::exclusive);
    let balances = BALANCES
        .prefix(&account)
        .range(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| item.map(|(token_id, amount)| TokenBalance { token_id, amount }))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(AccountBalancesResponse { balances })
}

fn query_approved_callers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ApprovedCallersResponse> {
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);
    let callers = APPROVED_CALLERS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| item.map(Addr::into_string))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ApprovedCallersResponse { callers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
        MOCK_CONTRACT_ADDR,
    };
    use cosmwasm_std::{
        from_json, ContractResult, CosmosMsg, OwnedDeps, SystemError, SystemResult, WasmMsg,
        WasmQuery,
    };
    use game_economy::ledger::BalanceResponse as LedgerBalanceResponse;

    const LEDGER: &str = "ledger";
    const ENGINE: &str = "trade_engine";

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        let msg = InstantiateMsg {
            admin: None,
            ledger: LEDGER.to_string(),
        };
        instantiate(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("admin", &[]),
            ExecuteMsg::ApproveCaller {
                address: ENGINE.to_string(),
            },
        )
        .unwrap();
        deps
    }

    /// Makes the mocked ledger report `custody` units of every token for the vault.
    fn set_custody(deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier>, custody: u128) {
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { contract_addr, .. } if contract_addr == LEDGER => {
                SystemResult::Ok(ContractResult::Ok(
                    to_json_binary(&LedgerBalanceResponse {
                        balance: Uint128::new(custody),
                    })
                    .unwrap(),
                ))
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "wasm".to_string(),
            }),
        });
    }

    fn deposit(deps: DepsMut, account: &str, token_id: u64, amount: u128) {
        execute(
            deps,
            mock_env(),
            mock_info(account, &[]),
            ExecuteMsg::Deposit {
                token_id,
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    }

    fn balance(deps: Deps, account: &str, token_id: u64) -> Uint128 {
        query_balance(deps, account.to_string(), token_id)
            .unwrap()
            .balance
    }

    fn ledger_msg(msg: &CosmosMsg) -> LedgerExecuteMsg {
        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, LEDGER);
                from_json(msg).unwrap()
            }
            m => panic!("unexpected message: {:?}", m),
        }
    }

    #[test]
    fn proper_initialization() {
        let deps = setup();
        let res = query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap();
        let config: ConfigResponse = from_json(&res).unwrap();
        assert_eq!(
            config,
            ConfigResponse {
                admin: "admin".to_string(),
                ledger: LEDGER.to_string(),
            }
        );
        let res = query_is_approved_caller(deps.as_ref(), ENGINE.to_string()).unwrap();
        assert!(res.approved);
    }

    #[test]
    fn deposit_credits_and_pulls_from_ledger() {
        let mut deps = setup();
        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("alice", &[]),
            ExecuteMsg::Deposit {
                token_id: 0,
                amount: Uint128::new(100),
            },
        )
        .unwrap();

        assert_eq!(balance(deps.as_ref(), "alice", 0), Uint128::new(100));
        assert_eq!(res.messages.len(), 1);
        assert_eq!(
            ledger_msg(&res.messages[0].msg),
            LedgerExecuteMsg::TransferFrom {
                from: "alice".to_string(),
                to: MOCK_CONTRACT_ADDR.to_string(),
                token_id: 0,
                amount: Uint128::new(100),
            }
        );
    }

    #[test]
    fn deposit_batch_checks_lengths() {
        let mut deps = setup();
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("alice", &[]),
            ExecuteMsg::DepositBatch {
                token_ids: vec![0, 1],
                amounts: vec![Uint128::new(1)],
            },
        )
        .unwrap_err();
        match err {
            ContractError::ArrayLengthMismatch { token_ids, amounts } => {
                assert_eq!((token_ids, amounts), (2, 1))
            }
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(balance(deps.as_ref(), "alice", 0), Uint128::zero());

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("alice", &[]),
            ExecuteMsg::DepositBatch {
                token_ids: vec![0, 1],
                amounts: vec![Uint128::new(100), Uint128::new(10)],
            },
        )
        .unwrap();
        assert_eq!(balance(deps.as_ref(), "alice", 0), Uint128::new(100));
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::new(10));
        assert_eq!(
            ledger_msg(&res.messages[0].msg),
            LedgerExecuteMsg::BatchTransferFrom {
                from: "alice".to_string(),
                to: MOCK_CONTRACT_ADDR.to_string(),
                token_ids: vec![0, 1],
                amounts: vec![Uint128::new(100), Uint128::new(10)],
            }
        );
    }

    #[test]
    fn withdraw() {
        let mut deps = setup();
        deposit(deps.as_mut(), "alice", 1, 10);

        let msg = ExecuteMsg::Withdraw {
            to: "bobby".to_string(),
            token_id: 1,
            amount: Uint128::new(11),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap_err();
        match err {
            ContractError::InsufficientBalance {
                account,
                balance,
                requested,
                token_id,
            } => {
                assert_eq!(account, "alice");
                assert_eq!(balance, Uint128::new(10));
                assert_eq!(requested, Uint128::new(11));
                assert_eq!(token_id, 1);
            }
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::new(10));

        let msg = ExecuteMsg::Withdraw {
            to: "bobby".to_string(),
            token_id: 1,
            amount: Uint128::new(4),
        };
        let res = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap();
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::new(6));
        assert_eq!(
            ledger_msg(&res.messages[0].msg),
            LedgerExecuteMsg::Transfer {
                to: "bobby".to_string(),
                token_id: 1,
                amount: Uint128::new(4),
            }
        );
    }

    #[test]
    fn withdraw_batch_is_all_or_nothing() {
        let mut deps = setup();
        deposit(deps.as_mut(), "alice", 0, 100);
        deposit(deps.as_mut(), "alice", 1, 10);

        let msg = ExecuteMsg::WithdrawBatch {
            to: "alice".to_string(),
            token_ids: vec![0, 1, 1],
            amounts: vec![Uint128::new(5), Uint128::new(1)],
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap_err();
        match err {
            ContractError::ArrayLengthMismatch { token_ids, amounts } => {
                assert_eq!((token_ids, amounts), (3, 2))
            }
            e => panic!("unexpected error: {:?}", e),
        }

        // each element fits on its own, the repeated token id does not
        let msg = ExecuteMsg::WithdrawBatch {
            to: "alice".to_string(),
            token_ids: vec![0, 1, 1],
            amounts: vec![Uint128::new(50), Uint128::new(6), Uint128::new(6)],
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap_err();
        match err {
            ContractError::InsufficientBalance { requested, .. } => {
                assert_eq!(requested, Uint128::new(12))
            }
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(balance(deps.as_ref(), "alice", 0), Uint128::new(100));
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::new(10));

        let msg = ExecuteMsg::WithdrawBatch {
            to: "alice".to_string(),
            token_ids: vec![0, 1],
            amounts: vec![Uint128::new(50), Uint128::new(6)],
        };
        let res = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap();
        assert_eq!(balance(deps.as_ref(), "alice", 0), Uint128::new(50));
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::new(4));
        assert_eq!(res.messages.len(), 1);
        assert_eq!(
            ledger_msg(&res.messages[0].msg),
            LedgerExecuteMsg::BatchTransfer {
                to: "alice".to_string(),
                token_ids: vec![0, 1],
                amounts: vec![Uint128::new(50), Uint128::new(6)],
            }
        );
    }

    #[test]
    fn lock_requires_approved_caller() {
        let mut deps = setup();
        deposit(deps.as_mut(), "alice", 1, 10);

        let msg = ExecuteMsg::LockAsset {
            account: "alice".to_string(),
            token_id: 1,
            amount: Uint128::new(1),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap_err();
        match err {
            ContractError::Unauthorized { caller, .. } => assert_eq!(caller, "alice"),
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::new(10));
    }

    #[test]
    fn lock_cannot_escrow_the_same_units_twice() {
        let mut deps = setup();
        deposit(deps.as_mut(), "alice", 1, 1);

        let msg = ExecuteMsg::LockAsset {
            account: "alice".to_string(),
            token_id: 1,
            amount: Uint128::new(1),
        };
        execute(deps.as_mut(), mock_env(), mock_info(ENGINE, &[]), msg.clone()).unwrap();
        assert_eq!(balance(deps.as_ref(), "alice", 1), Uint128::zero());

        let err = execute(deps.as_mut(), mock_env(), mock_info(ENGINE, &[]), msg).unwrap_err();
        match err {
            ContractError::InsufficientBalance {
                account, balance, ..
            } => {
                assert_eq!(account, "alice");
                assert_eq!(balance, Uint128::zero());
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn unlock_credits_within_custody() {
        let mut deps = setup();
        set_custody(&mut deps, 5);

        let msg = ExecuteMsg::UnlockAsset {
            account: "bobby".to_string(),
            token_id: 1,
            amount: Uint128::new(6),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info(ENGINE, &[]), msg).unwrap_err();
        match err {
            ContractError::InsufficientBalance {
                account,
                balance,
                requested,
                ..
            } => {
                assert_eq!(account, MOCK_CONTRACT_ADDR);
                assert_eq!(balance, Uint128::new(5));
                assert_eq!(requested, Uint128::new(6));
            }
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(balance(deps.as_ref(), "bobby", 1), Uint128::zero());

        let msg = ExecuteMsg::UnlockAsset {
            account: "bobby".to_string(),
            token_id: 1,
            amount: Uint128::new(5),
        };
        execute(deps.as_mut(), mock_env(), mock_info(ENGINE, &[]), msg).unwrap();
        assert_eq!(balance(deps.as_ref(), "bobby", 1), Uint128::new(5));

        let msg = ExecuteMsg::UnlockAsset {
            account: "bobby".to_string(),
            token_id: 1,
            amount: Uint128::new(1),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("bobby", &[]), msg).unwrap_err();
        match err {
            ContractError::Unauthorized { .. } => {}
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn unlock_zero_is_a_no_op() {
        let mut deps = setup();
        // no custody handler installed: a ledger query would fail
        let msg = ExecuteMsg::UnlockAsset {
            account: "".to_string(),
            token_id: 0,
            amount: Uint128::zero(),
        };
        let res = execute(deps.as_mut(), mock_env(), mock_info(ENGINE, &[]), msg).unwrap();
        assert!(res.messages.is_empty());

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::AccountBalances {
                account: "bobby".to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
        let balances: AccountBalancesResponse = from_json(&res).unwrap();
        assert!(balances.balances.is_empty());
    }

    #[test]
    fn caller_management_is_admin_only() {
        let mut deps = setup();

        let msg = ExecuteMsg::ApproveCaller {
            address: "auction_engine".to_string(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg.clone())
            .unwrap_err();
        match err {
            ContractError::Unauthorized { caller, required } => {
                assert_eq!(caller, "alice");
                assert_eq!(required, "admin");
            }
            e => panic!("unexpected error: {:?}", e),
        }

        execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();
        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::ApprovedCallers {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
        let callers: ApprovedCallersResponse = from_json(&res).unwrap();
        assert_eq!(callers.callers, vec!["auction_engine", ENGINE]);

        let msg = ExecuteMsg::RevokeCaller {
            address: ENGINE.to_string(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info(ENGINE, &[]), msg.clone())
            .unwrap_err();
        match err {
            ContractError::Unauthorized { .. } => {}
            e => panic!("unexpected error: {:?}", e),
        }
        execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();
        assert!(
            !query_is_approved_caller(deps.as_ref(), ENGINE.to_string())
                .unwrap()
                .approved
        );
    }

    #[test]
    fn update_admin_hands_over_control() {
        let mut deps = setup();
        let msg = ExecuteMsg::UpdateAdmin {
            admin: "new_admin".to_string(),
        };
        execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();

        let msg = ExecuteMsg::ApproveCaller {
            address: "rental_engine".to_string(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg.clone())
            .unwrap_err();
        match err {
            ContractError::Unauthorized { .. } => {}
            e => panic!("unexpected error: {:?}", e),
        }
        execute(deps.as_mut(), mock_env(), mock_info("new_admin", &[]), msg).unwrap();
    }

    #[test]
    fn account_balances_paginate_by_token_id() {
        let mut deps = setup();
        for token_id in 0..4 {
            deposit(deps.as_mut(), "alice", token_id, 10 + token_id as u128);
        }

        let page = query_account_balances(deps.as_ref(), "alice".to_string(), None, Some(2))
            .unwrap()
            .balances;
        assert_eq!(
            page,
            vec![
                TokenBalance {
                    token_id: 0,
                    amount: Uint128::new(10)
                },
                TokenBalance {
                    token_id: 1,
                    amount: Uint128::new(11)
                },
            ]
        );
        let page = query_account_balances(deps.as_ref(), "alice".to_string(), Some(1), None)
            .unwrap()
            .balances;
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].token_id, 2);
    }
}
