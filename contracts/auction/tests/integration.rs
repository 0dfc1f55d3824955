use cosmwasm_std::{Addr, Empty, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use asset_factory::msg::InitialBalance;
use game_auction::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use game_auction::state::{Auction, AuctionStatus};
use game_economy::vault::{VaultBalanceResponse, VaultExecuteMsg, VaultQueryMsg};
use game_economy::{BLOCKS_PER_HOUR, IGC_TOKEN_ID};

const SELLER: &str = "seller";
const BIDDER1: &str = "bidder1";
const BIDDER2: &str = "bidder2";
const ASSET: u64 = 1;

fn ledger_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        asset_factory::contract::execute,
        asset_factory::contract::instantiate,
        asset_factory::contract::query,
    ))
}

fn vault_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        game_vault::contract::execute,
        game_vault::contract::instantiate,
        game_vault::contract::query,
    ))
}

fn auction_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        game_auction::contract::execute,
        game_auction::contract::instantiate,
        game_auction::contract::query,
    ))
}

struct Suite {
    app: App,
    ledger: Addr,
    vault: Addr,
    auction: Addr,
}

impl Suite {
    /// Opens a one hour auction of asset #1 with a reserve of 10 IGC. Both
    /// bidders start with 50 IGC in the vault.
    fn new() -> Self {
        let mut app = App::default();
        let ledger_id = app.store_code(ledger_contract());
        let vault_id = app.store_code(vault_contract());
        let auction_id = app.store_code(auction_contract());
        let admin = Addr::unchecked("admin");

        let grant = |address: &str, token_id: u64, amount: u128| InitialBalance {
            address: address.to_string(),
            token_id,
            amount: Uint128::new(amount),
        };
        let ledger = app
            .instantiate_contract(
                ledger_id,
                admin.clone(),
                &asset_factory::msg::InstantiateMsg {
                    minter: None,
                    initial_balances: vec![
                        grant(SELLER, ASSET, 1),
                        grant(BIDDER1, IGC_TOKEN_ID, 50),
                        grant(BIDDER2, IGC_TOKEN_ID, 50),
                    ],
                },
                &[],
                "asset-factory",
                None,
            )
            .unwrap();
        let vault = app
            .instantiate_contract(
                vault_id,
                admin.clone(),
                &game_vault::msg::InstantiateMsg {
                    admin: None,
                    ledger: ledger.to_string(),
                },
                &[],
                "vault",
                None,
            )
            .unwrap();
        let auction = app
            .instantiate_contract(
                auction_id,
                admin.clone(),
                &InstantiateMsg {
                    vault: vault.to_string(),
                    currency_id: None,
                },
                &[],
                "auction",
                None,
            )
            .unwrap();
        app.execute_contract(
            admin,
            vault.clone(),
            &VaultExecuteMsg::ApproveCaller {
                address: auction.to_string(),
            },
            &[],
        )
        .unwrap();

        let mut suite = Suite {
            app,
            ledger,
            vault,
            auction,
        };
        suite.deposit(SELLER, ASSET, 1);
        suite.deposit(BIDDER1, IGC_TOKEN_ID, 50);
        suite.deposit(BIDDER2, IGC_TOKEN_ID, 50);
        suite.execute(
            SELLER,
            &ExecuteMsg::CreateAuction {
                asset_id: ASSET,
                reserve_price: Uint128::new(10),
                duration_blocks: BLOCKS_PER_HOUR,
            },
        );
        suite
    }

    fn deposit(&mut self, owner: &str, token_id: u64, amount: u128) {
        self.app
            .execute_contract(
                Addr::unchecked(owner),
                self.ledger.clone(),
                &game_economy::ledger::LedgerExecuteMsg::ApproveAll {
                    operator: self.vault.to_string(),
                },
                &[],
            )
            .unwrap();
        self.app
            .execute_contract(
                Addr::unchecked(owner),
                self.vault.clone(),
                &VaultExecuteMsg::Deposit {
                    token_id,
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .unwrap();
    }

    fn execute(&mut self, sender: &str, msg: &ExecuteMsg) -> AppResponse {
        self.app
            .execute_contract(Addr::unchecked(sender), self.auction.clone(), msg, &[])
            .unwrap()
    }

    fn bid(&mut self, bidder: &str, amount: u128) {
        self.execute(
            bidder,
            &ExecuteMsg::PlaceBid {
                id: 1,
                amount: Uint128::new(amount),
            },
        );
    }

    fn balance(&self, account: &str, token_id: u64) -> u128 {
        let res: VaultBalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                self.vault.clone(),
                &VaultQueryMsg::Balance {
                    account: account.to_string(),
                    token_id,
                },
            )
            .unwrap();
        res.balance.u128()
    }

    fn auction(&self) -> Auction {
        self.app
            .wrap()
            .query_wasm_smart(self.auction.clone(), &QueryMsg::Auction { id: 1 })
            .unwrap()
    }
}

#[test]
fn highest_bid_wins_after_deadline() {
    let mut suite = Suite::new();
    assert_eq!(suite.balance(SELLER, ASSET), 0);

    suite.bid(BIDDER1, 10);
    assert_eq!(suite.balance(BIDDER1, IGC_TOKEN_ID), 40);
    suite.bid(BIDDER2, 11);
    assert_eq!(suite.balance(BIDDER1, IGC_TOKEN_ID), 50);
    assert_eq!(suite.balance(BIDDER2, IGC_TOKEN_ID), 39);

    let err = suite
        .app
        .execute_contract(
            Addr::unchecked(BIDDER1),
            suite.auction.clone(),
            &ExecuteMsg::CompleteAuction { id: 1 },
            &[],
        )
        .unwrap_err();
    let deadline_block = suite.auction().deadline_block;
    assert_eq!(
        err.root_cause().to_string(),
        game_auction::ContractError::DeadlineNotPassed {
            current_block: suite.app.block_info().height,
            deadline_block,
        }
        .to_string()
    );

    suite.app.update_block(|block| block.height += BLOCKS_PER_HOUR);
    suite.execute(BIDDER1, &ExecuteMsg::CompleteAuction { id: 1 });

    let auction = suite.auction();
    assert_eq!(auction.status, AuctionStatus::Ended);
    assert_eq!(auction.winning_bid, Uint128::new(11));
    assert_eq!(auction.winning_bidder, Some(Addr::unchecked(BIDDER2)));
    assert_eq!(suite.balance(SELLER, IGC_TOKEN_ID), 11);
    assert_eq!(suite.balance(SELLER, ASSET), 0);
    assert_eq!(suite.balance(BIDDER2, ASSET), 1);
    assert_eq!(suite.balance(BIDDER2, IGC_TOKEN_ID), 39);
    assert_eq!(suite.balance(BIDDER1, IGC_TOKEN_ID), 50);
}

#[test]
fn reserve_not_met_refunds_everyone() {
    let mut suite = Suite::new();
    suite.bid(BIDDER1, 5);
    suite.bid(BIDDER2, 7);

    suite.app.update_block(|block| block.height += BLOCKS_PER_HOUR);
    suite.execute(SELLER, &ExecuteMsg::CompleteAuction { id: 1 });

    let auction = suite.auction();
    assert_eq!(auction.status, AuctionStatus::ReserveNotMet);
    assert_eq!(auction.winning_bidder, None);
    assert_eq!(suite.balance(SELLER, ASSET), 1);
    assert_eq!(suite.balance(SELLER, IGC_TOKEN_ID), 0);
    assert_eq!(suite.balance(BIDDER1, IGC_TOKEN_ID), 50);
    assert_eq!(suite.balance(BIDDER2, IGC_TOKEN_ID), 50);
}

#[test]
fn bid_beyond_balance_is_reverted() {
    let mut suite = Suite::new();
    suite.bid(BIDDER1, 10);

    let err = suite
        .app
        .execute_contract(
            Addr::unchecked(BIDDER2),
            suite.auction.clone(),
            &ExecuteMsg::PlaceBid {
                id: 1,
                amount: Uint128::new(51),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        game_vault::ContractError::InsufficientBalance {
            account: BIDDER2.to_string(),
            balance: Uint128::new(50),
            requested: Uint128::new(51),
            token_id: IGC_TOKEN_ID,
        }
        .to_string()
    );

    // bidder1 still holds the standing bid
    let auction = suite.auction();
    assert_eq!(auction.highest_bid, Uint128::new(10));
    assert_eq!(auction.highest_bidder, Some(Addr::unchecked(BIDDER1)));
    assert_eq!(suite.balance(BIDDER1, IGC_TOKEN_ID), 40);
}

#[test]
fn canceled_auction_returns_asset_and_bid() {
    let mut suite = Suite::new();
    suite.bid(BIDDER1, 12);
    suite.execute(SELLER, &ExecuteMsg::CancelAuction { id: 1 });

    assert_eq!(suite.auction().status, AuctionStatus::Canceled);
    assert_eq!(suite.balance(SELLER, ASSET), 1);
    assert_eq!(suite.balance(BIDDER1, IGC_TOKEN_ID), 50);

    let err = suite
        .app
        .execute_contract(
            Addr::unchecked(SELLER),
            suite.auction.clone(),
            &ExecuteMsg::CancelAuction { id: 1 },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        game_auction::ContractError::NotOpen {
            status: AuctionStatus::Canceled,
        }
        .to_string()
    );
}
