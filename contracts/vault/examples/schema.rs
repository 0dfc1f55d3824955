use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use game_vault::msg::{
    AccountBalancesResponse, ApprovedCallersResponse, BalanceResponse, ConfigResponse,
    ExecuteMsg, InstantiateMsg, IsApprovedCallerResponse, QueryMsg,
};
use game_vault::state::Config;

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(Config), &out_dir);
    export_schema(&schema_for!(BalanceResponse), &out_dir);
    export_schema(&schema_for!(IsApprovedCallerResponse), &out_dir);
    export_schema(&schema_for!(ConfigResponse), &out_dir);
    export_schema(&schema_for!(AccountBalancesResponse), &out_dir);
    export_schema(&schema_for!(ApprovedCallersResponse), &out_dir);
}
