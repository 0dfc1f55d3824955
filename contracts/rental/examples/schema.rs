use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use game_rental::msg::{
    ConfigResponse, CountResponse, ExecuteMsg, InstantiateMsg, QueryMsg, RentalActiveResponse,
    RentalsResponse,
};
use game_rental::state::{Config, RentalListing};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(Config), &out_dir);
    export_schema(&schema_for!(RentalListing), &out_dir);
    export_schema(&schema_for!(CountResponse), &out_dir);
    export_schema(&schema_for!(RentalActiveResponse), &out_dir);
    export_schema(&schema_for!(RentalsResponse), &out_dir);
    export_schema(&schema_for!(ConfigResponse), &out_dir);
}
