use cosmwasm_std::StdError;
use thiserror::Error;

use crate::state::RentalStatus;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Rental {id} not found")]
    RentalNotFound { id: u64 },

    #[error("Only the owner {owner} may do this, not {caller}")]
    NotTheOwner { caller: String, owner: String },

    #[error("Rental is {status}, not available")]
    NotAvailable { status: RentalStatus },
}
