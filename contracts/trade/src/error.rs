use cosmwasm_std::StdError;
use thiserror::Error;

use crate::state::ProposalStatus;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Proposal {id} not found")]
    ProposalNotFound { id: u64 },

    #[error("Only the proposer {proposer} may do this, not {caller}")]
    NotProposer { caller: String, proposer: String },

    #[error("Only the receiver {receiver} may do this, not {caller}")]
    NotReceiver { caller: String, receiver: String },

    #[error("Proposal is {status}, not pending")]
    NotPending { status: ProposalStatus },
}
