use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Requester {requester} is already registered")]
    RequesterAlreadyRegistered { requester: String },

    #[error("Node fee divisor must be positive")]
    InvalidNodeFeeDivisor {},

    #[error("Rate must be positive")]
    InvalidRate {},

    #[error("Cannot migrate from {contract} {version}")]
    MigrationError { contract: String, version: String },
}
