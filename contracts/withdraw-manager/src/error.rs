use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Null address given for {field}")]
    NullAddress { field: String },

    #[error("Already linked to funding manager {manager}")]
    AlreadyLinked { manager: String },

    #[error("Not linked to a funding manager yet")]
    NotLinked {},

    #[error("Funding manager {manager} is not deployed")]
    ManagerNotDeployed { manager: String },

    #[error("Funding manager points at withdraw manager {actual}, expected {expected}")]
    ManagerMismatch { expected: String, actual: String },

    #[error("Nothing to withdraw")]
    EmptyWithdrawal {},

    #[error("Cannot migrate from {contract} {version}")]
    MigrationError { contract: String, version: String },
}
