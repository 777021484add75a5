use cosmwasm_std::StdError;
use launchpad::CampaignError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Campaign(#[from] CampaignError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Null address given for {field}")]
    NullAddress { field: String },

    #[error("Campaign is already scheduled")]
    AlreadyScheduled {},

    #[error("Campaign is not scheduled yet")]
    NotScheduled {},

    #[error("Node fee divisor must be positive")]
    InvalidNodeFeeDivisor {},

    #[error("Round counters of a new campaign must start at zero")]
    CountersNotZero {},

    #[error("Cannot migrate from {contract} {version}")]
    MigrationError { contract: String, version: String },
}
