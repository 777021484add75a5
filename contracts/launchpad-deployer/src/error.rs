use cosmwasm_std::{StdError, Uint128};
use cw_utils::ParseReplyError;
use launchpad::CampaignError;
use thiserror::Error;

use crate::state::{Component, Phase};

/// This enum describes deployer contract errors
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    ParseReply(#[from] ParseReplyError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Unknown environment {tag}")]
    UnknownEnvironment { tag: String },

    #[error("Components are already deployed (phase {phase})")]
    AlreadyDeployed { phase: Phase },

    #[error("Out of order: expected phase {expected}, found {actual}")]
    OrderingViolation { expected: Phase, actual: Phase },

    #[error("Dependency {component} has not been deployed")]
    MissingDependency { component: Component },

    #[error("Component {component} was already recorded")]
    DuplicateComponent { component: Component },

    #[error("Code id for {component} must be set")]
    MissingCodeId { component: String },

    #[error("Got a submessage reply with unknown id: {id}")]
    UnknownReplyId { id: u64 },

    #[error("Cannot migrate from {contract} {version}")]
    MigrationError { contract: String, version: String },
}

/// Errors raised while building a campaign schedule.
#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("{0}")]
    Campaign(#[from] CampaignError),

    #[error("Schedule already bound at {bound_at}")]
    AlreadyBound { bound_at: u64 },

    #[error("Rounds opened at {opened_at}, cannot rebind to {reference_instant}")]
    RoundsAlreadyOpen {
        opened_at: u64,
        reference_instant: u64,
    },

    #[error("App token must not be the null address")]
    NullAppToken {},

    #[error("Schedule times are not bound")]
    TimesUnbound {},

    #[error("App token is not bound")]
    TokenUnbound {},

    #[error("Owner must not be the null address")]
    NullOwner {},

    #[error("Node fee divisor must be positive")]
    InvalidNodeFeeDivisor {},

    #[error("Node fee {node_fee} / {node_fee_divisor} overflows")]
    NodeFeeOverflow {
        node_fee: Uint128,
        node_fee_divisor: u64,
    },

    #[error("Schedule instant overflows")]
    InstantOverflow {},
}
