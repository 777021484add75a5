use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin};

#[cw_serde]
pub struct InstantiateMsg {}

/// This structure describes the execute functions of the withdraw manager.
#[cw_serde]
pub enum ExecuteMsg {
    /// Link the funding manager. Accepted exactly once.
    Initialize { manager: String },
    /// Disburse funds. Only the linked funding manager may call it.
    Withdraw { recipient: String, amount: Vec<Coin> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(LinkStatus)]
    LinkStatus {},
}

/// Link state of the withdraw manager.
#[cw_serde]
pub enum LinkStatus {
    Unlinked,
    Linked { manager: Addr },
}

impl LinkStatus {
    pub fn manager(&self) -> Option<&Addr> {
        match self {
            LinkStatus::Unlinked => None,
            LinkStatus::Linked { manager } => Some(manager),
        }
    }
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
}

#[cw_serde]
pub struct MigrateMsg {}
