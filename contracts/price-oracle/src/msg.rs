use cosmwasm_schema::cw_serde;

pub use launchpad::price_feed::{ExecuteMsg, QueryMsg, RateRequest, RateResponse};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub struct MigrateMsg {}
