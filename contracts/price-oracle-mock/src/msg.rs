use cosmwasm_schema::cw_serde;
use cosmwasm_std::Decimal;

pub use launchpad::price_feed::{ExecuteMsg, QueryMsg, RateRequest, RateResponse};

#[cw_serde]
pub struct InstantiateMsg {
    /// Rate served until the admin publishes another one, 1.0 when omitted
    pub rate: Option<Decimal>,
}

#[cw_serde]
pub struct MigrateMsg {}
