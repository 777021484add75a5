use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use crate::msg::{RateRequest, RateResponse};

#[cw_serde]
pub struct Config {
    pub admin: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Only address allowed to register an oracle job, set by the admin
pub const REQUESTER: Item<Addr> = Item::new("requester");

/// Oracle job registered by the funding manager
pub const REQUEST: Item<RateRequest> = Item::new("request");

pub const LATEST_RATE: Item<RateResponse> = Item::new("latest_rate");
