use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use launchpad::campaign::{PriceOracleInfo, TokenFundingData};

use crate::msg::FundingStatus;

/// Dependencies of the funding manager. Immutable after instantiation.
#[cw_serde]
pub struct Config {
    /// Address that instantiated the contract, the only one allowed to submit the campaign
    pub admin: Addr,
    pub withdraw_manager: Addr,
    pub scope_token: Addr,
    pub stake_token: Addr,
    pub insurance: Addr,
    /// Price feed, production oracle or substitute depending on the deployment
    pub price_feed: Addr,
    pub project_info: Addr,
}

/// The submitted campaign.
#[cw_serde]
pub struct Campaign {
    pub token_funding: TokenFundingData,
    pub price_oracle_info: PriceOracleInfo,
    pub node_fee_divisor: u64,
    pub app_token: Addr,
    pub owners: Vec<Addr>,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATUS: Item<FundingStatus> = Item::new("status");

pub const CAMPAIGN: Item<Campaign> = Item::new("campaign");
