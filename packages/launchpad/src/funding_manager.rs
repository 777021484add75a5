use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Coin;

use crate::campaign::{PriceOracleInfo, ScopeRound, StakeRound, TokenFundingData};
use crate::price_feed::RateResponse;

/// Every dependency of the funding manager, fixed at instantiation.
#[cw_serde]
pub struct InstantiateMsg {
    pub withdraw_manager: String,
    pub scope_token: String,
    pub stake_token: String,
    pub insurance: String,
    pub price_feed: String,
    pub project_info: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Submit the campaign schedule. Moves the manager from unconfigured to scheduled.
    InitializeTokenFunding {
        token_funding: TokenFundingData,
        price_oracle_info: PriceOracleInfo,
        node_fee_divisor: u64,
    },
    /// Ask the withdraw manager to disburse funds. Campaign owners only.
    Withdraw { recipient: String, amount: Vec<Coin> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(FundingStatus)]
    Status {},
    #[returns(CampaignResponse)]
    Campaign {},
    /// Scope round open at the current block time, if any
    #[returns(Option<CurrentScopeRoundResponse>)]
    CurrentScopeRound {},
    /// Stake round open at the current block time, if any
    #[returns(Option<CurrentStakeRoundResponse>)]
    CurrentStakeRound {},
    /// Latest rate of the configured price feed
    #[returns(RateResponse)]
    ExchangeRate {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub withdraw_manager: String,
    pub scope_token: String,
    pub stake_token: String,
    pub insurance: String,
    pub price_feed: String,
    pub project_info: String,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum FundingStatus {
    Unconfigured,
    Scheduled,
}

#[cw_serde]
pub struct CampaignResponse {
    pub token_funding: TokenFundingData,
    pub price_oracle_info: PriceOracleInfo,
    pub node_fee_divisor: u64,
}

#[cw_serde]
pub struct CurrentScopeRoundResponse {
    pub index: u64,
    pub round: ScopeRound,
}

#[cw_serde]
pub struct CurrentStakeRoundResponse {
    pub index: u64,
    pub round: StakeRound,
}

#[cw_serde]
pub struct MigrateMsg {}
