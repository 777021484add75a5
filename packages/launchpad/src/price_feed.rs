use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal, QuerierWrapper, StdResult};

use crate::campaign::PriceOracleInfo;

/// Interface shared by every price feed variant.
#[cw_serde]
pub enum ExecuteMsg {
    /// Allow `requester` to register the oracle job. Feed admin only, once.
    RegisterRequester { requester: String },
    /// Register the oracle job that should serve rates for a campaign. Registered requester only.
    RequestRate {
        oracle: PriceOracleInfo,
        node_fee_divisor: u64,
    },
    /// Publish a new rate
    Fulfill { rate: Decimal },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RateResponse)]
    LatestRate {},
    #[returns(Option<RateRequest>)]
    Request {},
}

#[cw_serde]
#[derive(Default)]
pub struct RateResponse {
    pub rate: Option<Decimal>,
    pub updated_at: Option<u64>,
}

/// The oracle job a feed was asked to serve.
#[cw_serde]
pub struct RateRequest {
    pub requester: Addr,
    pub oracle: PriceOracleInfo,
    /// Real node fee, `node_fee / node_fee_divisor`
    pub fee: Decimal,
    pub requested_at: u64,
}

/// Read access to a price feed, whichever variant sits behind the address.
pub struct PriceFeedQuerier<'a> {
    querier: &'a QuerierWrapper<'a>,
    feed: &'a Addr,
}

impl<'a> PriceFeedQuerier<'a> {
    pub fn new(querier: &'a QuerierWrapper<'a>, feed: &'a Addr) -> Self {
        PriceFeedQuerier { querier, feed }
    }

    pub fn latest_rate(&self) -> StdResult<RateResponse> {
        self.querier
            .query_wasm_smart(self.feed, &QueryMsg::LatestRate {})
    }

    pub fn request(&self) -> StdResult<Option<RateRequest>> {
        self.querier.query_wasm_smart(self.feed, &QueryMsg::Request {})
    }
}
