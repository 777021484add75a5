use std::collections::HashSet;
use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, StdError, StdResult, Uint128};

use crate::{is_null_address, CampaignError};

/// The two parallel round tracks of a campaign.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Track {
    Scope,
    Stake,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Scope => write!(f, "scope"),
            Track::Stake => write!(f, "stake"),
        }
    }
}

/// A time-boxed discounted sale round.
#[cw_serde]
pub struct ScopeRound {
    /// Instant the round opens, derived from the campaign reference instant
    pub opening_time: u64,
    /// Length of the round in seconds
    pub duration_time: u64,
    /// Discount rate applied during the round
    pub discount: u64,
    /// Upper bound on the tokens issued in this round
    pub cap_tokens_to_be_sold: Uint128,
    /// Tokens issued so far, maintained by the funding manager
    pub minted_tokens: Uint128,
}

/// A time-boxed staking reward round.
#[cw_serde]
pub struct StakeRound {
    /// Instant the round opens, derived from the campaign reference instant
    pub opening_time: u64,
    /// Length of the round in seconds
    pub duration_time: u64,
    /// Reward rate paid to stakers of this round
    pub stake_reward: u64,
    /// Upper bound on the tokens staked in this round
    pub cap_tokens_to_be_staked: Uint128,
    /// Tokens staked so far, maintained by the funding manager
    pub staked_tokens: Uint128,
}

/// Common view over both round kinds.
pub trait Round {
    fn opening_time(&self) -> u64;
    fn duration_time(&self) -> u64;
    fn set_opening_time(&mut self, opening_time: u64);
    /// Running counter (minted or staked tokens).
    fn filled(&self) -> Uint128;
    fn cap(&self) -> Uint128;

    fn end_time(&self) -> u64 {
        self.opening_time().saturating_add(self.duration_time())
    }

    fn is_open_at(&self, time: u64) -> bool {
        self.opening_time() <= time && time < self.end_time()
    }
}

impl Round for ScopeRound {
    fn opening_time(&self) -> u64 {
        self.opening_time
    }

    fn duration_time(&self) -> u64 {
        self.duration_time
    }

    fn set_opening_time(&mut self, opening_time: u64) {
        self.opening_time = opening_time;
    }

    fn filled(&self) -> Uint128 {
        self.minted_tokens
    }

    fn cap(&self) -> Uint128 {
        self.cap_tokens_to_be_sold
    }
}

impl Round for StakeRound {
    fn opening_time(&self) -> u64 {
        self.opening_time
    }

    fn duration_time(&self) -> u64 {
        self.duration_time
    }

    fn set_opening_time(&mut self, opening_time: u64) {
        self.opening_time = opening_time;
    }

    fn filled(&self) -> Uint128 {
        self.staked_tokens
    }

    fn cap(&self) -> Uint128 {
        self.cap_tokens_to_be_staked
    }
}

/// Campaign configuration handed to the funding manager.
#[cw_serde]
pub struct TokenFundingData {
    /// Fundraising token. Empty until bound.
    pub app_token: String,
    pub r_min: u64,
    pub r_max: u64,
    pub maturity: u64,
    pub t: u64,
    /// Addresses allowed to administer the campaign
    pub owners: Vec<String>,
    pub funding_scope_rounds_data: Vec<ScopeRound>,
    pub funding_stake_rounds_data: Vec<StakeRound>,
}

impl TokenFundingData {
    /// End of the last round across both tracks.
    pub fn last_round_end(&self) -> Option<u64> {
        let scope = self.funding_scope_rounds_data.iter().map(Round::end_time);
        let stake = self.funding_stake_rounds_data.iter().map(Round::end_time);
        scope.chain(stake).max()
    }

    /// Scope round open at `time`, found by linear scan.
    pub fn current_scope_round(&self, time: u64) -> Option<(usize, &ScopeRound)> {
        current_round(&self.funding_scope_rounds_data, time)
    }

    /// Stake round open at `time`, found by linear scan.
    pub fn current_stake_round(&self, time: u64) -> Option<(usize, &StakeRound)> {
        current_round(&self.funding_stake_rounds_data, time)
    }
}

/// Oracle job parameters handed to the funding manager alongside the campaign.
#[cw_serde]
pub struct PriceOracleInfo {
    /// Fundraising token. Empty until bound.
    pub app_token: String,
    /// Token the oracle network is paid in
    pub feed_token: String,
    /// Node serving the oracle job
    pub feed_node: String,
    pub job_id: String,
    /// Fee in fixed point, divided by the submission's node fee divisor
    pub node_fee: Uint128,
}

impl PriceOracleInfo {
    pub fn fee(&self, node_fee_divisor: u64) -> StdResult<Decimal> {
        if node_fee_divisor == 0 {
            return Err(StdError::generic_err("Node fee divisor must be positive"));
        }
        Decimal::checked_from_ratio(self.node_fee, node_fee_divisor).map_err(|_| {
            StdError::generic_err(format!(
                "Node fee {} / {} overflows",
                self.node_fee, node_fee_divisor
            ))
        })
    }
}

fn current_round<R: Round>(rounds: &[R], time: u64) -> Option<(usize, &R)> {
    rounds
        .iter()
        .enumerate()
        .find(|(_, round)| round.is_open_at(time))
}

fn validate_track<R: Round>(track: Track, rounds: &[R]) -> Result<(), CampaignError> {
    let mut previous: Option<u64> = None;
    for (index, round) in rounds.iter().enumerate() {
        if round.duration_time() == 0 {
            return Err(CampaignError::ZeroDuration {
                track: track.to_string(),
                index,
            });
        }
        if round.filled() > round.cap() {
            return Err(CampaignError::CounterAboveCap {
                track: track.to_string(),
                index,
            });
        }
        if matches!(previous, Some(opening) if round.opening_time() < opening) {
            return Err(CampaignError::UnorderedRounds {
                track: track.to_string(),
                index,
            });
        }
        previous = Some(round.opening_time());
    }
    Ok(())
}

/// Checks that a campaign and its oracle configuration are complete and consistent.
pub fn validate_campaign(
    token_funding: &TokenFundingData,
    oracle: &PriceOracleInfo,
) -> Result<(), CampaignError> {
    if is_null_address(&token_funding.app_token) || is_null_address(&oracle.app_token) {
        return Err(CampaignError::AppTokenUnbound {});
    }
    if token_funding.app_token != oracle.app_token {
        return Err(CampaignError::AppTokenMismatch {
            campaign: token_funding.app_token.clone(),
            oracle: oracle.app_token.clone(),
        });
    }
    if token_funding.r_min > token_funding.r_max {
        return Err(CampaignError::InvertedRateBounds {
            r_min: token_funding.r_min,
            r_max: token_funding.r_max,
        });
    }
    if token_funding.owners.is_empty() {
        return Err(CampaignError::NoOwners {});
    }
    let mut seen = HashSet::new();
    for owner in &token_funding.owners {
        if !seen.insert(owner.as_str()) {
            return Err(CampaignError::DuplicateOwner {
                owner: owner.clone(),
            });
        }
    }

    validate_track(Track::Scope, &token_funding.funding_scope_rounds_data)?;
    validate_track(Track::Stake, &token_funding.funding_stake_rounds_data)?;

    if let Some(last_round_end) = token_funding.last_round_end() {
        if token_funding.maturity < last_round_end {
            return Err(CampaignError::MaturityBeforeRoundsEnd {
                maturity: token_funding.maturity,
                last_round_end,
            });
        }
    }
    Ok(())
}
