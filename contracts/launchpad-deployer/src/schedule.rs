use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use launchpad::campaign::{
    validate_campaign, PriceOracleInfo, Round, ScopeRound, StakeRound, TokenFundingData, Track,
};
use launchpad::is_null_address;

use crate::error::ScheduleError;

/// Seconds between the opening instants of consecutive rounds of a track.
pub const DEFAULT_WINDOW_SKEW: u64 = 20;
/// Seconds from the reference instant to maturity.
pub const DEFAULT_HORIZON_OFFSET: u64 = 60;
/// Scale of the oracle node fee.
pub const DEFAULT_NODE_FEE_DIVISOR: u64 = 1000;

#[cw_serde]
pub struct ScopeRoundTemplate {
    pub duration_time: u64,
    pub discount: u64,
    pub cap_tokens_to_be_sold: Uint128,
}

#[cw_serde]
pub struct StakeRoundTemplate {
    pub duration_time: u64,
    pub stake_reward: u64,
    pub cap_tokens_to_be_staked: Uint128,
}

#[cw_serde]
pub struct OracleTemplate {
    pub feed_token: String,
    pub feed_node: String,
    pub job_id: String,
    pub node_fee: Uint128,
}

/// Hand-authored campaign values. Everything except the reference instant and the app token.
#[cw_serde]
pub struct CampaignTemplate {
    pub r_min: u64,
    pub r_max: u64,
    pub owners: Vec<String>,
    pub scope_rounds: Vec<ScopeRoundTemplate>,
    pub stake_rounds: Vec<StakeRoundTemplate>,
    pub oracle: OracleTemplate,
    pub window_skew: u64,
    pub horizon_offset: u64,
    pub node_fee_divisor: u64,
}

/// Which part of the campaign [`CampaignTemplate::build_template`] should produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    ScopeRounds,
    StakeRounds,
    TokenFunding,
    PriceOracle,
}

/// A time-unbound piece of the campaign.
#[derive(Clone, Debug, PartialEq)]
pub enum Template {
    ScopeRounds(Vec<ScopeRound>),
    StakeRounds(Vec<StakeRound>),
    TokenFunding(TokenFundingData),
    PriceOracle(PriceOracleInfo),
}

impl CampaignTemplate {
    /// Checks the values that do not depend on the reference instant or the app token.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.owners.iter().any(|owner| is_null_address(owner)) {
            return Err(ScheduleError::NullOwner {});
        }
        if self.node_fee_divisor == 0 {
            return Err(ScheduleError::InvalidNodeFeeDivisor {});
        }
        self.price_oracle()
            .fee(self.node_fee_divisor)
            .map_err(|_| ScheduleError::NodeFeeOverflow {
                node_fee: self.oracle.node_fee,
                node_fee_divisor: self.node_fee_divisor,
            })?;
        Ok(())
    }

    pub fn build_template(&self, kind: TemplateKind) -> Template {
        match kind {
            TemplateKind::ScopeRounds => Template::ScopeRounds(self.scope_rounds()),
            TemplateKind::StakeRounds => Template::StakeRounds(self.stake_rounds()),
            TemplateKind::TokenFunding => Template::TokenFunding(self.token_funding()),
            TemplateKind::PriceOracle => Template::PriceOracle(self.price_oracle()),
        }
    }

    /// Scope rounds with placeholder opening times and zeroed counters.
    pub fn scope_rounds(&self) -> Vec<ScopeRound> {
        self.scope_rounds
            .iter()
            .map(|round| ScopeRound {
                opening_time: 0,
                duration_time: round.duration_time,
                discount: round.discount,
                cap_tokens_to_be_sold: round.cap_tokens_to_be_sold,
                minted_tokens: Uint128::zero(),
            })
            .collect()
    }

    /// Stake rounds with placeholder opening times and zeroed counters.
    pub fn stake_rounds(&self) -> Vec<StakeRound> {
        self.stake_rounds
            .iter()
            .map(|round| StakeRound {
                opening_time: 0,
                duration_time: round.duration_time,
                stake_reward: round.stake_reward,
                cap_tokens_to_be_staked: round.cap_tokens_to_be_staked,
                staked_tokens: Uint128::zero(),
            })
            .collect()
    }

    pub fn token_funding(&self) -> TokenFundingData {
        TokenFundingData {
            app_token: String::new(),
            r_min: self.r_min,
            r_max: self.r_max,
            maturity: 0,
            t: 0,
            owners: self.owners.clone(),
            funding_scope_rounds_data: self.scope_rounds(),
            funding_stake_rounds_data: self.stake_rounds(),
        }
    }

    pub fn price_oracle(&self) -> PriceOracleInfo {
        PriceOracleInfo {
            app_token: String::new(),
            feed_token: self.oracle.feed_token.clone(),
            feed_node: self.oracle.feed_node.clone(),
            job_id: self.oracle.job_id.clone(),
            node_fee: self.oracle.node_fee,
        }
    }

    pub fn draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            token_funding: self.token_funding(),
            price_oracle_info: self.price_oracle(),
            window_skew: self.window_skew,
            horizon_offset: self.horizon_offset,
            node_fee_divisor: self.node_fee_divisor,
            bound_at: None,
        }
    }
}

/// Non-fatal schedule findings.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ScheduleWarning {
    /// Round `index` opens before round `index - 1` of the same track has ended
    RoundOverlap { track: Track, index: u64 },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::RoundOverlap { track, index } => {
                write!(
                    f,
                    "{} round {} overlaps round {}",
                    track,
                    index,
                    index.saturating_sub(1)
                )
            }
        }
    }
}

/// Campaign ready for submission to the funding manager.
#[cw_serde]
pub struct AssembledCampaign {
    pub token_funding: TokenFundingData,
    pub price_oracle_info: PriceOracleInfo,
    pub node_fee_divisor: u64,
    pub warnings: Vec<ScheduleWarning>,
}

/// Campaign under construction. Times and token are bound once each.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleDraft {
    token_funding: TokenFundingData,
    price_oracle_info: PriceOracleInfo,
    window_skew: u64,
    horizon_offset: u64,
    node_fee_divisor: u64,
    bound_at: Option<u64>,
}

fn staggered<R: Round + Clone>(
    rounds: &[R],
    reference_instant: u64,
    window_skew: u64,
) -> Result<Vec<R>, ScheduleError> {
    rounds
        .iter()
        .enumerate()
        .map(|(index, round)| -> Result<R, ScheduleError> {
            let opening_time = (index as u64)
                .checked_mul(window_skew)
                .and_then(|offset| reference_instant.checked_add(offset))
                .ok_or(ScheduleError::InstantOverflow {})?;
            let mut round = round.clone();
            round.set_opening_time(opening_time);
            Ok(round)
        })
        .collect()
}

fn overlaps<R: Round>(track: Track, rounds: &[R]) -> impl Iterator<Item = ScheduleWarning> + '_ {
    rounds
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].end_time() > pair[1].opening_time())
        .map(move |(index, _)| ScheduleWarning::RoundOverlap {
            track,
            index: index as u64 + 1,
        })
}

impl ScheduleDraft {
    pub fn token_funding(&self) -> &TokenFundingData {
        &self.token_funding
    }

    pub fn price_oracle_info(&self) -> &PriceOracleInfo {
        &self.price_oracle_info
    }

    pub fn bound_at(&self) -> Option<u64> {
        self.bound_at
    }

    pub fn is_token_bound(&self) -> bool {
        !is_null_address(&self.token_funding.app_token)
    }

    /// Opens round `i` of each track at `reference_instant + i * window_skew` and sets
    /// maturity and `t` to `reference_instant + horizon_offset`.
    pub fn bind_times(&mut self, reference_instant: u64) -> Result<(), ScheduleError> {
        if let Some(bound_at) = self.bound_at {
            // the first round of each track opened at the previous reference instant
            if reference_instant > bound_at {
                return Err(ScheduleError::RoundsAlreadyOpen {
                    opened_at: bound_at,
                    reference_instant,
                });
            }
            return Err(ScheduleError::AlreadyBound { bound_at });
        }

        let horizon = reference_instant
            .checked_add(self.horizon_offset)
            .ok_or(ScheduleError::InstantOverflow {})?;
        let scope_rounds = staggered(
            &self.token_funding.funding_scope_rounds_data,
            reference_instant,
            self.window_skew,
        )?;
        let stake_rounds = staggered(
            &self.token_funding.funding_stake_rounds_data,
            reference_instant,
            self.window_skew,
        )?;

        self.token_funding.funding_scope_rounds_data = scope_rounds;
        self.token_funding.funding_stake_rounds_data = stake_rounds;
        self.token_funding.maturity = horizon;
        self.token_funding.t = horizon;
        self.bound_at = Some(reference_instant);
        Ok(())
    }

    /// Writes the app token into both the campaign and the oracle configuration.
    pub fn bind_token(&mut self, app_token: &str) -> Result<(), ScheduleError> {
        if is_null_address(app_token) {
            return Err(ScheduleError::NullAppToken {});
        }
        self.token_funding.app_token = app_token.to_string();
        self.price_oracle_info.app_token = app_token.to_string();
        Ok(())
    }

    /// Rounds that open before their predecessor ends. Empty until times are bound.
    pub fn warnings(&self) -> Vec<ScheduleWarning> {
        if self.bound_at.is_none() {
            return vec![];
        }
        overlaps(Track::Scope, &self.token_funding.funding_scope_rounds_data)
            .chain(overlaps(
                Track::Stake,
                &self.token_funding.funding_stake_rounds_data,
            ))
            .collect()
    }

    pub fn finish(self) -> Result<AssembledCampaign, ScheduleError> {
        if self.bound_at.is_none() {
            return Err(ScheduleError::TimesUnbound {});
        }
        if !self.is_token_bound() {
            return Err(ScheduleError::TokenUnbound {});
        }
        validate_campaign(&self.token_funding, &self.price_oracle_info)?;

        let warnings = self.warnings();
        Ok(AssembledCampaign {
            token_funding: self.token_funding,
            price_oracle_info: self.price_oracle_info,
            node_fee_divisor: self.node_fee_divisor,
            warnings,
        })
    }
}

/// Builds the submission for a campaign starting at `reference_instant`.
pub fn assemble(
    template: &CampaignTemplate,
    app_token: &str,
    reference_instant: u64,
) -> Result<AssembledCampaign, ScheduleError> {
    template.validate()?;
    let mut draft = template.draft();
    draft.bind_times(reference_instant)?;
    draft.bind_token(app_token)?;
    draft.finish()
}

#[cfg(test)]
mod tests {
    use launchpad::CampaignError;
    use proptest::prelude::*;

    use super::*;

    const T0: u64 = 1_700_000_000;

    fn scope(duration_time: u64) -> ScopeRoundTemplate {
        ScopeRoundTemplate {
            duration_time,
            discount: 50,
            cap_tokens_to_be_sold: Uint128::new(1000),
        }
    }

    fn stake(duration_time: u64) -> StakeRoundTemplate {
        StakeRoundTemplate {
            duration_time,
            stake_reward: 50,
            cap_tokens_to_be_staked: Uint128::new(1000),
        }
    }

    fn template() -> CampaignTemplate {
        CampaignTemplate {
            r_min: 5000,
            r_max: 15000,
            owners: vec!["owner".to_string()],
            scope_rounds: vec![scope(30)],
            stake_rounds: vec![stake(30)],
            oracle: OracleTemplate {
                feed_token: "link-token".to_string(),
                feed_node: "oracle-node".to_string(),
                job_id: "3b7ca0d48c7a4b2da9268456665d11ae".to_string(),
                node_fee: Uint128::zero(),
            },
            window_skew: DEFAULT_WINDOW_SKEW,
            horizon_offset: DEFAULT_HORIZON_OFFSET,
            node_fee_divisor: DEFAULT_NODE_FEE_DIVISOR,
        }
    }

    #[test]
    fn single_round_campaign() {
        let campaign = assemble(&template(), "app-token", T0).unwrap();
        let token_funding = &campaign.token_funding;

        assert_eq!(token_funding.funding_scope_rounds_data[0].opening_time, T0);
        assert_eq!(token_funding.funding_stake_rounds_data[0].opening_time, T0);
        assert_eq!(token_funding.maturity, T0 + 60);
        assert_eq!(token_funding.t, T0 + 60);
        assert_eq!(
            token_funding.funding_scope_rounds_data[0].minted_tokens,
            Uint128::zero()
        );
        assert_eq!(
            token_funding.funding_stake_rounds_data[0].staked_tokens,
            Uint128::zero()
        );
        assert_eq!(token_funding.app_token, "app-token");
        assert_eq!(campaign.price_oracle_info.app_token, "app-token");
        assert_eq!(campaign.node_fee_divisor, 1000);
        assert!(campaign.warnings.is_empty());
    }

    #[test]
    fn templates_are_time_unbound() {
        let template = template();
        match template.build_template(TemplateKind::TokenFunding) {
            Template::TokenFunding(token_funding) => {
                assert_eq!(token_funding.app_token, "");
                assert_eq!(token_funding.maturity, 0);
                assert!(token_funding
                    .funding_scope_rounds_data
                    .iter()
                    .all(|round| round.opening_time == 0 && round.minted_tokens.is_zero()));
            }
            other => panic!("unexpected template {:?}", other),
        }
        assert_eq!(
            template.build_template(TemplateKind::StakeRounds),
            Template::StakeRounds(template.stake_rounds())
        );
        assert_eq!(
            template.build_template(TemplateKind::PriceOracle),
            Template::PriceOracle(template.price_oracle())
        );
    }

    #[test]
    fn rounds_are_staggered_by_index() {
        let mut template = template();
        template.scope_rounds = vec![scope(10), scope(10), scope(10)];
        template.stake_rounds = vec![stake(5), stake(5)];

        let campaign = assemble(&template, "app-token", T0).unwrap();
        let scope_openings: Vec<u64> = campaign
            .token_funding
            .funding_scope_rounds_data
            .iter()
            .map(|round| round.opening_time)
            .collect();
        let stake_openings: Vec<u64> = campaign
            .token_funding
            .funding_stake_rounds_data
            .iter()
            .map(|round| round.opening_time)
            .collect();
        assert_eq!(scope_openings, vec![T0, T0 + 20, T0 + 40]);
        assert_eq!(stake_openings, vec![T0, T0 + 20]);
    }

    #[test]
    fn overlapping_rounds_are_reported() {
        let mut template = template();
        template.scope_rounds = vec![scope(30), scope(30)];

        let campaign = assemble(&template, "app-token", T0).unwrap();
        assert_eq!(
            campaign.warnings,
            vec![ScheduleWarning::RoundOverlap {
                track: Track::Scope,
                index: 1
            }]
        );
        assert_eq!(
            campaign.warnings[0].to_string(),
            "scope round 1 overlaps round 0"
        );
    }

    #[test]
    fn rounds_past_maturity_are_rejected() {
        let mut template = template();
        template.stake_rounds = vec![stake(30), stake(30), stake(30)];

        let err = assemble(&template, "app-token", T0).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Campaign(CampaignError::MaturityBeforeRoundsEnd {
                maturity: T0 + 60,
                last_round_end: T0 + 70,
            })
        );
    }

    #[test]
    fn times_bind_once() {
        let mut draft = template().draft();
        draft.bind_times(T0).unwrap();
        let bound = draft.clone();

        assert_eq!(
            draft.bind_times(T0 + 10),
            Err(ScheduleError::RoundsAlreadyOpen {
                opened_at: T0,
                reference_instant: T0 + 10,
            })
        );
        assert_eq!(
            draft.bind_times(T0 - 10),
            Err(ScheduleError::AlreadyBound { bound_at: T0 })
        );
        assert_eq!(draft, bound);
    }

    #[test]
    fn null_token_leaves_draft_unbound() {
        let mut draft = template().draft();
        draft.bind_times(T0).unwrap();

        assert_eq!(draft.bind_token(""), Err(ScheduleError::NullAppToken {}));
        assert_eq!(draft.bind_token("  "), Err(ScheduleError::NullAppToken {}));
        assert!(!draft.is_token_bound());
        assert_eq!(draft.price_oracle_info().app_token, "");
        assert_eq!(draft.finish(), Err(ScheduleError::TokenUnbound {}));
    }

    #[test]
    fn finish_requires_times() {
        let mut draft = template().draft();
        draft.bind_token("app-token").unwrap();
        assert_eq!(draft.finish(), Err(ScheduleError::TimesUnbound {}));
    }

    #[test]
    fn template_values_are_checked() {
        let mut template = template();
        template.node_fee_divisor = 0;
        assert_eq!(
            assemble(&template, "app-token", T0),
            Err(ScheduleError::InvalidNodeFeeDivisor {})
        );

        let mut template = self::template();
        template.owners.push(String::new());
        assert_eq!(
            assemble(&template, "app-token", T0),
            Err(ScheduleError::NullOwner {})
        );
    }

    #[test]
    fn oversized_node_fee_is_rejected_before_binding() {
        let mut template = template();
        template.oracle.node_fee = Uint128::MAX;
        assert_eq!(
            assemble(&template, "app-token", T0),
            Err(ScheduleError::NodeFeeOverflow {
                node_fee: Uint128::MAX,
                node_fee_divisor: DEFAULT_NODE_FEE_DIVISOR,
            })
        );
    }

    #[test]
    fn warning_text_handles_first_round() {
        let warning = ScheduleWarning::RoundOverlap {
            track: Track::Stake,
            index: 0,
        };
        assert_eq!(warning.to_string(), "stake round 0 overlaps round 0");
    }

    #[test]
    fn overflowing_instants_are_rejected() {
        let mut draft = template().draft();
        assert_eq!(
            draft.bind_times(u64::MAX - 10),
            Err(ScheduleError::InstantOverflow {})
        );
        assert_eq!(draft.bound_at(), None);
    }

    proptest! {
        #[test]
        fn assembled_schedules_are_ordered_and_mature_last(
            reference in 0u64..2_000_000_000,
            window_skew in 0u64..100,
            horizon_offset in 0u64..1_000,
            scope_durations in prop::collection::vec(1u64..200, 0..6),
            stake_durations in prop::collection::vec(1u64..200, 0..6),
        ) {
            let mut template = template();
            template.window_skew = window_skew;
            template.horizon_offset = horizon_offset;
            template.scope_rounds = scope_durations.iter().map(|d| scope(*d)).collect();
            template.stake_rounds = stake_durations.iter().map(|d| stake(*d)).collect();

            match assemble(&template, "app-token", reference) {
                Ok(campaign) => {
                    let token_funding = &campaign.token_funding;
                    for pair in token_funding.funding_scope_rounds_data.windows(2) {
                        prop_assert!(pair[0].opening_time <= pair[1].opening_time);
                        if window_skew > 0 {
                            prop_assert!(pair[0].opening_time < pair[1].opening_time);
                        }
                    }
                    for pair in token_funding.funding_stake_rounds_data.windows(2) {
                        prop_assert!(pair[0].opening_time <= pair[1].opening_time);
                        if window_skew > 0 {
                            prop_assert!(pair[0].opening_time < pair[1].opening_time);
                        }
                    }
                    if let Some(last_round_end) = token_funding.last_round_end() {
                        prop_assert!(token_funding.maturity >= last_round_end);
                    }
                    prop_assert_eq!(token_funding.maturity, reference + horizon_offset);
                    prop_assert_eq!(token_funding.t, token_funding.maturity);
                }
                Err(err) => prop_assert!(
                    matches!(
                        err,
                        ScheduleError::Campaign(CampaignError::MaturityBeforeRoundsEnd { .. })
                    ),
                    "unexpected error {:?}",
                    err
                ),
            }
        }
    }
}
