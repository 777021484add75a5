use thiserror::Error;

/// Reasons a campaign configuration is rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CampaignError {
    #[error("App token is not bound")]
    AppTokenUnbound {},

    #[error("App token mismatch: campaign uses {campaign}, oracle uses {oracle}")]
    AppTokenMismatch { campaign: String, oracle: String },

    #[error("Rate bounds are inverted: r_min {r_min} > r_max {r_max}")]
    InvertedRateBounds { r_min: u64, r_max: u64 },

    #[error("Campaign must have at least one owner")]
    NoOwners {},

    #[error("Owner {owner} is listed more than once")]
    DuplicateOwner { owner: String },

    #[error("{track} round {index} has a zero duration")]
    ZeroDuration { track: String, index: usize },

    #[error("{track} round {index} opens before the previous round")]
    UnorderedRounds { track: String, index: usize },

    #[error("{track} round {index} counter exceeds its cap")]
    CounterAboveCap { track: String, index: usize },

    #[error("Maturity {maturity} is before the last round ends at {last_round_end}")]
    MaturityBeforeRoundsEnd { maturity: u64, last_round_end: u64 },
}
