pub use launchpad::funding_manager::{
    CampaignResponse, ConfigResponse, CurrentScopeRoundResponse, CurrentStakeRoundResponse,
    ExecuteMsg, FundingStatus, InstantiateMsg, MigrateMsg, QueryMsg,
};
