use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::environment::Environment;
use crate::schedule::{AssembledCampaign, CampaignTemplate};
use crate::state::{CodeIds, Deployment, Phase};

/// This structure describes the parameters used for creating a deployer.
#[cw_serde]
pub struct InstantiateMsg {
    /// One of `development`, `local`, `testnet`, `mainnet`
    pub environment: String,
    pub code_ids: CodeIds,
    pub template: CampaignTemplate,
}

/// This structure describes the execute functions in the contract.
///
/// ## Execute messages
/// * **DeployLeaves {}** Instantiates the tokens, insurance, project info, price feed and withdraw manager.
///
/// * **DeployFundingManager {}** Instantiates the funding manager links the withdraw manager to it and registers it
/// as the price feed's requester.
///
/// * **LaunchCampaign { app_token }** Assembles the campaign at the current block time and submits it.
#[cw_serde]
pub enum ExecuteMsg {
    DeployLeaves {},
    DeployFundingManager {},
    LaunchCampaign { app_token: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(DeploymentResponse)]
    Deployment {},
    /// Campaign that `LaunchCampaign` would submit. Defaults to the current block time.
    #[returns(AssembledCampaign)]
    PreviewCampaign {
        app_token: String,
        reference_instant: Option<u64>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub environment: Environment,
    pub code_ids: CodeIds,
    pub template: CampaignTemplate,
}

#[cw_serde]
pub struct DeploymentResponse {
    pub phase: Phase,
    pub deployment: Deployment,
}

#[cw_serde]
pub struct MigrateMsg {}
