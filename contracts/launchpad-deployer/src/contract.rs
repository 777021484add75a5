#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::environment::Environment;
use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, DeploymentResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg,
};
use crate::schedule::{assemble, AssembledCampaign};
use crate::sequencer::{deploy_funding_manager, deploy_leaves, launch_campaign, record_instance};
use crate::state::{Component, Config, Deployment, Phase, CONFIG, DEPLOYMENT, PHASE};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = "launchpad-deployer";
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the deployer. The environment tag, the code ids of every component the
/// environment needs and the campaign template are checked before anything is stored.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let environment: Environment = msg.environment.parse()?;
    let price_feed = environment.price_feed();
    for component in Component::LEAVES
        .into_iter()
        .chain([Component::FundingManager])
    {
        if component.code_id(&msg.code_ids, price_feed) == 0 {
            return Err(ContractError::MissingCodeId {
                component: component.to_string(),
            });
        }
    }
    // dry run against the current block with a placeholder token
    assemble(
        &msg.template,
        env.contract.address.as_str(),
        env.block.time.seconds(),
    )?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(
        deps.storage,
        &Config {
            admin: info.sender,
            environment,
            code_ids: msg.code_ids,
            template: msg.template,
        },
    )?;
    PHASE.save(deps.storage, &Phase::Fresh)?;
    DEPLOYMENT.save(deps.storage, &Deployment::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("environment", environment.as_str())
        .add_attribute("price_feed_variant", price_feed.as_str()))
}

/// Exposes all the execute functions available in the contract. Admin only.
///
/// ## Execute messages
/// * **ExecuteMsg::DeployLeaves {}** Instantiates every component without dependencies.
///
/// * **ExecuteMsg::DeployFundingManager {}** Instantiates the funding manager, then links it.
///
/// * **ExecuteMsg::LaunchCampaign { app_token }** Submits the campaign schedule.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }

    match msg {
        ExecuteMsg::DeployLeaves {} => deploy_leaves(deps),
        ExecuteMsg::DeployFundingManager {} => deploy_funding_manager(deps),
        ExecuteMsg::LaunchCampaign { app_token } => launch_campaign(deps, env, app_token),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, reply: Reply) -> Result<Response, ContractError> {
    match Component::from_reply_id(reply.id) {
        Some(component) => record_instance(deps, component, reply),
        None => Err(ContractError::UnknownReplyId { id: reply.id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::Deployment {} => to_binary(&DeploymentResponse {
            phase: PHASE.load(deps.storage)?,
            deployment: DEPLOYMENT.load(deps.storage)?,
        }),
        QueryMsg::PreviewCampaign {
            app_token,
            reference_instant,
        } => to_binary(&preview_campaign(deps, env, app_token, reference_instant)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin.into_string(),
        environment: config.environment,
        code_ids: config.code_ids,
        template: config.template,
    })
}

fn preview_campaign(
    deps: Deps,
    env: Env,
    app_token: String,
    reference_instant: Option<u64>,
) -> StdResult<AssembledCampaign> {
    let config = CONFIG.load(deps.storage)?;
    let reference_instant = reference_instant.unwrap_or_else(|| env.block.time.seconds());
    assemble(&config.template, &app_token, reference_instant)
        .map_err(|err| StdError::generic_err(err.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let version = get_contract_version(deps.storage)?;
    if version.contract != CONTRACT_NAME || version.version.as_str() >= CONTRACT_VERSION {
        return Err(ContractError::MigrationError {
            contract: version.contract,
            version: version.version,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
