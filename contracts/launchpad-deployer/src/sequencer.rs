use cosmwasm_std::{
    to_binary, Addr, Binary, DepsMut, Empty, Env, Reply, Response, Storage, SubMsg, WasmMsg,
};
use cw_utils::parse_reply_instantiate_data;
use launchpad::{funding_manager, is_null_address, price_feed, withdraw_manager};

use crate::environment::PriceFeedVariant;
use crate::error::{ContractError, ScheduleError};
use crate::schedule::assemble;
use crate::state::{Component, Config, Deployment, Phase, CONFIG, DEPLOYMENT, PHASE};

/// Fails unless the bring-up is exactly at `expected`.
pub fn ensure_phase(storage: &dyn Storage, expected: Phase) -> Result<(), ContractError> {
    let actual = PHASE.load(storage)?;
    if actual == expected {
        return Ok(());
    }
    if expected == Phase::Fresh {
        return Err(ContractError::AlreadyDeployed { phase: actual });
    }
    Err(ContractError::OrderingViolation { expected, actual })
}

fn instantiate_component(
    config: &Config,
    component: Component,
    price_feed: PriceFeedVariant,
    msg: Binary,
) -> Result<SubMsg, ContractError> {
    let code_id = component.code_id(&config.code_ids, price_feed);
    if code_id == 0 {
        return Err(ContractError::MissingCodeId {
            component: component.to_string(),
        });
    }
    Ok(SubMsg::reply_on_success(
        WasmMsg::Instantiate {
            admin: Some(config.admin.to_string()),
            code_id,
            msg,
            funds: vec![],
            label: format!("launchpad {}", component),
        },
        component.reply_id(),
    ))
}

/// Instantiates every component without dependencies, including the price feed picked for
/// the configured environment and the unlinked withdraw manager.
pub fn deploy_leaves(deps: DepsMut) -> Result<Response, ContractError> {
    ensure_phase(deps.storage, Phase::Fresh)?;
    let config = CONFIG.load(deps.storage)?;
    let price_feed = config.environment.price_feed();

    let empty = to_binary(&Empty {})?;
    let messages = Component::LEAVES
        .into_iter()
        .map(|component| instantiate_component(&config, component, price_feed, empty.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    DEPLOYMENT.save(
        deps.storage,
        &Deployment {
            price_feed_variant: Some(price_feed),
            ..Deployment::default()
        },
    )?;
    PHASE.save(deps.storage, &Phase::LeavesDeployed)?;

    Ok(Response::new()
        .add_submessages(messages)
        .add_attribute("action", "deploy_leaves")
        .add_attribute("environment", config.environment.as_str())
        .add_attribute("price_feed_variant", price_feed.as_str()))
}

/// Instantiates the funding manager with the address of every recorded leaf.
pub fn deploy_funding_manager(deps: DepsMut) -> Result<Response, ContractError> {
    ensure_phase(deps.storage, Phase::LeavesDeployed)?;
    let config = CONFIG.load(deps.storage)?;
    let deployment = DEPLOYMENT.load(deps.storage)?;
    let price_feed = deployment
        .price_feed_variant
        .unwrap_or_else(|| config.environment.price_feed());

    let msg = funding_manager::InstantiateMsg {
        withdraw_manager: deployment
            .require(Component::WithdrawManager)?
            .into_string(),
        scope_token: deployment.require(Component::ScopeToken)?.into_string(),
        stake_token: deployment.require(Component::StakeToken)?.into_string(),
        insurance: deployment.require(Component::Insurance)?.into_string(),
        price_feed: deployment.require(Component::PriceFeed)?.into_string(),
        project_info: deployment.require(Component::ProjectInfo)?.into_string(),
    };
    let message = instantiate_component(
        &config,
        Component::FundingManager,
        price_feed,
        to_binary(&msg)?,
    )?;

    Ok(Response::new()
        .add_submessage(message)
        .add_attribute("action", "deploy_funding_manager"))
}

/// Records the address carried by an instantiate reply. The funding manager reply also
/// links the withdraw manager and registers the funding manager on the price feed, inside
/// the same transaction.
pub fn record_instance(
    deps: DepsMut,
    component: Component,
    reply: Reply,
) -> Result<Response, ContractError> {
    let instance = parse_reply_instantiate_data(reply)?;
    let addr = deps.api.addr_validate(&instance.contract_address)?;

    let mut deployment = DEPLOYMENT.load(deps.storage)?;
    deployment.record(component, addr.clone())?;
    DEPLOYMENT.save(deps.storage, &deployment)?;

    let response = Response::new()
        .add_attribute("action", "record_instance")
        .add_attribute("component", component.as_str())
        .add_attribute("address", addr);

    if component != Component::FundingManager {
        return Ok(response);
    }

    PHASE.save(deps.storage, &Phase::ManagerDeployed)?;
    let link = finalize_link(deps.storage, &deployment)?;
    let register = register_requester(&deployment)?;
    Ok(response
        .add_message(link)
        .add_message(register)
        .add_attribute("phase", Phase::Linked.to_string()))
}

/// Names the funding manager as the only address the price feed takes oracle jobs from.
fn register_requester(deployment: &Deployment) -> Result<WasmMsg, ContractError> {
    let feed = deployment.require(Component::PriceFeed)?;
    let funding_manager = deployment.require(Component::FundingManager)?;
    Ok(WasmMsg::Execute {
        contract_addr: feed.into_string(),
        msg: to_binary(&price_feed::ExecuteMsg::RegisterRequester {
            requester: funding_manager.into_string(),
        })?,
        funds: vec![],
    })
}

/// One-shot link of the withdraw manager to the funding manager.
pub fn finalize_link(
    storage: &mut dyn Storage,
    deployment: &Deployment,
) -> Result<WasmMsg, ContractError> {
    ensure_phase(storage, Phase::ManagerDeployed)?;
    let withdraw_manager = deployment.require(Component::WithdrawManager)?;
    let funding_manager = deployment.require(Component::FundingManager)?;

    PHASE.save(storage, &Phase::Linked)?;
    Ok(WasmMsg::Execute {
        contract_addr: withdraw_manager.into_string(),
        msg: to_binary(&withdraw_manager::ExecuteMsg::Initialize {
            manager: funding_manager.into_string(),
        })?,
        funds: vec![],
    })
}

/// Assembles the campaign against the current block time and submits it to the funding manager.
pub fn launch_campaign(
    deps: DepsMut,
    env: Env,
    app_token: String,
) -> Result<Response, ContractError> {
    ensure_phase(deps.storage, Phase::Linked)?;
    if is_null_address(&app_token) {
        return Err(ScheduleError::NullAppToken {}.into());
    }
    let app_token: Addr = deps.api.addr_validate(&app_token)?;
    let config = CONFIG.load(deps.storage)?;
    let funding_manager = DEPLOYMENT
        .load(deps.storage)?
        .require(Component::FundingManager)?;

    let reference_instant = env.block.time.seconds();
    let campaign = assemble(&config.template, app_token.as_str(), reference_instant)?;
    let maturity = campaign.token_funding.maturity;
    let warnings = campaign.warnings;

    let submit = WasmMsg::Execute {
        contract_addr: funding_manager.into_string(),
        msg: to_binary(&funding_manager::ExecuteMsg::InitializeTokenFunding {
            token_funding: campaign.token_funding,
            price_oracle_info: campaign.price_oracle_info,
            node_fee_divisor: campaign.node_fee_divisor,
        })?,
        funds: vec![],
    };
    PHASE.save(deps.storage, &Phase::CampaignScheduled)?;

    Ok(Response::new()
        .add_message(submit)
        .add_attribute("action", "launch_campaign")
        .add_attribute("app_token", app_token)
        .add_attribute("reference_instant", reference_instant.to_string())
        .add_attribute("maturity", maturity.to_string())
        .add_attributes(
            warnings
                .iter()
                .map(|warning| ("schedule_warning", warning.to_string())),
        ))
}
