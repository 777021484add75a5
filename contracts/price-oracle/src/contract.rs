#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Decimal, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};
use launchpad::campaign::PriceOracleInfo;
use launchpad::is_null_address;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, RateRequest, RateResponse};
use crate::state::{Config, CONFIG, LATEST_RATE, REQUEST, REQUESTER};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = "price-oracle";
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &Config { admin: info.sender })?;
    LATEST_RATE.save(deps.storage, &RateResponse::default())?;
    Ok(Response::new().add_attribute("action", "instantiate"))
}

/// ## Execute messages
/// * **ExecuteMsg::RegisterRequester { requester }** Admin only. Names the one address that
/// may register the oracle job.
///
/// * **ExecuteMsg::RequestRate { oracle, node_fee_divisor }** Register the oracle job. The
/// oracle node picks it up from the emitted attributes.
///
/// * **ExecuteMsg::Fulfill { rate }** Answer from the registered oracle node.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterRequester { requester } => register_requester(deps, info, requester),
        ExecuteMsg::RequestRate {
            oracle,
            node_fee_divisor,
        } => request_rate(deps, env, info, oracle, node_fee_divisor),
        ExecuteMsg::Fulfill { rate } => fulfill(deps, env, info, rate),
    }
}

fn register_requester(
    deps: DepsMut,
    info: MessageInfo,
    requester: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    if let Some(registered) = REQUESTER.may_load(deps.storage)? {
        return Err(ContractError::RequesterAlreadyRegistered {
            requester: registered.into_string(),
        });
    }
    if is_null_address(&requester) {
        return Err(ContractError::NullAddress {
            field: "requester".to_string(),
        });
    }
    let requester = deps.api.addr_validate(&requester)?;
    REQUESTER.save(deps.storage, &requester)?;

    Ok(Response::new()
        .add_attribute("action", "register_requester")
        .add_attribute("requester", requester))
}

fn request_rate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    oracle: PriceOracleInfo,
    node_fee_divisor: u64,
) -> Result<Response, ContractError> {
    if REQUESTER.may_load(deps.storage)?.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }
    if let Some(request) = REQUEST.may_load(deps.storage)? {
        return Err(ContractError::AlreadyRequested {
            requester: request.requester.into_string(),
        });
    }
    if node_fee_divisor == 0 {
        return Err(ContractError::InvalidNodeFeeDivisor {});
    }
    for (field, addr) in [
        ("feed_node", &oracle.feed_node),
        ("feed_token", &oracle.feed_token),
    ] {
        if is_null_address(addr) {
            return Err(ContractError::NullAddress {
                field: field.to_string(),
            });
        }
        deps.api.addr_validate(addr)?;
    }

    let fee = oracle.fee(node_fee_divisor)?;
    let response = Response::new()
        .add_attribute("action", "request_rate")
        .add_attribute("requester", &info.sender)
        .add_attribute("feed_node", &oracle.feed_node)
        .add_attribute("feed_token", &oracle.feed_token)
        .add_attribute("job_id", &oracle.job_id)
        .add_attribute("fee", fee.to_string());

    REQUEST.save(
        deps.storage,
        &RateRequest {
            requester: info.sender,
            oracle,
            fee,
            requested_at: env.block.time.seconds(),
        },
    )?;

    Ok(response)
}

fn fulfill(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    rate: Decimal,
) -> Result<Response, ContractError> {
    let request = REQUEST
        .may_load(deps.storage)?
        .ok_or(ContractError::NoRequest {})?;
    if info.sender.as_str() != request.oracle.feed_node {
        return Err(ContractError::Unauthorized {});
    }
    if rate.is_zero() {
        return Err(ContractError::InvalidRate {});
    }

    LATEST_RATE.save(
        deps.storage,
        &RateResponse {
            rate: Some(rate),
            updated_at: Some(env.block.time.seconds()),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "fulfill")
        .add_attribute("rate", rate.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::LatestRate {} => to_binary(&LATEST_RATE.load(deps.storage)?),
        QueryMsg::Request {} => to_binary(&REQUEST.may_load(deps.storage)?),
    }
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
