#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Decimal, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, RateRequest, RateResponse};
use crate::state::{Config, CONFIG, LATEST_RATE, REQUEST, REQUESTER};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = "price-oracle-mock";
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Substitute price feed for development environments. Serves a fixed rate from
/// instantiation on, so nothing waits for an oracle node.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let rate = msg.rate.unwrap_or_else(Decimal::one);
    if rate.is_zero() {
        return Err(ContractError::InvalidRate {});
    }
    CONFIG.save(deps.storage, &Config { admin: info.sender })?;
    LATEST_RATE.save(
        deps.storage,
        &RateResponse {
            rate: Some(rate),
            updated_at: Some(env.block.time.seconds()),
        },
    )?;
    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("rate", rate.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterRequester { requester } => {
            let config = CONFIG.load(deps.storage)?;
            if info.sender != config.admin {
                return Err(ContractError::Unauthorized {});
            }
            if let Some(registered) = REQUESTER.may_load(deps.storage)? {
                return Err(ContractError::RequesterAlreadyRegistered {
                    requester: registered.into_string(),
                });
            }
            let requester = deps.api.addr_validate(&requester)?;
            REQUESTER.save(deps.storage, &requester)?;
            Ok(Response::new()
                .add_attribute("action", "register_requester")
                .add_attribute("requester", requester))
        }
        // Recorded for inspection only, the mock never contacts a node
        ExecuteMsg::RequestRate {
            oracle,
            node_fee_divisor,
        } => {
            if REQUESTER.may_load(deps.storage)?.as_ref() != Some(&info.sender) {
                return Err(ContractError::Unauthorized {});
            }
            if node_fee_divisor == 0 {
                return Err(ContractError::InvalidNodeFeeDivisor {});
            }
            let fee = oracle.fee(node_fee_divisor)?;
            REQUEST.save(
                deps.storage,
                &RateRequest {
                    requester: info.sender,
                    oracle,
                    fee,
                    requested_at: env.block.time.seconds(),
                },
            )?;
            Ok(Response::new().add_attribute("action", "request_rate"))
        }
        ExecuteMsg::Fulfill { rate } => {
            let config = CONFIG.load(deps.storage)?;
            if info.sender != config.admin {
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
    }
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
