#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};
use launchpad::funding_manager::{
    ConfigResponse as ManagerConfigResponse, QueryMsg as ManagerQueryMsg,
};
use launchpad::is_null_address;

use crate::error::ContractError;
use crate::msg::{ConfigResponse, ExecuteMsg, InstantiateMsg, LinkStatus, MigrateMsg, QueryMsg};
use crate::state::{Config, CONFIG, LINK};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = "withdraw-manager";
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the withdraw manager in the unlinked state. The instantiator becomes the admin
/// and is the only address allowed to link it.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(
        deps.storage,
        &Config {
            admin: info.sender.clone(),
        },
    )?;
    LINK.save(deps.storage, &LinkStatus::Unlinked)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", info.sender)
        .add_attribute("link_status", "unlinked"))
}

/// Exposes all the execute functions available in the contract.
///
/// ## Execute messages
/// * **ExecuteMsg::Initialize { manager }** Link the funding manager, once.
///
/// * **ExecuteMsg::Withdraw { recipient, amount }** Disburse funds on behalf of the linked manager.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Initialize { manager } => initialize(deps, env, info, manager),
        ExecuteMsg::Withdraw { recipient, amount } => withdraw(deps, info, recipient, amount),
    }
}

/// Completes the two-phase construction by recording the funding manager.
/// Rejected when a manager is already linked, whatever the arguments, and when the given
/// manager does not exist or was built against another withdraw manager.
fn initialize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    manager: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }

    if let LinkStatus::Linked { manager } = LINK.load(deps.storage)? {
        return Err(ContractError::AlreadyLinked {
            manager: manager.into_string(),
        });
    }

    if is_null_address(&manager) {
        return Err(ContractError::NullAddress {
            field: "manager".to_string(),
        });
    }
    let manager = deps.api.addr_validate(&manager)?;

    let manager_config: ManagerConfigResponse = deps
        .querier
        .query_wasm_smart(&manager, &ManagerQueryMsg::Config {})
        .map_err(|_| ContractError::ManagerNotDeployed {
            manager: manager.to_string(),
        })?;
    if manager_config.withdraw_manager != env.contract.address.as_str() {
        return Err(ContractError::ManagerMismatch {
            expected: env.contract.address.into_string(),
            actual: manager_config.withdraw_manager,
        });
    }

    LINK.save(
        deps.storage,
        &LinkStatus::Linked {
            manager: manager.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "initialize")
        .add_attribute("manager", manager))
}

/// Sends `amount` to `recipient`. Fails until the manager is linked.
fn withdraw(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Vec<Coin>,
) -> Result<Response, ContractError> {
    let link = LINK.load(deps.storage)?;
    let manager = link.manager().ok_or(ContractError::NotLinked {})?;
    if info.sender != *manager {
        return Err(ContractError::Unauthorized {});
    }

    let amount: Vec<Coin> = amount
        .into_iter()
        .filter(|coin| !coin.amount.is_zero())
        .collect();
    if amount.is_empty() {
        return Err(ContractError::EmptyWithdrawal {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount,
        })
        .add_attribute("action", "withdraw")
        .add_attribute("recipient", recipient))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_binary(&ConfigResponse {
                admin: config.admin.into_string(),
            })
        }
        QueryMsg::LinkStatus {} => to_binary(&LINK.load(deps.storage)?),
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
