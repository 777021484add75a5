#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Api, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    WasmMsg,
};
use cw2::{get_contract_version, set_contract_version};
use launchpad::campaign::{validate_campaign, PriceOracleInfo, Round, TokenFundingData};
use launchpad::price_feed::{ExecuteMsg as PriceFeedExecuteMsg, PriceFeedQuerier};
use launchpad::withdraw_manager::ExecuteMsg as WithdrawExecuteMsg;
use launchpad::is_null_address;

use crate::error::ContractError;
use crate::msg::{
    CampaignResponse, ConfigResponse, CurrentScopeRoundResponse, CurrentStakeRoundResponse,
    ExecuteMsg, FundingStatus, InstantiateMsg, MigrateMsg, QueryMsg,
};
use crate::state::{Campaign, Config, CAMPAIGN, CONFIG, STATUS};

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = "funding-manager";
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rejects null addresses before validating them.
fn validate_dependency(api: &dyn Api, field: &str, addr: &str) -> Result<Addr, ContractError> {
    if is_null_address(addr) {
        return Err(ContractError::NullAddress {
            field: field.to_string(),
        });
    }
    Ok(api.addr_validate(addr)?)
}

/// Creates the funding manager with every dependency address in [`InstantiateMsg`].
/// The campaign stays unconfigured until [`ExecuteMsg::InitializeTokenFunding`].
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let api = deps.api;
    let config = Config {
        admin: info.sender,
        withdraw_manager: validate_dependency(api, "withdraw_manager", &msg.withdraw_manager)?,
        scope_token: validate_dependency(api, "scope_token", &msg.scope_token)?,
        stake_token: validate_dependency(api, "stake_token", &msg.stake_token)?,
        insurance: validate_dependency(api, "insurance", &msg.insurance)?,
        price_feed: validate_dependency(api, "price_feed", &msg.price_feed)?,
        project_info: validate_dependency(api, "project_info", &msg.project_info)?,
    };
    CONFIG.save(deps.storage, &config)?;
    STATUS.save(deps.storage, &FundingStatus::Unconfigured)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("withdraw_manager", config.withdraw_manager)
        .add_attribute("price_feed", config.price_feed))
}

/// Exposes all the execute functions available in the contract.
///
/// ## Execute messages
/// * **ExecuteMsg::InitializeTokenFunding { .. }** Submit the campaign schedule and oracle job.
///
/// * **ExecuteMsg::Withdraw { recipient, amount }** Disburse funds through the withdraw manager.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::InitializeTokenFunding {
            token_funding,
            price_oracle_info,
            node_fee_divisor,
        } => initialize_token_funding(
            deps,
            env,
            info,
            token_funding,
            price_oracle_info,
            node_fee_divisor,
        ),
        ExecuteMsg::Withdraw { recipient, amount } => withdraw(deps, info, recipient, amount),
    }
}

/// Stores the campaign and asks the price feed to serve the oracle job.
/// Only the admin may submit, and only once.
fn initialize_token_funding(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_funding: TokenFundingData,
    price_oracle_info: PriceOracleInfo,
    node_fee_divisor: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    if STATUS.load(deps.storage)? != FundingStatus::Unconfigured {
        return Err(ContractError::AlreadyScheduled {});
    }
    if node_fee_divisor == 0 {
        return Err(ContractError::InvalidNodeFeeDivisor {});
    }

    validate_campaign(&token_funding, &price_oracle_info)?;
    let fresh = token_funding
        .funding_scope_rounds_data
        .iter()
        .all(|round| round.filled().is_zero())
        && token_funding
            .funding_stake_rounds_data
            .iter()
            .all(|round| round.filled().is_zero());
    if !fresh {
        return Err(ContractError::CountersNotZero {});
    }

    let app_token = validate_dependency(deps.api, "app_token", &token_funding.app_token)?;
    let owners = token_funding
        .owners
        .iter()
        .map(|owner| deps.api.addr_validate(owner))
        .collect::<StdResult<Vec<Addr>>>()?;

    let request_rate = WasmMsg::Execute {
        contract_addr: config.price_feed.to_string(),
        msg: to_binary(&PriceFeedExecuteMsg::RequestRate {
            oracle: price_oracle_info.clone(),
            node_fee_divisor,
        })?,
        funds: vec![],
    };

    let response = Response::new()
        .add_message(request_rate)
        .add_attribute("action", "initialize_token_funding")
        .add_attribute("app_token", &app_token)
        .add_attribute(
            "scope_rounds",
            token_funding.funding_scope_rounds_data.len().to_string(),
        )
        .add_attribute(
            "stake_rounds",
            token_funding.funding_stake_rounds_data.len().to_string(),
        )
        .add_attribute("maturity", token_funding.maturity.to_string())
        .add_attribute("scheduled_at", env.block.time.seconds().to_string());

    CAMPAIGN.save(
        deps.storage,
        &Campaign {
            token_funding,
            price_oracle_info,
            node_fee_divisor,
            app_token,
            owners,
        },
    )?;
    STATUS.save(deps.storage, &FundingStatus::Scheduled)?;

    Ok(response)
}

/// Forwards a disbursement to the withdraw manager. Campaign owners only.
fn withdraw(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Vec<Coin>,
) -> Result<Response, ContractError> {
    let campaign = CAMPAIGN
        .may_load(deps.storage)?
        .ok_or(ContractError::NotScheduled {})?;
    if !campaign.owners.contains(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }
    let config = CONFIG.load(deps.storage)?;

    let withdraw = WasmMsg::Execute {
        contract_addr: config.withdraw_manager.to_string(),
        msg: to_binary(&WithdrawExecuteMsg::Withdraw {
            recipient: recipient.clone(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(withdraw)
        .add_attribute("action", "withdraw")
        .add_attribute("recipient", recipient))
}

/// Expose available contract queries.
///
/// ## Queries
/// * **QueryMsg::Config {}** Dependency addresses.
///
/// * **QueryMsg::Status {}** Whether the campaign was submitted.
///
/// * **QueryMsg::Campaign {}** The submitted campaign.
///
/// * **QueryMsg::CurrentScopeRound {}** / **QueryMsg::CurrentStakeRound {}** Round open at the
/// current block time.
///
/// * **QueryMsg::ExchangeRate {}** Latest rate of the price feed.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::Status {} => to_binary(&STATUS.load(deps.storage)?),
        QueryMsg::Campaign {} => {
            let campaign = CAMPAIGN.load(deps.storage)?;
            to_binary(&CampaignResponse {
                token_funding: campaign.token_funding,
                price_oracle_info: campaign.price_oracle_info,
                node_fee_divisor: campaign.node_fee_divisor,
            })
        }
        QueryMsg::CurrentScopeRound {} => {
            let now = env.block.time.seconds();
            let round = CAMPAIGN.may_load(deps.storage)?.and_then(|campaign| {
                campaign
                    .token_funding
                    .current_scope_round(now)
                    .map(|(index, round)| CurrentScopeRoundResponse {
                        index: index as u64,
                        round: round.clone(),
                    })
            });
            to_binary(&round)
        }
        QueryMsg::CurrentStakeRound {} => {
            let now = env.block.time.seconds();
            let round = CAMPAIGN.may_load(deps.storage)?.and_then(|campaign| {
                campaign
                    .token_funding
                    .current_stake_round(now)
                    .map(|(index, round)| CurrentStakeRoundResponse {
                        index: index as u64,
                        round: round.clone(),
                    })
            });
            to_binary(&round)
        }
        QueryMsg::ExchangeRate {} => {
            let config = CONFIG.load(deps.storage)?;
            let feed = PriceFeedQuerier::new(&deps.querier, &config.price_feed);
            to_binary(&feed.latest_rate()?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin.into_string(),
        withdraw_manager: config.withdraw_manager.into_string(),
        scope_token: config.scope_token.into_string(),
        stake_token: config.stake_token.into_string(),
        insurance: config.insurance.into_string(),
        price_feed: config.price_feed.into_string(),
        project_info: config.project_info.into_string(),
    })
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

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{coins, from_binary, CosmosMsg, OwnedDeps, Uint128};
    use launchpad::campaign::{ScopeRound, StakeRound};
    use launchpad::CampaignError;

    use super::*;

    fn instantiate_msg() -> InstantiateMsg {
        InstantiateMsg {
            withdraw_manager: "withdraw-manager".to_string(),
            scope_token: "scope-token".to_string(),
            stake_token: "stake-token".to_string(),
            insurance: "insurance".to_string(),
            price_feed: "price-feed".to_string(),
            project_info: "project-info".to_string(),
        }
    }

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("deployer", &[]),
            instantiate_msg(),
        )
        .unwrap();
        deps
    }

    /// One round per track opening at the mock block time.
    fn submission(now: u64) -> ExecuteMsg {
        ExecuteMsg::InitializeTokenFunding {
            token_funding: TokenFundingData {
                app_token: "app-token".to_string(),
                r_min: 5000,
                r_max: 15000,
                maturity: now + 60,
                t: now + 60,
                owners: vec!["owner".to_string()],
                funding_scope_rounds_data: vec![ScopeRound {
                    opening_time: now,
                    duration_time: 30,
                    discount: 50,
                    cap_tokens_to_be_sold: Uint128::new(1000),
                    minted_tokens: Uint128::zero(),
                }],
                funding_stake_rounds_data: vec![StakeRound {
                    opening_time: now,
                    duration_time: 30,
                    stake_reward: 50,
                    cap_tokens_to_be_staked: Uint128::new(1000),
                    staked_tokens: Uint128::zero(),
                }],
            },
            price_oracle_info: PriceOracleInfo {
                app_token: "app-token".to_string(),
                feed_token: "link-token".to_string(),
                feed_node: "oracle-node".to_string(),
                job_id: "3b7ca0d48c7a4b2da9268456665d11ae".to_string(),
                node_fee: Uint128::zero(),
            },
            node_fee_divisor: 1000,
        }
    }

    #[test]
    fn instantiate_rejects_null_dependency() {
        let mut deps = mock_dependencies();
        let mut msg = instantiate_msg();
        msg.insurance = String::new();
        let err = instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::NullAddress {
                field: "insurance".to_string()
            }
        );
    }

    #[test]
    fn instantiate_records_dependencies() {
        let deps = setup();
        let config: ConfigResponse =
            from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
        assert_eq!(config.admin, "deployer");
        assert_eq!(config.withdraw_manager, "withdraw-manager");
        assert_eq!(config.price_feed, "price-feed");

        let status: FundingStatus =
            from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::Status {}).unwrap()).unwrap();
        assert_eq!(status, FundingStatus::Unconfigured);
    }

    #[test]
    fn campaign_submission_schedules_once() {
        let mut deps = setup();
        let env = mock_env();
        let now = env.block.time.seconds();

        let err = execute(
            deps.as_mut(),
            env.clone(),
            mock_info("owner", &[]),
            submission(now),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});

        let res = execute(
            deps.as_mut(),
            env.clone(),
            mock_info("deployer", &[]),
            submission(now),
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, .. }) => {
                assert_eq!(contract_addr, "price-feed")
            }
            other => panic!("unexpected message {:?}", other),
        }

        let status: FundingStatus =
            from_binary(&query(deps.as_ref(), env.clone(), QueryMsg::Status {}).unwrap()).unwrap();
        assert_eq!(status, FundingStatus::Scheduled);

        let err = execute(
            deps.as_mut(),
            env,
            mock_info("deployer", &[]),
            submission(now),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::AlreadyScheduled {});
    }

    #[test]
    fn submission_is_validated() {
        let mut deps = setup();
        let now = mock_env().block.time.seconds();

        let mut msg = submission(now);
        if let ExecuteMsg::InitializeTokenFunding {
            price_oracle_info, ..
        } = &mut msg
        {
            price_oracle_info.app_token = "other-token".to_string();
        }
        let err = execute(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg)
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::Campaign(CampaignError::AppTokenMismatch { .. })
        ));

        let mut msg = submission(now);
        if let ExecuteMsg::InitializeTokenFunding {
            token_funding, ..
        } = &mut msg
        {
            token_funding.funding_scope_rounds_data[0].minted_tokens = Uint128::new(1);
        }
        let err = execute(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::CountersNotZero {});

        let mut msg = submission(now);
        if let ExecuteMsg::InitializeTokenFunding {
            node_fee_divisor, ..
        } = &mut msg
        {
            *node_fee_divisor = 0;
        }
        let err = execute(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidNodeFeeDivisor {});
    }

    #[test]
    fn current_rounds_follow_block_time() {
        let mut deps = setup();
        let mut env = mock_env();
        let now = env.block.time.seconds();
        execute(
            deps.as_mut(),
            env.clone(),
            mock_info("deployer", &[]),
            submission(now),
        )
        .unwrap();

        let round: Option<CurrentScopeRoundResponse> = from_binary(
            &query(deps.as_ref(), env.clone(), QueryMsg::CurrentScopeRound {}).unwrap(),
        )
        .unwrap();
        assert_eq!(round.map(|r| r.index), Some(0));

        env.block.time = env.block.time.plus_seconds(30);
        let round: Option<CurrentStakeRoundResponse> = from_binary(
            &query(deps.as_ref(), env, QueryMsg::CurrentStakeRound {}).unwrap(),
        )
        .unwrap();
        assert_eq!(round, None);
    }

    #[test]
    fn owners_withdraw_through_withdraw_manager() {
        let mut deps = setup();
        let env = mock_env();

        let err = execute(
            deps.as_mut(),
            env.clone(),
            mock_info("owner", &[]),
            ExecuteMsg::Withdraw {
                recipient: "user".to_string(),
                amount: coins(10, "uside"),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotScheduled {});

        execute(
            deps.as_mut(),
            env.clone(),
            mock_info("deployer", &[]),
            submission(env.block.time.seconds()),
        )
        .unwrap();

        let err = execute(
            deps.as_mut(),
            env.clone(),
            mock_info("stranger", &[]),
            ExecuteMsg::Withdraw {
                recipient: "user".to_string(),
                amount: coins(10, "uside"),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});

        let res = execute(
            deps.as_mut(),
            env,
            mock_info("owner", &[]),
            ExecuteMsg::Withdraw {
                recipient: "user".to_string(),
                amount: coins(10, "uside"),
            },
        )
        .unwrap();
        assert_eq!(
            res.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: "withdraw-manager".to_string(),
                msg: to_binary(&WithdrawExecuteMsg::Withdraw {
                    recipient: "user".to_string(),
                    amount: coins(10, "uside"),
                })
                .unwrap(),
                funds: vec![],
            })
        );
    }

    #[test]
    fn migration_requires_an_older_version() {
        let mut deps = mock_dependencies();
        set_contract_version(deps.as_mut().storage, CONTRACT_NAME, CONTRACT_VERSION).unwrap();
        let err = migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap_err();
        assert_eq!(
            err,
            ContractError::MigrationError {
                contract: CONTRACT_NAME.to_string(),
                version: CONTRACT_VERSION.to_string(),
            }
        );

        set_contract_version(deps.as_mut().storage, CONTRACT_NAME, "0.0.1").unwrap();
        migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
    }
}
