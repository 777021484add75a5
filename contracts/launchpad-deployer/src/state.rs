use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use crate::environment::{Environment, PriceFeedVariant};
use crate::error::ContractError;
use crate::schedule::CampaignTemplate;

/// Stored code ids of every contract the deployer instantiates.
#[cw_serde]
pub struct CodeIds {
    pub scope_token: u64,
    pub stake_token: u64,
    pub insurance: u64,
    pub project_info: u64,
    pub withdraw_manager: u64,
    pub funding_manager: u64,
    /// Production price feed
    pub price_oracle: u64,
    /// Substitute price feed for development environments
    pub price_oracle_mock: u64,
}

/// This structure stores the main parameters of the deployer.
#[cw_serde]
pub struct Config {
    /// Operator driving the bring-up
    pub admin: Addr,
    pub environment: Environment,
    pub code_ids: CodeIds,
    pub template: CampaignTemplate,
}

/// Progress of the bring-up. Every step only runs from the phase before it.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Phase {
    Fresh,
    LeavesDeployed,
    ManagerDeployed,
    Linked,
    CampaignScheduled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::Fresh => "fresh",
            Phase::LeavesDeployed => "leaves_deployed",
            Phase::ManagerDeployed => "manager_deployed",
            Phase::Linked => "linked",
            Phase::CampaignScheduled => "campaign_scheduled",
        };
        f.write_str(phase)
    }
}

/// Contracts instantiated by the deployer.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Component {
    ScopeToken,
    StakeToken,
    Insurance,
    ProjectInfo,
    PriceFeed,
    WithdrawManager,
    FundingManager,
}

impl Component {
    /// Components without dependencies, instantiated together by `DeployLeaves`.
    /// The withdraw manager is among them, it starts unlinked.
    pub const LEAVES: [Component; 6] = [
        Component::ScopeToken,
        Component::StakeToken,
        Component::Insurance,
        Component::ProjectInfo,
        Component::PriceFeed,
        Component::WithdrawManager,
    ];

    pub fn reply_id(self) -> u64 {
        match self {
            Component::ScopeToken => 1,
            Component::StakeToken => 2,
            Component::Insurance => 3,
            Component::ProjectInfo => 4,
            Component::PriceFeed => 5,
            Component::WithdrawManager => 6,
            Component::FundingManager => 7,
        }
    }

    pub fn from_reply_id(id: u64) -> Option<Component> {
        Component::LEAVES
            .into_iter()
            .chain([Component::FundingManager])
            .find(|component| component.reply_id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Component::ScopeToken => "scope_token",
            Component::StakeToken => "stake_token",
            Component::Insurance => "insurance",
            Component::ProjectInfo => "project_info",
            Component::PriceFeed => "price_feed",
            Component::WithdrawManager => "withdraw_manager",
            Component::FundingManager => "funding_manager",
        }
    }

    pub fn code_id(self, code_ids: &CodeIds, price_feed: PriceFeedVariant) -> u64 {
        match self {
            Component::ScopeToken => code_ids.scope_token,
            Component::StakeToken => code_ids.stake_token,
            Component::Insurance => code_ids.insurance,
            Component::ProjectInfo => code_ids.project_info,
            Component::PriceFeed => price_feed.code_id(code_ids),
            Component::WithdrawManager => code_ids.withdraw_manager,
            Component::FundingManager => code_ids.funding_manager,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addresses captured from instantiate replies.
#[cw_serde]
#[derive(Default)]
pub struct Deployment {
    pub price_feed_variant: Option<PriceFeedVariant>,
    pub scope_token: Option<Addr>,
    pub stake_token: Option<Addr>,
    pub insurance: Option<Addr>,
    pub project_info: Option<Addr>,
    pub price_feed: Option<Addr>,
    pub withdraw_manager: Option<Addr>,
    pub funding_manager: Option<Addr>,
}

impl Deployment {
    fn slot(&mut self, component: Component) -> &mut Option<Addr> {
        match component {
            Component::ScopeToken => &mut self.scope_token,
            Component::StakeToken => &mut self.stake_token,
            Component::Insurance => &mut self.insurance,
            Component::ProjectInfo => &mut self.project_info,
            Component::PriceFeed => &mut self.price_feed,
            Component::WithdrawManager => &mut self.withdraw_manager,
            Component::FundingManager => &mut self.funding_manager,
        }
    }

    pub fn get(&self, component: Component) -> Option<&Addr> {
        match component {
            Component::ScopeToken => self.scope_token.as_ref(),
            Component::StakeToken => self.stake_token.as_ref(),
            Component::Insurance => self.insurance.as_ref(),
            Component::ProjectInfo => self.project_info.as_ref(),
            Component::PriceFeed => self.price_feed.as_ref(),
            Component::WithdrawManager => self.withdraw_manager.as_ref(),
            Component::FundingManager => self.funding_manager.as_ref(),
        }
    }

    /// Records an address once. A component is never re-pointed.
    pub fn record(&mut self, component: Component, addr: Addr) -> Result<(), ContractError> {
        let slot = self.slot(component);
        if slot.is_some() {
            return Err(ContractError::DuplicateComponent { component });
        }
        *slot = Some(addr);
        Ok(())
    }

    pub fn require(&self, component: Component) -> Result<Addr, ContractError> {
        self.get(component)
            .cloned()
            .ok_or(ContractError::MissingDependency { component })
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const PHASE: Item<Phase> = Item::new("phase");

pub const DEPLOYMENT: Item<Deployment> = Item::new("deployment");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_ids_round_trip() {
        for component in Component::LEAVES
            .into_iter()
            .chain([Component::FundingManager])
        {
            assert_eq!(Component::from_reply_id(component.reply_id()), Some(component));
        }
        assert_eq!(Component::from_reply_id(0), None);
        assert_eq!(Component::from_reply_id(8), None);
    }

    #[test]
    fn components_are_recorded_once() {
        let mut deployment = Deployment::default();
        assert_eq!(
            deployment.require(Component::Insurance),
            Err(ContractError::MissingDependency {
                component: Component::Insurance
            })
        );

        deployment
            .record(Component::Insurance, Addr::unchecked("insurance"))
            .unwrap();
        assert_eq!(
            deployment.record(Component::Insurance, Addr::unchecked("other")),
            Err(ContractError::DuplicateComponent {
                component: Component::Insurance
            })
        );
        assert_eq!(
            deployment.require(Component::Insurance),
            Ok(Addr::unchecked("insurance"))
        );
    }
}
