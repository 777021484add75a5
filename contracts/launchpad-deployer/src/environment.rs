use std::fmt;
use std::str::FromStr;

use cosmwasm_schema::cw_serde;

use crate::error::ContractError;
use crate::state::CodeIds;

/// Deployment targets the deployer knows about.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Environment {
    Development,
    Local,
    Testnet,
    Mainnet,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Local,
        Environment::Testnet,
        Environment::Mainnet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Local => "local",
            Environment::Testnet => "testnet",
            Environment::Mainnet => "mainnet",
        }
    }

    /// Development-class environments have no oracle network to talk to.
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development | Environment::Local)
    }

    pub fn price_feed(self) -> PriceFeedVariant {
        if self.is_development() {
            PriceFeedVariant::Mock
        } else {
            PriceFeedVariant::Oracle
        }
    }
}

impl FromStr for Environment {
    type Err = ContractError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|environment| environment.as_str() == tag)
            .ok_or_else(|| ContractError::UnknownEnvironment {
                tag: tag.to_string(),
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price feed implementations. Exactly one is instantiated per deployment.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum PriceFeedVariant {
    /// Production feed served by an oracle node
    Oracle,
    /// Substitute feed serving a fixed rate
    Mock,
}

impl PriceFeedVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceFeedVariant::Oracle => "oracle",
            PriceFeedVariant::Mock => "mock",
        }
    }

    pub fn code_id(self, code_ids: &CodeIds) -> u64 {
        match self {
            PriceFeedVariant::Oracle => code_ids.price_oracle,
            PriceFeedVariant::Mock => code_ids.price_oracle_mock,
        }
    }
}

/// Maps an environment tag to the price feed that must be deployed for it.
pub fn select_price_feed(tag: &str) -> Result<PriceFeedVariant, ContractError> {
    Ok(tag.parse::<Environment>()?.price_feed())
}
