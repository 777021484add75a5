use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use crate::msg::LinkStatus;

#[cw_serde]
pub struct Config {
    /// Address that instantiated the contract and is allowed to link it
    pub admin: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Funding manager link, `Unlinked` until `Initialize` succeeds
pub const LINK: Item<LinkStatus> = Item::new("link");
