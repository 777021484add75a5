pub mod campaign;
mod error;
pub mod funding_manager;
pub mod price_feed;
pub mod withdraw_manager;

pub use crate::error::CampaignError;

/// Returns true when an address string is the null address (empty or blank).
pub fn is_null_address(addr: &str) -> bool {
    addr.trim().is_empty()
}
