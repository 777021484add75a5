pub use launchpad::withdraw_manager::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, LinkStatus, MigrateMsg, QueryMsg,
};
