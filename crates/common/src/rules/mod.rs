//! Store-facing rule records, one shape per [`RuleCategory`].
//!
//! Field names follow the JSON already held in the configuration store
//! (camelCase), and every field has a default so sparse payloads decode.

mod authority;
mod degrade;
mod flow;
mod gateway;
mod param;
mod system;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data_id::RuleCategory;

pub use authority::{AuthorityRule, AUTHORITY_BLACK, AUTHORITY_WHITE};
pub use degrade::DegradeRule;
pub use flow::{ClusterConfig, FlowRule, GRADE_QPS, GRADE_THREAD};
pub use gateway::{
    ApiDefinition, ApiPathPredicateItem, GatewayFlowRule, GatewayParamFlowItem,
    RESOURCE_MODE_CUSTOM_API_NAME, RESOURCE_MODE_ROUTE_ID,
};
pub use param::{ParamFlowItem, ParamFlowRule};
pub use system::SystemRule;

pub const LIMIT_APP_DEFAULT: &str = "default";

/// A record type that can be synchronized with the store.
///
/// The associated category fixes the data id suffix and the miss policy, so
/// the client only needs the type to know how to fetch and publish it.
pub trait SyncRule: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const CATEGORY: RuleCategory;

    /// Resource (or API group) name the rule applies to.
    fn resource(&self) -> &str;
}

pub(crate) fn default_limit_app() -> String {
    LIMIT_APP_DEFAULT.to_string()
}
