use serde::{Deserialize, Serialize};

use super::{default_limit_app, SyncRule};
use crate::data_id::RuleCategory;

pub const AUTHORITY_WHITE: i32 = 0;
pub const AUTHORITY_BLACK: i32 = 1;

/// Allow/deny list for callers of a resource. `limit_app` holds the
/// comma-separated caller names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorityRule {
    pub resource: String,
    pub limit_app: String,
    pub strategy: i32,
}

impl Default for AuthorityRule {
    fn default() -> Self {
        Self {
            resource: String::new(),
            limit_app: default_limit_app(),
            strategy: AUTHORITY_WHITE,
        }
    }
}

impl AuthorityRule {
    pub fn is_deny_list(&self) -> bool {
        self.strategy == AUTHORITY_BLACK
    }
}

impl SyncRule for AuthorityRule {
    const CATEGORY: RuleCategory = RuleCategory::Authority;

    fn resource(&self) -> &str {
        &self.resource
    }
}
