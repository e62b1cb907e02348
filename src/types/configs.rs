use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::ConfigEntry;

/// Body of `POST /configs`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfigCreate {
    pub key: String,
    pub value: String,
    /// Expected to be either `string` or `boolean`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `PUT /configs/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfigUpdate {
    pub value: String,
}

/// Outbound shape of a config entry; the row id stays internal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ConfigResponse {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<ConfigEntry> for ConfigResponse {
    fn from(c: ConfigEntry) -> Self {
        Self {
            key: c.key,
            value: c.value,
            kind: c.kind,
        }
    }
}
