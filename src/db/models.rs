use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct ConfigEntry {
    pub id: i64,
    pub key: String,
    pub value: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}
