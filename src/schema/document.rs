use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;

use super::model::RecordModel;
use crate::error::SchemaError;

pub const OPENAPI_PATH: &str = "/openapi.json";

/// An OpenAPI document together with the records derived from its
/// `components.schemas`. Records are built once, at construction.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    raw: Value,
    models: HashMap<String, RecordModel>,
}

impl SchemaDocument {
    pub fn from_value(raw: Value) -> Self {
        let models = raw
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, schema)| (name.clone(), RecordModel::from_component(name, schema)))
                    .collect()
            })
            .unwrap_or_default();
        Self { raw, models }
    }

    /// GET `{base_url}/openapi.json`.
    pub async fn fetch(client: &reqwest::Client, base_url: &Url) -> Result<Self, SchemaError> {
        let url = base_url.join(OPENAPI_PATH)?;
        info!(%url, "fetching OpenAPI document");
        let raw: Value = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(Self::from_value(raw))
    }

    pub fn models(&self) -> &HashMap<String, RecordModel> {
        &self.models
    }

    pub fn model(&self, name: &str) -> Option<&RecordModel> {
        self.models.get(name)
    }

    /// `$ref` of the JSON request body declared for `method endpoint`.
    pub fn request_schema_ref(&self, endpoint: &str, method: &str) -> Option<&str> {
        self.raw
            .get("paths")?
            .get(endpoint)?
            .get(method.to_ascii_lowercase())?
            .get("requestBody")?
            .get("content")?
            .get("application/json")?
            .get("schema")?
            .get("$ref")?
            .as_str()
            .filter(|r| !r.is_empty())
    }

    /// Record bound to the request body of `method endpoint`.
    pub fn model_for_endpoint(
        &self,
        endpoint: &str,
        method: &str,
    ) -> Result<&RecordModel, SchemaError> {
        let schema_ref = self
            .request_schema_ref(endpoint, method)
            .ok_or_else(|| SchemaError::MissingSchemaRef(endpoint.to_string()))?;
        let schema_name = schema_ref.rsplit('/').next().unwrap_or(schema_ref);
        debug!(endpoint, method, schema = schema_name, "resolved request schema");
        self.model(schema_name)
            .ok_or_else(|| SchemaError::UnknownSchema(schema_name.to_string()))
    }

    /// Validate `payload` against the request record of `method endpoint`.
    pub fn validate_arguments(
        &self,
        endpoint: &str,
        method: &str,
        payload: &Value,
    ) -> Result<Value, SchemaError> {
        self.model_for_endpoint(endpoint, method)?.validate(payload)
    }
}

/// Send a validated body to `endpoint` with `method` and decode the JSON reply.
/// A non-2xx status is an error.
pub async fn send_validated(
    client: &reqwest::Client,
    base_url: &Url,
    endpoint: &str,
    method: &str,
    body: &Value,
) -> Result<Value, SchemaError> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| SchemaError::UnsupportedMethod(method.to_string()))?;
    let url = base_url.join(endpoint)?;
    let reply = client
        .request(method, url)
        .json(body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(reply)
}
