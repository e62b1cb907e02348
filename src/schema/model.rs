use serde_json::{Map, Value};

use super::rules::FieldRule;
use crate::error::{FieldIssues, SchemaError};

/// Validation record derived from one `components.schemas` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordModel {
    pub name: String,
    pub fields: Vec<FieldRule>,
}

impl RecordModel {
    pub fn from_component(name: &str, schema: &Value) -> Self {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let fields = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(field, p)| {
                        FieldRule::from_property(field, p, required.contains(&field.as_str()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: name.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate `payload`, returning it reduced to the declared fields.
    pub fn validate(&self, payload: &Value) -> Result<Value, SchemaError> {
        let mut issues = FieldIssues::default();
        let Some(obj) = payload.as_object() else {
            issues.push("<root>", "expected object");
            return Err(self.rejected(issues));
        };

        let mut validated = Map::new();
        for rule in &self.fields {
            match obj.get(&rule.name) {
                Some(v) => match rule.check(v) {
                    Ok(()) => {
                        validated.insert(rule.name.clone(), v.clone());
                    }
                    Err(reason) => issues.push(&rule.name, reason),
                },
                None if rule.required => issues.push(&rule.name, "field required"),
                None => {}
            }
        }

        if issues.is_empty() {
            Ok(Value::Object(validated))
        } else {
            Err(self.rejected(issues))
        }
    }

    fn rejected(&self, issues: FieldIssues) -> SchemaError {
        SchemaError::Validation {
            model: self.name.clone(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::rules::FieldKind;
    use serde_json::json;

    fn user_model() -> RecordModel {
        RecordModel::from_component(
            "User",
            &json!({
                "type": "object",
                "required": ["name", "age"],
                "properties": {
                    "name": {"type": "string"},
                    "age": {"type": "integer", "minimum": 1, "maximum": 150},
                    "nickname": {"type": "string"}
                }
            }),
        )
    }

    #[test]
    fn builds_rules_per_property() {
        let model = user_model();
        assert_eq!(model.fields.len(), 3);
        let age = model.field("age").unwrap();
        assert_eq!(age.kind, FieldKind::Integer);
        assert_eq!(age.minimum, Some(1.0));
        assert!(!model.field("nickname").unwrap().required);
    }

    #[test]
    fn valid_payload_keeps_only_declared_fields() {
        let out = user_model()
            .validate(&json!({"name": "Alice", "age": 1, "extra": true}))
            .unwrap();
        assert_eq!(out, json!({"name": "Alice", "age": 1}));
    }

    #[test]
    fn collects_every_issue() {
        let err = user_model()
            .validate(&json!({"age": 0, "nickname": 5}))
            .unwrap_err();
        let (model, issues) = match err {
            SchemaError::Validation { model, issues } => (model, issues),
            other => panic!("expected validation error, got {other:?}"),
        };
        assert_eq!(model, "User");
        let mut fields: Vec<&str> = issues.fields().collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["age", "name", "nickname"]);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(user_model().validate(&json!([1, 2])).is_err());
    }
}
