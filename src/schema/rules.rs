use serde_json::Value;

/// Validation kind a schema property is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

/// OpenAPI primitive type name to validation kind.
pub const PRIMITIVE_KINDS: &[(&str, FieldKind)] = &[
    ("string", FieldKind::String),
    ("integer", FieldKind::Integer),
    ("number", FieldKind::Number),
    ("boolean", FieldKind::Boolean),
    ("array", FieldKind::Array),
    ("object", FieldKind::Object),
];

impl FieldKind {
    /// Unknown or missing type names fall back to `String`.
    pub fn from_type_name(name: Option<&str>) -> Self {
        name.and_then(|n| {
            PRIMITIVE_KINDS
                .iter()
                .find(|(type_name, _)| *type_name == n)
                .map(|(_, kind)| *kind)
        })
        .unwrap_or(FieldKind::String)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
        }
    }

    /// Strict JSON type check: no coercion of `"1"` or `1.0` to an integer.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }
}

/// Rule for one property of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
}

impl FieldRule {
    /// Build a rule from a property schema. `type` may be a single name or,
    /// in OpenAPI 3.1, a list such as `["string", "null"]`.
    pub fn from_property(name: &str, props: &Value, required: bool) -> Self {
        let (type_name, nullable) = match props.get("type") {
            Some(Value::String(s)) => (Some(s.as_str()), false),
            Some(Value::Array(items)) => {
                let names: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                let nullable = names.contains(&"null");
                (names.into_iter().find(|n| *n != "null"), nullable)
            }
            _ => (None, false),
        };
        let nullable = nullable || props.get("nullable").and_then(Value::as_bool) == Some(true);

        Self {
            name: name.to_string(),
            kind: FieldKind::from_type_name(type_name),
            required,
            nullable,
            minimum: props.get("minimum").and_then(Value::as_f64),
            maximum: props.get("maximum").and_then(Value::as_f64),
        }
    }

    /// Check `value` against this rule, returning the reason on failure.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        if value.is_null() {
            return if self.nullable {
                Ok(())
            } else {
                Err(format!("expected {}, got null", self.kind.as_str()))
            };
        }
        if !self.kind.accepts(value) {
            return Err(format!("expected {}", self.kind.as_str()));
        }
        if let Some(n) = value.as_f64() {
            if let Some(min) = self.minimum
                && n < min
            {
                return Err(format!("must be greater than or equal to {min}"));
            }
            if let Some(max) = self.maximum
                && n > max
            {
                return Err(format!("must be less than or equal to {max}"));
            }
        }
        Ok(())
    }
}
