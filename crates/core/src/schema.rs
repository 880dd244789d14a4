//! Argument schema descriptors.
//!
//! A descriptor parses the untyped JSON arguments of a `ToolCall` into a typed
//! value and publishes the JSON schema the LLM sees. Validated arguments travel
//! through the registry as `ToolArgs`, which tools and argument transforms
//! downcast back to the concrete type.

use crate::error::ValidationError;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub trait ArgsSchema: Send + Sync {
    fn validate(&self, raw: &Value) -> Result<ToolArgs, ValidationError>;
    fn json_schema(&self) -> Value;
}

/// Validated, type-erased tool arguments.
pub struct ToolArgs {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ToolArgs {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Takes the concrete value out, handing `self` back on a type mismatch.
    pub fn into_inner<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { value, type_name })
    }
}

impl fmt::Debug for ToolArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolArgs")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

fn require_object(raw: &Value) -> Result<&Map<String, Value>, ValidationError> {
    raw.as_object().ok_or_else(|| {
        ValidationError::new(format!(
            "expected a JSON object of arguments, got {}",
            json_kind(raw)
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Descriptor backed by a serde type; the published schema is derived with schemars.
pub struct TypedArgs<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedArgs<T>
where
    T: DeserializeOwned + JsonSchema + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn shared() -> Arc<dyn ArgsSchema> {
        Arc::new(Self::new())
    }
}

impl<T> Default for TypedArgs<T>
where
    T: DeserializeOwned + JsonSchema + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArgsSchema for TypedArgs<T>
where
    T: DeserializeOwned + JsonSchema + Send + Sync + 'static,
{
    fn validate(&self, raw: &Value) -> Result<ToolArgs, ValidationError> {
        require_object(raw)?;
        let parsed: T = serde_path_to_error::deserialize(raw).map_err(|error| {
            let inner = error.inner().to_string();
            if error.path().iter().next().is_none() {
                ValidationError::new(inner)
            } else {
                let path = error.path().to_string();
                ValidationError::at(path.clone(), format!("{path}: {inner}"))
            }
        })?;
        Ok(ToolArgs::new(parsed))
    }

    fn json_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}))
    }
}

/// Descriptor for tools that consume the raw argument object.
///
/// Validation only enforces the schema's top-level `required` list; the
/// arguments reach the tool as `Map<String, Value>`.
pub struct RawArgs {
    schema: Value,
}

impl RawArgs {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn shared(schema: Value) -> Arc<dyn ArgsSchema> {
        Arc::new(Self::new(schema))
    }

    fn required(&self) -> impl Iterator<Item = &str> {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }
}

impl ArgsSchema for RawArgs {
    fn validate(&self, raw: &Value) -> Result<ToolArgs, ValidationError> {
        let object = require_object(raw)?;
        if let Some(missing) = self.required().find(|field| !object.contains_key(*field)) {
            return Err(ValidationError::at(
                missing,
                format!("{missing}: missing required field"),
            ));
        }
        Ok(ToolArgs::new(object.clone()))
    }

    fn json_schema(&self) -> Value {
        self.schema.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct EchoArgs {
        text: String,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct QueryArgs {
        #[allow(dead_code)]
        filter: Filter,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Filter {
        #[allow(dead_code)]
        limit: u32,
    }

    #[test]
    fn test_typed_args_parses() {
        let schema = TypedArgs::<EchoArgs>::new();
        let args = schema.validate(&json!({"text": "hi"})).unwrap();
        assert_eq!(
            args.into_inner::<EchoArgs>().unwrap(),
            EchoArgs { text: "hi".into() }
        );
    }

    #[test]
    fn test_typed_args_wrong_type_reports_field() {
        let schema = TypedArgs::<EchoArgs>::new();
        let err = schema.validate(&json!({"text": 123})).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("text"));
        assert!(err.message.starts_with("text: invalid type"));
    }

    #[test]
    fn test_typed_args_nested_path() {
        let schema = TypedArgs::<QueryArgs>::new();
        let err = schema
            .validate(&json!({"filter": {"limit": "ten"}}))
            .unwrap_err();
        assert_eq!(err.path.as_deref(), Some("filter.limit"));
    }

    #[test]
    fn test_typed_args_missing_field() {
        let schema = TypedArgs::<EchoArgs>::new();
        let err = schema.validate(&json!({})).unwrap_err();
        assert!(err.message.contains("missing field `text`"));
    }

    #[test]
    fn test_non_object_rejected() {
        let schema = TypedArgs::<EchoArgs>::new();
        let err = schema.validate(&json!(["hi"])).unwrap_err();
        assert!(err.message.contains("got an array"));
    }

    #[test]
    fn test_typed_json_schema_lists_properties() {
        let schema = TypedArgs::<EchoArgs>::new().json_schema();
        assert_eq!(schema["properties"]["text"]["type"], "string");
        assert_eq!(schema["required"], json!(["text"]));
    }

    #[test]
    fn test_raw_args_required_fields() {
        let schema = RawArgs::new(json!({
            "type": "object",
            "properties": {"path": {"type": "string"}},
            "required": ["path"]
        }));
        let err = schema.validate(&json!({"other": 1})).unwrap_err();
        assert_eq!(err.path.as_deref(), Some("path"));

        let args = schema.validate(&json!({"path": "a.txt"})).unwrap();
        let map = args.downcast_ref::<Map<String, Value>>().unwrap();
        assert_eq!(map["path"], "a.txt");
    }

    #[test]
    fn test_into_inner_mismatch_returns_args() {
        let args = ToolArgs::new(5_u32);
        let args = args.into_inner::<String>().unwrap_err();
        assert!(args.is::<u32>());
        assert_eq!(args.type_name(), "u32");
    }
}
