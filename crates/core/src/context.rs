use crate::user::User;
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Metadata key listing the UI features the caller's front end supports.
pub const UI_FEATURES_KEY: &str = "ui_features_available";

/// Ambient environment of a single invocation. The registry only reads it.
#[derive(Clone)]
pub struct ToolContext {
    pub user: User,
    pub conversation_id: String,
    pub request_id: String,
    pub metadata: Map<String, Value>,
    agent_memory: Option<Arc<dyn Any + Send + Sync>>,
}

impl ToolContext {
    pub fn new(user: User) -> Self {
        Self {
            user,
            conversation_id: String::new(),
            request_id: uuid::Uuid::new_v4().to_string(),
            metadata: Map::new(),
            agent_memory: None,
        }
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = conversation_id.into();
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_agent_memory<M>(mut self, memory: Arc<M>) -> Self
    where
        M: Any + Send + Sync,
    {
        self.agent_memory = Some(memory as Arc<dyn Any + Send + Sync>);
        self
    }

    /// Long-lived agent memory, if one of type `M` was attached.
    pub fn agent_memory<M>(&self) -> Option<Arc<M>>
    where
        M: Any + Send + Sync,
    {
        self.agent_memory
            .clone()
            .and_then(|memory| memory.downcast::<M>().ok())
    }

    /// UI features advertised in metadata; non-string entries are skipped.
    pub fn ui_features_available(&self) -> Vec<String> {
        self.metadata
            .get(UI_FEATURES_KEY)
            .and_then(Value::as_array)
            .map(|features| {
                features
                    .iter()
                    .filter_map(|f| f.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolContext")
            .field("user", &self.user)
            .field("conversation_id", &self.conversation_id)
            .field("request_id", &self.request_id)
            .field("metadata", &self.metadata)
            .field("agent_memory", &self.agent_memory.is_some())
            .finish()
    }
}
