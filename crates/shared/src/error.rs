use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("analysis payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("analysis payload must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}

impl PayloadError {
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Self::NotAnObject { found }
    }
}
