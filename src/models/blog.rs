use crate::models::validation::{check_keys, require_non_empty};
use crate::utils::error::ValidationError;
use serde_json::{Map, Value};

/// Author-supplied blog fields, used both to create a post and to merge into one.
#[derive(Debug, Clone)]
pub struct BlogFields {
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for BlogFields {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        require_non_empty(&fields)?;
        check_keys(&fields)?;
        Ok(Self { fields })
    }
}
