//! JSON-Patch style partial updates.
//!
//! Paths address a single top-level field (`/RoleId` or `RoleId`). Operations run in
//! order against a copy of the target; the target only changes if all of them succeed.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
}

impl PatchOperation {
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. } | PatchOperation::Replace { path, .. } | PatchOperation::Remove { path } => path,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(ops: Vec<PatchOperation>) -> Self { Self(ops) }

    pub fn replace(path: &str, value: Value) -> Self {
        Self(vec![PatchOperation::Replace { path: path.to_string(), value }])
    }

    pub fn operations(&self) -> &[PatchOperation] { &self.0 }
}

/// Per-entity table of settable fields.
pub trait Patchable: Clone {
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), ServiceError>;
    fn clear_field(&mut self, field: &str) -> Result<(), ServiceError>;
}

/// Strip the pointer prefix; nested pointers are not addressable.
fn field_of(path: &str) -> Result<&str, ServiceError> {
    let field = path.strip_prefix('/').unwrap_or(path);
    if field.is_empty() || field.contains('/') {
        return Err(ServiceError::invalid(format!("Unsupported patch path '{}'", path)));
    }
    Ok(field)
}

pub fn apply_patch<T: Patchable>(target: &mut T, document: &PatchDocument) -> Result<(), ServiceError> {
    let mut working = target.clone();
    for op in document.operations() {
        let field = field_of(op.path())?;
        match op {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                working.set_field(field, value.clone())?
            }
            PatchOperation::Remove { .. } => working.clear_field(field)?,
        }
    }
    *target = working;
    Ok(())
}

/// Deserialize a patch value into a field's type.
pub fn value_as<T: DeserializeOwned>(field: &str, value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|e| ServiceError::invalid(format!("Invalid value for '{}': {}", field, e)))
}
