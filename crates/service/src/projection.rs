//! Field projection: reduce an entity to the fields a caller asked for.
//!
//! Each projectable type publishes a static table of field names plus, optionally, the
//! navigation properties it can expand. Requests are resolved against those tables up
//! front, so unknown names fail before any query runs.

use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Field name -> JSON value. Navigation fields nest one level deep.
pub type Projection = Map<String, Value>;

/// A navigation property and the field table of the entity it points at.
#[derive(Clone, Copy, Debug)]
pub struct NavigationDef {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

pub trait Projectable {
    /// Canonical scalar field names; must include `Id`.
    const FIELDS: &'static [&'static str];
    const NAVIGATIONS: &'static [NavigationDef] = &[];

    /// Value of a canonical field from `FIELDS`.
    fn field_value(&self, field: &str) -> Value;

    /// Value of `field` on the related row behind `navigation`, `Null` when not loaded.
    fn navigation_value(&self, _navigation: &str, _field: &str) -> Value {
        Value::Null
    }
}

/// Case-insensitive lookup returning the canonical spelling.
pub fn resolve_name(table: &'static [&'static str], name: &str) -> Option<&'static str> {
    table.iter().copied().find(|f| f.eq_ignore_ascii_case(name))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPath {
    Field(&'static str),
    Nested { navigation: &'static str, field: &'static str },
}

/// Resolved, de-duplicated list of requested fields. `Id` always comes first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSelection {
    paths: Vec<FieldPath>,
}

impl FieldSelection {
    pub fn parse<T: Projectable>(fields: Option<&str>) -> Result<Self, ServiceError> {
        let id = resolve_name(T::FIELDS, "Id")
            .ok_or_else(|| ServiceError::invalid("projectable type has no Id field"))?;
        let mut paths = vec![FieldPath::Field(id)];

        for raw in fields.unwrap_or_default().split(',') {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            let path = match name.split_once('.') {
                Some((nav, field)) => {
                    let def = T::NAVIGATIONS
                        .iter()
                        .find(|d| d.name.eq_ignore_ascii_case(nav))
                        .ok_or_else(|| ServiceError::invalid(format!("Unknown navigation property '{}'", nav)))?;
                    let field = resolve_name(def.fields, field)
                        .ok_or_else(|| ServiceError::invalid(format!("Unknown field '{}'", name)))?;
                    FieldPath::Nested { navigation: def.name, field }
                }
                None => FieldPath::Field(
                    resolve_name(T::FIELDS, name)
                        .ok_or_else(|| ServiceError::invalid(format!("Unknown field '{}'", name)))?,
                ),
            };
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }

    /// Navigation properties referenced by at least one nested path, in request order.
    pub fn navigations(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for p in &self.paths {
            if let FieldPath::Nested { navigation, .. } = p {
                if !out.contains(navigation) {
                    out.push(navigation);
                }
            }
        }
        out
    }
}

/// Builds projections from entities.
pub trait FieldMapper: Send + Sync {
    /// `None` (no row) maps to an empty projection.
    fn map_to_fields<T: Projectable>(&self, entity: Option<&T>, selection: &FieldSelection) -> Projection;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFieldMapper;

impl FieldMapper for JsonFieldMapper {
    fn map_to_fields<T: Projectable>(&self, entity: Option<&T>, selection: &FieldSelection) -> Projection {
        let mut out = Projection::new();
        let Some(entity) = entity else { return out };
        for path in selection.paths() {
            match *path {
                FieldPath::Field(field) => {
                    out.insert(field.to_string(), entity.field_value(field));
                }
                FieldPath::Nested { navigation, field } => {
                    let slot = out
                        .entry(navigation.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(nested) = slot {
                        nested.insert(field.to_string(), entity.navigation_value(navigation, field));
                    }
                }
            }
        }
        out
    }
}
