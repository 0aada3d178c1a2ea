//! Generic filter and search application for SeaORM selects.

use chrono::DateTime;
use sea_orm::sea_query::{Alias, Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Select, Value};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Storage type of a filterable column; drives how filter values are parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Uuid,
    Timestamp,
    Text,
}

/// Name -> column table for entities that can be filtered, searched and sorted by name.
pub trait FilterableEntity: EntityTrait {
    /// Case-insensitive lookup of a scalar property.
    fn column_for(name: &str) -> Option<(Self::Column, FieldKind)>;

    /// Columns matched by the free-text search term.
    fn search_columns() -> &'static [Self::Column];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    /// Comma-separated list of values.
    In,
    IsNull,
    IsNotNull,
}

/// One predicate: `[{"PropertyName": "RoleId", "Operator": "Equal", "Value": "..."}]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterCriteria {
    pub property_name: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Option<String>,
}

impl FilterCriteria {
    pub fn new(property_name: &str, operator: FilterOperator, value: Option<String>) -> Self {
        Self { property_name: property_name.to_string(), operator, value }
    }

    fn required_value(&self) -> Result<&str, ServiceError> {
        self.value
            .as_deref()
            .ok_or_else(|| ServiceError::invalid(format!("Filter on '{}' requires a value", self.property_name)))
    }
}

fn parse_value(kind: FieldKind, property: &str, raw: &str) -> Result<Value, ServiceError> {
    let bad = |e: String| ServiceError::invalid(format!("Invalid value '{}' for '{}': {}", raw, property, e));
    match kind {
        FieldKind::Uuid => Uuid::parse_str(raw).map(Value::from).map_err(|e| bad(e.to_string())),
        FieldKind::Timestamp => DateTime::parse_from_rfc3339(raw).map(Value::from).map_err(|e| bad(e.to_string())),
        FieldKind::Text => Ok(Value::from(raw.to_string())),
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `LOWER(CAST(col AS text)) LIKE pattern`, usable on any column type.
fn text_like<E: EntityTrait>(col: E::Column, pattern: String) -> SimpleExpr {
    let column = SimpleExpr::Column((E::default(), col).into_column_ref());
    Expr::expr(Func::lower(Func::cast_as(column, Alias::new("text")))).like(pattern.to_lowercase())
}

fn predicate<E: FilterableEntity>(criteria: &FilterCriteria) -> Result<SimpleExpr, ServiceError> {
    let property = criteria.property_name.trim();
    let (col, kind) = E::column_for(property)
        .ok_or_else(|| ServiceError::invalid(format!("Unknown filter property '{}'", property)))?;
    let value = |c: &FilterCriteria| -> Result<Value, ServiceError> { parse_value(kind, property, c.required_value()?) };

    let expr = match criteria.operator {
        FilterOperator::Equal => col.eq(value(criteria)?),
        FilterOperator::NotEqual => col.ne(value(criteria)?),
        FilterOperator::GreaterThan => col.gt(value(criteria)?),
        FilterOperator::GreaterThanOrEqual => col.gte(value(criteria)?),
        FilterOperator::LessThan => col.lt(value(criteria)?),
        FilterOperator::LessThanOrEqual => col.lte(value(criteria)?),
        FilterOperator::In => {
            let values = criteria
                .required_value()?
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| parse_value(kind, property, v))
                .collect::<Result<Vec<_>, _>>()?;
            col.is_in(values)
        }
        FilterOperator::Contains => text_like::<E>(col, format!("%{}%", escape_like(criteria.required_value()?))),
        FilterOperator::StartsWith => text_like::<E>(col, format!("{}%", escape_like(criteria.required_value()?))),
        FilterOperator::EndsWith => text_like::<E>(col, format!("%{}", escape_like(criteria.required_value()?))),
        FilterOperator::IsNull => col.is_null(),
        FilterOperator::IsNotNull => col.is_not_null(),
    };
    Ok(expr)
}

/// AND all criteria together, then AND an OR-group matching `search_term` against the
/// entity's search columns. Invalid criteria fail before anything is executed.
pub fn apply_filter<E: FilterableEntity>(
    query: Select<E>,
    filters: &[FilterCriteria],
    search_term: &str,
) -> Result<Select<E>, ServiceError> {
    let mut cond = Condition::all();
    let mut any = false;
    for f in filters {
        cond = cond.add(predicate::<E>(f)?);
        any = true;
    }

    let term = search_term.trim();
    if !term.is_empty() && !E::search_columns().is_empty() {
        let pattern = format!("%{}%", escape_like(term));
        let search = E::search_columns()
            .iter()
            .fold(Condition::any(), |acc, col| acc.add(text_like::<E>(*col, pattern.clone())));
        cond = cond.add(search);
        any = true;
    }

    Ok(if any { query.filter(cond) } else { query })
}
