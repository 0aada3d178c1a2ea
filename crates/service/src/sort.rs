//! Dynamic ordering by property name.

use sea_orm::{EntityTrait, Order, QueryOrder, Select};

use crate::errors::ServiceError;
use crate::filter::FilterableEntity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Accepts `asc` / `desc` in any case.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(ServiceError::invalid("Invalid sort order. Use 'asc' or 'desc'"))
        }
    }
}

impl From<SortOrder> for Order {
    fn from(o: SortOrder) -> Self {
        match o {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Resolved sort: column plus direction.
pub struct Sort<E: EntityTrait> {
    pub column: E::Column,
    pub order: SortOrder,
}

/// `None` when no sort field is given; the order string is only checked when one is.
pub fn resolve_sort<E: FilterableEntity>(sort_field: Option<&str>, sort_order: &str) -> Result<Option<Sort<E>>, ServiceError> {
    let Some(field) = sort_field.map(str::trim).filter(|f| !f.is_empty()) else {
        return Ok(None);
    };
    let order = SortOrder::parse(sort_order)?;
    let (column, _) = E::column_for(field)
        .ok_or_else(|| ServiceError::invalid(format!("Invalid sort field '{}'", field)))?;
    Ok(Some(Sort { column, order }))
}

pub fn apply_sort<E: EntityTrait>(query: Select<E>, sort: Option<Sort<E>>) -> Select<E> {
    match sort {
        Some(s) => query.order_by(s.column, s.order.into()),
        None => query,
    }
}
