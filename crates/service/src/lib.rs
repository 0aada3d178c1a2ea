//! Service layer for the UserInRole resource.
//! - Builds queries from filter, search, sort and paging input.
//! - Projects rows onto caller-selected fields, including related rows.
//! - Applies JSON-Patch style documents before persisting.
//!
//! Entities and validation live in the `models` crate.

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod patch;
pub mod projection;
pub mod sort;
pub mod user_in_role;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use user_in_role::{ListQuery, UserInRoleResource, UserInRoleService};
