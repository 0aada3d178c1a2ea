pub mod errors;
pub mod db;
pub mod tenant;
pub mod role;
pub mod user;
pub mod user_in_role;

#[cfg(test)]
mod tests;
