//! HTTP inbound adapter exposing REST endpoints.

pub mod coaches;
pub mod courses;
pub mod credit_packages;
pub mod error;
pub mod health;
pub mod session;
pub mod skills;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
