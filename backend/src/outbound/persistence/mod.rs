//! PostgreSQL persistence adapters for the domain's driven ports.
//!
//! Structure:
//! - Thin repository adapters over Diesel queries, one per port.
//! - Internal row models that never leak into the domain.
//! - Async connection pooling via `bb8` and `diesel-async`.
//! - Typed errors mapped through a shared helper so every adapter reports
//!   connection loss and query failure the same way.

mod diesel_booking_repository;
mod diesel_course_repository;
mod diesel_credit_repository;
mod diesel_error_mapping;
mod diesel_skill_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_credit_repository::DieselCreditRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
