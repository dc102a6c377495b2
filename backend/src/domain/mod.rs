//! Domain model for the course booking platform.
//!
//! Entities validate on construction and expose read-only views of their
//! state. Services orchestrate use cases over the port traits in
//! [`ports`]; adapters live in the outbound layer.

mod account_service;
mod booking;
mod booking_service;
mod catalogue_service;
mod course;
mod credit;
mod credit_package_service;
mod error;
mod ids;
pub mod ports;
mod skill;
mod skill_service;
mod user;

pub use account_service::AccountService;
pub use booking::{
    BookingStatus, BookingSummary, BookingValidationError, BookingView, CourseBooking,
    UNKNOWN_COACH_NAME,
};
pub use booking_service::BookingService;
pub use catalogue_service::CatalogueService;
pub use course::{Course, CourseDraft, CourseValidationError};
pub use credit::{CreditPackage, CreditPurchase, CreditValidationError, PurchaseView};
pub use credit_package_service::CreditPackageService;
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use ids::{CourseId, IdValidationError, UserId};
pub use skill::{Skill, SkillValidationError};
pub use skill_service::SkillService;
pub use user::{Email, Role, User, UserName, UserValidationError, check_password_policy};
