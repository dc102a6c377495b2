//! Domain ports and supporting types for the hexagonal boundary.

mod accounts;
mod booking_command;
mod booking_query;
mod booking_repository;
mod catalogue;
mod course_repository;
mod credit_packages;
mod credit_repository;
mod password_hasher;
mod skill_repository;
mod skills;
mod user_repository;

#[cfg(test)]
pub use accounts::MockAccounts;
pub use accounts::{
    AccountPayload, Accounts, FixtureAccounts, LoginRequest, ProfilePayload, SignUpRequest,
    UpdatePasswordRequest,
};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{
    BookingCommand, CancelBookingRequest, CreateBookingRequest, FixtureBookingCommand,
};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::{
    BookingQuery, BookingViewPayload, FixtureBookingQuery, GetBookingSummaryRequest,
    GetBookingSummaryResponse,
};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{
    BookingRepository, BookingRepositoryError, FixtureBookingRepository,
};
#[cfg(test)]
pub use catalogue::MockCatalogue;
pub use catalogue::{
    Catalogue, CoachDetailPayload, CoachPageRequest, CoachPayload, CoursePayload,
    CreateCourseRequest, FixtureCatalogue,
};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{
    CourseListItem, CourseRepository, CourseRepositoryError, FixtureCourseRepository,
};
#[cfg(test)]
pub use credit_packages::MockCreditPackages;
pub use credit_packages::{
    CreatePackageRequest, CreditPackagePayload, CreditPackages, FixtureCreditPackages,
    PurchasePayload,
};
#[cfg(test)]
pub use credit_repository::MockCreditRepository;
pub use credit_repository::{
    CreditRepository, CreditRepositoryError, FixtureCreditRepository, NewPurchaseRecord,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PlaintextPasswordHasher};
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
pub use skill_repository::{FixtureSkillRepository, SkillRepository, SkillRepositoryError};
#[cfg(test)]
pub use skills::MockSkills;
pub use skills::{CreateSkillRequest, FixtureSkills, SkillPayload, Skills};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    CoachListItem, FixtureUserRepository, NewUserRecord, UserRepository, UserRepositoryError,
};
