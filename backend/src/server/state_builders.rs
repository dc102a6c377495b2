//! Builders wiring repository-backed services into the HTTP state.

use std::sync::Arc;

use coursehub::domain::{
    AccountService, BookingService, CatalogueService, CreditPackageService, SkillService,
};
use coursehub::inbound::http::state::HttpState;
use coursehub::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselCourseRepository, DieselCreditRepository,
    DieselSkillRepository, DieselUserRepository,
};
use coursehub::outbound::security::Sha256PasswordHasher;

/// Build the HTTP state from database-backed services.
///
/// One booking service instance backs both the command and the query port so
/// they share a repository handle.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let booking_service = Arc::new(BookingService::new(Arc::new(DieselBookingRepository::new(
        pool.clone(),
    ))));

    HttpState {
        accounts: Arc::new(AccountService::new(
            Arc::clone(&user_repo),
            Arc::new(Sha256PasswordHasher),
        )),
        bookings: booking_service.clone(),
        bookings_query: booking_service,
        packages: Arc::new(CreditPackageService::new(Arc::new(
            DieselCreditRepository::new(pool.clone()),
        ))),
        skills: Arc::new(SkillService::new(Arc::new(DieselSkillRepository::new(
            pool.clone(),
        )))),
        catalogue: Arc::new(CatalogueService::new(
            user_repo,
            Arc::new(DieselCourseRepository::new(pool.clone())),
        )),
    }
}
