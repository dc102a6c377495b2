//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Accounts, BookingCommand, BookingQuery, Catalogue, CreditPackages, FixtureAccounts,
    FixtureBookingCommand, FixtureBookingQuery, FixtureCatalogue, FixtureCreditPackages,
    FixtureSkills, Skills,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub packages: Arc<dyn CreditPackages>,
    pub skills: Arc<dyn Skills>,
    pub catalogue: Arc<dyn Catalogue>,
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            accounts: Arc::new(FixtureAccounts),
            bookings: Arc::new(FixtureBookingCommand),
            bookings_query: Arc::new(FixtureBookingQuery),
            packages: Arc::new(FixtureCreditPackages),
            skills: Arc::new(FixtureSkills),
            catalogue: Arc::new(FixtureCatalogue),
        }
    }
}
