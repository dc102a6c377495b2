//! End-to-end booking flow over the HTTP surface.
//!
//! Drives the real domain services through the actix handlers with an
//! in-memory ledger standing in for PostgreSQL, covering the whole journey:
//! signup, login, purchase, booking, duplicate rejection, capacity
//! exhaustion, cancellation, and the credit summary arithmetic.

use std::sync::{Arc, Mutex};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use coursehub::domain::ports::{
    BookingRepository, BookingRepositoryError, CoachListItem, CreditRepository,
    CreditRepositoryError, FixtureCourseRepository, NewPurchaseRecord, NewUserRecord,
    PlaintextPasswordHasher, UserRepository, UserRepositoryError,
};
use coursehub::domain::{
    AccountService, BookingService, BookingStatus, BookingView, CatalogueService, Course,
    CourseBooking, CourseDraft, CourseId, CreditPackage, CreditPackageService, CreditPurchase,
    Email, PurchaseView, Role, SkillService, UNKNOWN_COACH_NAME, User, UserId, UserName,
};
use coursehub::inbound::http::courses::{cancel_booking, create_booking};
use coursehub::inbound::http::credit_packages::{buy_package, create_package};
use coursehub::inbound::http::state::HttpState;
use coursehub::inbound::http::users::{booking_summary, list_purchases, login, sign_up};

#[derive(Default)]
struct LedgerState {
    users: Vec<(User, String)>,
    packages: Vec<CreditPackage>,
    purchases: Vec<CreditPurchase>,
    courses: Vec<Course>,
    bookings: Vec<CourseBooking>,
}

/// In-memory stand-in for the PostgreSQL adapters.
#[derive(Default)]
struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    fn seed_course(&self, course: Course) {
        self.state
            .lock()
            .expect("ledger lock")
            .courses
            .push(course);
    }

    fn replace_course_capacity(state: &mut LedgerState, course_id: CourseId, delta: i32) {
        if let Some(slot) = state
            .courses
            .iter_mut()
            .find(|course| course.id() == course_id)
        {
            let rebuilt = Course::new(CourseDraft {
                id: slot.id(),
                coach_id: slot.coach_id().copied(),
                name: slot.name().to_owned(),
                description: slot.description().map(str::to_owned),
                start_at: slot.start_at(),
                end_at: slot.end_at(),
                meeting_url: slot.meeting_url().map(str::to_owned),
                remaining_capacity: slot.remaining_capacity() + delta,
            })
            .expect("rebuilt course is valid");
            *slot = rebuilt;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryLedger {
    async fn insert_user(&self, record: NewUserRecord) -> Result<(), UserRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        if state
            .users
            .iter()
            .any(|(user, _)| user.email == record.email)
        {
            return Err(UserRepositoryError::DuplicateEmail);
        }
        state.users.push((
            User {
                id: record.id,
                name: record.name,
                email: record.email,
                role: record.role,
            },
            record.credential,
        ));
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .users
            .iter()
            .find(|(user, _)| user.id == user_id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_with_credential(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, UserRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .users
            .iter()
            .find(|(user, _)| &user.email == email)
            .cloned())
    }

    async fn update_name(
        &self,
        user_id: UserId,
        name: &UserName,
    ) -> Result<bool, UserRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        match state.users.iter_mut().find(|(user, _)| user.id == user_id) {
            Some((user, _)) => {
                user.name = name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn credential_of(&self, user_id: UserId) -> Result<Option<String>, UserRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .users
            .iter()
            .find(|(user, _)| user.id == user_id)
            .map(|(_, credential)| credential.clone()))
    }

    async fn update_credential(
        &self,
        user_id: UserId,
        credential: &str,
    ) -> Result<bool, UserRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        match state.users.iter_mut().find(|(user, _)| user.id == user_id) {
            Some((_, stored)) => {
                *stored = credential.to_owned();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_role(&self, user_id: UserId, role: Role) -> Result<bool, UserRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        match state.users.iter_mut().find(|(user, _)| user.id == user_id) {
            Some((user, _)) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_coaches(
        &self,
        _page: i64,
        _per: i64,
    ) -> Result<Vec<CoachListItem>, UserRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .users
            .iter()
            .filter(|(user, _)| user.role == Role::Coach)
            .map(|(user, _)| CoachListItem {
                id: user.id,
                name: user.name.to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl CreditRepository for InMemoryLedger {
    async fn list_packages(&self) -> Result<Vec<CreditPackage>, CreditRepositoryError> {
        Ok(self.state.lock().expect("ledger lock").packages.clone())
    }

    async fn insert_package(&self, package: CreditPackage) -> Result<(), CreditRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        if state.packages.iter().any(|p| p.name == package.name) {
            return Err(CreditRepositoryError::DuplicateName);
        }
        state.packages.push(package);
        Ok(())
    }

    async fn delete_package(&self, package_id: Uuid) -> Result<(), CreditRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        let before = state.packages.len();
        state.packages.retain(|p| p.id != package_id);
        if state.packages.len() == before {
            return Err(CreditRepositoryError::PackageMissing);
        }
        Ok(())
    }

    async fn find_package(
        &self,
        package_id: Uuid,
    ) -> Result<Option<CreditPackage>, CreditRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state.packages.iter().find(|p| p.id == package_id).cloned())
    }

    async fn insert_purchase(
        &self,
        record: NewPurchaseRecord,
    ) -> Result<(), CreditRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        state.purchases.push(CreditPurchase {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            credit_package_id: record.credit_package_id,
            purchased_credits: record.purchased_credits,
            price_paid: record.price_paid,
            purchase_at: record.purchase_at,
        });
        Ok(())
    }

    async fn list_purchases(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PurchaseView>, CreditRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .purchases
            .iter()
            .filter(|purchase| purchase.user_id == user_id)
            .map(|purchase| PurchaseView {
                package_name: state
                    .packages
                    .iter()
                    .find(|p| p.id == purchase.credit_package_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                purchased_credits: purchase.purchased_credits,
                price_paid: purchase.price_paid,
                purchase_at: purchase.purchase_at,
            })
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryLedger {
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>, BookingRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .courses
            .iter()
            .find(|course| course.id() == course_id)
            .cloned())
    }

    async fn has_active_booking(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, BookingRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .bookings
            .iter()
            .any(|b| b.user_id == user_id && b.course_id == course_id))
    }

    async fn total_credit(&self, user_id: UserId) -> Result<i64, BookingRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .purchases
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| i64::from(p.purchased_credits))
            .sum())
    }

    async fn book(
        &self,
        user_id: UserId,
        course_id: CourseId,
        booking_at: DateTime<Utc>,
    ) -> Result<(), BookingRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        let course = state
            .courses
            .iter()
            .find(|course| course.id() == course_id)
            .ok_or(BookingRepositoryError::CourseMissing)?;
        if !course.has_open_seats() {
            return Err(BookingRepositoryError::CapacityExhausted);
        }
        if state
            .bookings
            .iter()
            .any(|b| b.user_id == user_id && b.course_id == course_id)
        {
            return Err(BookingRepositoryError::AlreadyBooked);
        }

        let mut ordered: Vec<usize> = (0..state.purchases.len())
            .filter(|&i| {
                state.purchases[i].user_id == user_id && state.purchases[i].purchased_credits > 0
            })
            .collect();
        ordered.sort_by_key(|&i| state.purchases[i].purchase_at);
        let debited = *ordered
            .first()
            .ok_or(BookingRepositoryError::NoUsableCredit)?;
        state.purchases[debited].purchased_credits -= 1;

        Self::replace_course_capacity(&mut state, course_id, -1);
        state.bookings.push(CourseBooking {
            user_id,
            course_id,
            status: BookingStatus::Booked,
            booking_at,
        });
        Ok(())
    }

    async fn cancel(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<(), BookingRepositoryError> {
        let mut state = self.state.lock().expect("ledger lock");
        let before = state.bookings.len();
        state
            .bookings
            .retain(|b| !(b.user_id == user_id && b.course_id == course_id));
        if state.bookings.len() == before {
            return Err(BookingRepositoryError::NotBooked);
        }

        // Restoration targets the oldest purchase unconditionally.
        let mut ordered: Vec<usize> = (0..state.purchases.len())
            .filter(|&i| state.purchases[i].user_id == user_id)
            .collect();
        ordered.sort_by_key(|&i| state.purchases[i].purchase_at);
        if let Some(&oldest) = ordered.first() {
            state.purchases[oldest].purchased_credits += 1;
        }

        Self::replace_course_capacity(&mut state, course_id, 1);
        Ok(())
    }

    async fn list_booking_views(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookingView>, BookingRepositoryError> {
        let state = self.state.lock().expect("ledger lock");
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| {
                state
                    .courses
                    .iter()
                    .find(|course| course.id() == b.course_id)
                    .map(|course| BookingView {
                        course_id: course.id(),
                        course_name: course.name().to_owned(),
                        coach_name: UNKNOWN_COACH_NAME.to_owned(),
                        status: b.status,
                        start_at: course.start_at(),
                        end_at: course.end_at(),
                        meeting_url: course.meeting_url().map(str::to_owned),
                    })
            })
            .collect())
    }
}

fn http_state(ledger: &Arc<InMemoryLedger>) -> web::Data<HttpState> {
    let booking_service = Arc::new(BookingService::new(Arc::clone(ledger)));
    web::Data::new(HttpState {
        accounts: Arc::new(AccountService::new(
            Arc::clone(ledger),
            Arc::new(PlaintextPasswordHasher),
        )),
        bookings: booking_service.clone(),
        bookings_query: booking_service,
        packages: Arc::new(CreditPackageService::new(Arc::clone(ledger))),
        skills: Arc::new(SkillService::new(Arc::new(
            coursehub::domain::ports::FixtureSkillRepository,
        ))),
        catalogue: Arc::new(CatalogueService::new(
            Arc::clone(ledger),
            Arc::new(FixtureCourseRepository),
        )),
    })
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

fn open_course(capacity: i32) -> Course {
    let start_at = Utc::now() + Duration::days(1);
    Course::new(CourseDraft {
        id: CourseId::random(),
        coach_id: None,
        name: "Beginner yoga".to_owned(),
        description: None,
        start_at,
        end_at: start_at + Duration::hours(1),
        meeting_url: None,
        remaining_capacity: capacity,
    })
    .expect("valid course")
}

async fn sign_up_and_login<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users/signup")
            .set_json(serde_json::json!({
                "name": "Zoe",
                "email": email,
                "password": "Passw0rd",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(serde_json::json!({
                "email": email,
                "password": "Passw0rd",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

async fn buy_new_package<S>(app: &S, cookie: &Cookie<'static>, name: &str, credits: i32)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/credit-package")
            .set_json(serde_json::json!({
                "name": name,
                "creditAmount": credits,
                "price": credits * 300,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let package: serde_json::Value = test::read_body_json(res).await;
    let package_id = package["id"].as_str().expect("package id").to_owned();

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/credit-package/{package_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

async fn purchased_credits_by_name<S>(app: &S, cookie: &Cookie<'static>, name: &str) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/users/credit-package")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let purchases: serde_json::Value = test::read_body_json(res).await;
    purchases
        .as_array()
        .expect("purchase list")
        .iter()
        .find(|row| row["packageName"] == name)
        .and_then(|row| row["purchasedCredits"].as_i64())
        .expect("purchase row present")
}

#[actix_web::test]
async fn booking_lifecycle_updates_the_credit_ledger() {
    let ledger = Arc::new(InMemoryLedger::default());
    let course = open_course(5);
    let course_id = course.id();
    ledger.seed_course(course);

    let app = test::init_service(
        App::new().app_data(http_state(&ledger)).service(
            web::scope("/api/v1")
                .wrap(session_middleware())
                .service(sign_up)
                .service(login)
                .service(booking_summary)
                .service(create_package)
                .service(buy_package)
                .service(create_booking)
                .service(cancel_booking),
        ),
    )
    .await;

    let cookie = sign_up_and_login(&app, "zoe@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/credit-package")
            .set_json(serde_json::json!({
                "name": "Starter",
                "creditAmount": 3,
                "price": 900,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let package: serde_json::Value = test::read_body_json(res).await;
    let package_id = package["id"].as_str().expect("package id").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/credit-package/{package_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Book once: one credit spent, one seat taken.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // A duplicate booking for the same course is a conflict.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/courses")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let summary: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(summary["creditRemain"], 2);
    assert_eq!(summary["creditUsage"], 1);
    assert_eq!(summary["bookings"][0]["coachName"], "N/A");

    // Cancel: credit restored, booking gone.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let summary: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(summary["creditRemain"], 3);
    assert_eq!(summary["creditUsage"], 0);
    assert_eq!(summary["bookings"], serde_json::json!([]));
}

#[actix_web::test]
async fn booking_without_credit_is_rejected_before_any_effect() {
    let ledger = Arc::new(InMemoryLedger::default());
    let course = open_course(1);
    let course_id = course.id();
    ledger.seed_course(course);

    let app = test::init_service(
        App::new().app_data(http_state(&ledger)).service(
            web::scope("/api/v1")
                .wrap(session_middleware())
                .service(sign_up)
                .service(login)
                .service(create_booking),
        ),
    )
    .await;

    let cookie = sign_up_and_login(&app, "nocredit@example.com").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "insufficient_credit");

    let remaining = ledger
        .find_course(course_id)
        .await
        .expect("course lookup")
        .expect("course present")
        .remaining_capacity();
    assert_eq!(remaining, 1, "failed booking must not take a seat");
}

#[actix_web::test]
async fn full_course_reports_capacity_exceeded() {
    let ledger = Arc::new(InMemoryLedger::default());
    let course = open_course(0);
    let course_id = course.id();
    ledger.seed_course(course);

    let app = test::init_service(
        App::new().app_data(http_state(&ledger)).service(
            web::scope("/api/v1")
                .wrap(session_middleware())
                .service(sign_up)
                .service(login)
                .service(create_package)
                .service(buy_package)
                .service(create_booking),
        ),
    )
    .await;

    let cookie = sign_up_and_login(&app, "late@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/credit-package")
            .set_json(serde_json::json!({
                "name": "Starter",
                "creditAmount": 3,
                "price": 900,
            }))
            .to_request(),
    )
    .await;
    let package: serde_json::Value = test::read_body_json(res).await;
    let package_id = package["id"].as_str().expect("package id").to_owned();
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/credit-package/{package_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "capacity_exceeded");
}

#[actix_web::test]
async fn booking_debits_the_oldest_purchase_and_cancelling_credits_it_back() {
    let ledger = Arc::new(InMemoryLedger::default());
    let course = open_course(5);
    let course_id = course.id();
    ledger.seed_course(course);

    let app = test::init_service(
        App::new().app_data(http_state(&ledger)).service(
            web::scope("/api/v1")
                .wrap(session_middleware())
                .service(sign_up)
                .service(login)
                .service(list_purchases)
                .service(create_package)
                .service(buy_package)
                .service(create_booking)
                .service(cancel_booking),
        ),
    )
    .await;

    let cookie = sign_up_and_login(&app, "stacker@example.com").await;
    buy_new_package(&app, &cookie, "Starter", 3).await;
    buy_new_package(&app, &cookie, "Bulk", 10).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // The debit lands on the oldest purchase that still has credit.
    assert_eq!(purchased_credits_by_name(&app, &cookie, "Starter").await, 2);
    assert_eq!(purchased_credits_by_name(&app, &cookie, "Bulk").await, 10);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Restoration also targets the oldest purchase.
    assert_eq!(purchased_credits_by_name(&app, &cookie, "Starter").await, 3);
    assert_eq!(purchased_credits_by_name(&app, &cookie, "Bulk").await, 10);
}

#[actix_web::test]
async fn three_credits_cover_exactly_three_bookings() {
    let ledger = Arc::new(InMemoryLedger::default());
    let mut course_ids = Vec::new();
    for _ in 0..4 {
        let course = open_course(5);
        course_ids.push(course.id());
        ledger.seed_course(course);
    }

    let app = test::init_service(
        App::new().app_data(http_state(&ledger)).service(
            web::scope("/api/v1")
                .wrap(session_middleware())
                .service(sign_up)
                .service(login)
                .service(booking_summary)
                .service(create_package)
                .service(buy_package)
                .service(create_booking),
        ),
    )
    .await;

    let cookie = sign_up_and_login(&app, "triple@example.com").await;
    buy_new_package(&app, &cookie, "Starter", 3).await;

    for course_id in course_ids.iter().take(3) {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{course_id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{}", course_ids[3]))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "insufficient_credit");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let summary: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(summary["creditRemain"], 0);
    assert_eq!(summary["creditUsage"], 3);
}
