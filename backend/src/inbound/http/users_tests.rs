//! Tests for account and per-user handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use super::*;
use crate::domain::ports::{
    BookingViewPayload, MockAccounts, MockBookingQuery, ProfilePayload,
};
use crate::domain::{BookingStatus, CourseId, Error, Role, UNKNOWN_COACH_NAME, UserId};
use crate::inbound::http::test_utils::test_session_middleware;

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn account() -> AccountPayload {
    AccountPayload {
        id: UserId::new(USER_ID).expect("fixture id"),
        name: "Zoe".to_owned(),
        role: Role::User,
    }
}

#[actix_web::test]
async fn sign_up_returns_created_account() {
    let mut accounts = MockAccounts::new();
    accounts.expect_sign_up().times(1).return_once(|_| Ok(account()));

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        ..HttpState::default()
    });
    let app = test::init_service(App::new().app_data(state).service(sign_up)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/signup")
            .set_json(SignUpRequest {
                name: "Zoe".to_owned(),
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Zoe");
    assert_eq!(body["role"], "USER");
}

#[actix_web::test]
async fn duplicate_email_surfaces_as_conflict() {
    let mut accounts = MockAccounts::new();
    accounts
        .expect_sign_up()
        .times(1)
        .return_once(|_| Err(Error::conflict("email address is already registered")));

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        ..HttpState::default()
    });
    let app = test::init_service(App::new().app_data(state).service(sign_up)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/signup")
            .set_json(SignUpRequest {
                name: "Zoe".to_owned(),
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn login_establishes_a_session_for_profile_reads() {
    let mut accounts = MockAccounts::new();
    accounts.expect_login().times(1).return_once(|_| Ok(account()));
    accounts.expect_profile().times(1).return_once(|_| {
        Ok(ProfilePayload {
            name: "Zoe".to_owned(),
            email: "zoe@example.com".to_owned(),
        })
    });

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        ..HttpState::default()
    });
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(state)
            .service(login)
            .service(get_profile),
    )
    .await;

    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(LoginRequest {
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/profile")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["email"], "zoe@example.com");
}

#[actix_web::test]
async fn profile_without_a_session_is_unauthorised() {
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(HttpState::default()))
            .service(get_profile),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/profile").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn booking_summary_serialises_credit_totals() {
    let mut accounts = MockAccounts::new();
    accounts.expect_login().times(1).return_once(|_| Ok(account()));
    let mut query = MockBookingQuery::new();
    let expected_user = UserId::new(USER_ID).expect("fixture id");
    query
        .expect_booking_summary()
        .times(1)
        .withf(move |request| request.user_id == expected_user)
        .return_once(|_| {
            let start_at = chrono::Utc::now();
            Ok(GetBookingSummaryResponse {
                credit_remain: 3,
                credit_usage: 2,
                bookings: vec![BookingViewPayload {
                    course_id: CourseId::random(),
                    course_name: "Beginner yoga".to_owned(),
                    coach_name: UNKNOWN_COACH_NAME.to_owned(),
                    status: BookingStatus::Booked,
                    start_at,
                    end_at: start_at + chrono::Duration::hours(1),
                    meeting_url: None,
                }],
            })
        });

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        bookings_query: Arc::new(query),
        ..HttpState::default()
    });
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(state)
            .service(login)
            .service(booking_summary),
    )
    .await;

    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(LoginRequest {
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    let cookie = login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["creditRemain"], 3);
    assert_eq!(body["creditUsage"], 2);
    assert_eq!(body["bookings"][0]["coachName"], "N/A");
    assert_eq!(body["bookings"][0]["status"], "booked");
}

#[actix_web::test]
async fn renaming_with_a_blank_name_is_rejected_locally() {
    let mut accounts = MockAccounts::new();
    accounts.expect_login().times(1).return_once(|_| Ok(account()));
    accounts.expect_rename().times(0);

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        ..HttpState::default()
    });
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(state)
            .service(login)
            .service(update_profile),
    )
    .await;

    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(LoginRequest {
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    let cookie = login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set");

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/users/profile")
            .cookie(cookie)
            .set_json(UpdateProfileRequestBody {
                name: "   ".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn mismatched_password_confirmation_is_rejected_locally() {
    let mut accounts = MockAccounts::new();
    accounts.expect_login().times(1).return_once(|_| Ok(account()));
    accounts.expect_update_password().times(0);

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        ..HttpState::default()
    });
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(state)
            .service(login)
            .service(update_password),
    )
    .await;

    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(LoginRequest {
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    let cookie = login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set");

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/users/password")
            .cookie(cookie)
            .set_json(UpdatePasswordRequestBody {
                password: "Passw0rd".to_owned(),
                new_password: "Fresh3rPw".to_owned(),
                confirm_new_password: "Fresh3rPx".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn matching_password_update_returns_no_content() {
    let mut accounts = MockAccounts::new();
    accounts.expect_login().times(1).return_once(|_| Ok(account()));
    accounts
        .expect_update_password()
        .times(1)
        .withf(|_, request| {
            request.password == "Passw0rd" && request.new_password == "Fresh3rPw"
        })
        .return_once(|_, _| Ok(()));

    let state = web::Data::new(HttpState {
        accounts: Arc::new(accounts),
        ..HttpState::default()
    });
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(state)
            .service(login)
            .service(update_password),
    )
    .await;

    let login_res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(LoginRequest {
                email: "zoe@example.com".to_owned(),
                password: "Passw0rd".to_owned(),
            })
            .to_request(),
    )
    .await;
    let cookie = login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set");

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/users/password")
            .cookie(cookie)
            .set_json(UpdatePasswordRequestBody {
                password: "Passw0rd".to_owned(),
                new_password: "Fresh3rPw".to_owned(),
                confirm_new_password: "Fresh3rPw".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
