//! Diesel table definitions for the PostgreSQL schema.
//!
//! Kept in sync with the SQL in `migrations/`. Constraints that the
//! repositories rely on:
//! - `users.email` is unique.
//! - `credit_packages.name` and `skills.name` are unique.
//! - `course_bookings` has a unique index on `(user_id, course_id)`.
//! - `credit_purchases.purchased_credits` carries a `CHECK (>= 0)`.

diesel::table! {
    /// Registered accounts, including coaches and administrators.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        credential -> Varchar,
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable courses with a remaining-seats counter.
    courses (id) {
        id -> Uuid,
        coach_id -> Nullable<Uuid>,
        name -> Varchar,
        description -> Nullable<Text>,
        start_at -> Timestamptz,
        end_at -> Timestamptz,
        meeting_url -> Nullable<Varchar>,
        remaining_capacity -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Purchasable credit bundles.
    credit_packages (id) {
        id -> Uuid,
        name -> Varchar,
        credit_amount -> Int4,
        price -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Purchase events; `purchased_credits` is the balance still usable.
    credit_purchases (id) {
        id -> Uuid,
        user_id -> Uuid,
        credit_package_id -> Uuid,
        purchased_credits -> Int4,
        price_paid -> Int4,
        purchase_at -> Timestamptz,
    }
}

diesel::table! {
    /// Active bookings; cancellation deletes the row.
    course_bookings (id) {
        id -> Uuid,
        user_id -> Uuid,
        course_id -> Uuid,
        status -> Varchar,
        booking_at -> Timestamptz,
    }
}

diesel::table! {
    /// Coaching skills catalogue.
    skills (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> users (coach_id));
diesel::joinable!(credit_purchases -> users (user_id));
diesel::joinable!(credit_purchases -> credit_packages (credit_package_id));
diesel::joinable!(course_bookings -> users (user_id));
diesel::joinable!(course_bookings -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    courses,
    credit_packages,
    credit_purchases,
    course_bookings,
    skills,
);
