//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{course_bookings, courses, credit_packages, credit_purchases, skills, users};
use crate::domain::{
    Course, CourseDraft, CourseId, CourseValidationError, CreditPackage, CreditValidationError,
    Email, Skill, SkillValidationError, User, UserId, UserName, UserValidationError,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub credential: String,
    pub role: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub credential: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub coach_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<String>,
    pub remaining_capacity: i32,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new course records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub coach_id: Option<Uuid>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<&'a str>,
    pub remaining_capacity: i32,
}

/// Changeset struct for replacing the editable fields of a course.
///
/// `None` clears the column; a partial update would silently keep stale
/// coach assignments otherwise.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseUpdate<'a> {
    pub coach_id: Option<Uuid>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: Option<&'a str>,
}

/// Row struct for reading from the credit_packages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = credit_packages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CreditPackageRow {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i32,
    pub price: i32,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new package records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credit_packages)]
pub(crate) struct NewCreditPackageRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub credit_amount: i32,
    pub price: i32,
}

/// Insertable struct for recording a purchase event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credit_purchases)]
pub(crate) struct NewCreditPurchaseRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub credit_package_id: Uuid,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: DateTime<Utc>,
}

/// Insertable struct for creating a booking inside the ledger transaction.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = course_bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: &'a str,
    pub booking_at: DateTime<Utc>,
}

/// Row struct for reading from the skills table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub name: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new skill records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
pub(crate) struct NewSkillRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

// Row-to-domain conversions. Stored rows were validated on the way in, so a
// failure here means the database holds data the domain no longer accepts;
// repositories surface that as a query error rather than panicking.

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            name: UserName::new(&row.name)?,
            email: Email::new(&row.email)?,
            role: row.role.parse()?,
        })
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = CourseValidationError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Course::new(CourseDraft {
            id: CourseId::from_uuid(row.id),
            coach_id: row.coach_id.map(UserId::from_uuid),
            name: row.name,
            description: row.description,
            start_at: row.start_at,
            end_at: row.end_at,
            meeting_url: row.meeting_url,
            remaining_capacity: row.remaining_capacity,
        })
    }
}

impl TryFrom<CreditPackageRow> for CreditPackage {
    type Error = CreditValidationError;

    fn try_from(row: CreditPackageRow) -> Result<Self, Self::Error> {
        CreditPackage::new(row.id, row.name, row.credit_amount, row.price)
    }
}

impl TryFrom<SkillRow> for Skill {
    type Error = SkillValidationError;

    fn try_from(row: SkillRow) -> Result<Self, Self::Error> {
        Skill::new(row.id, row.name)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Duration;
    use rstest::rstest;

    use super::*;
    use crate::domain::Role;

    #[rstest]
    fn user_row_converts_to_domain_user() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Zoe".to_owned(),
            email: "zoe@example.com".to_owned(),
            credential: "hash".to_owned(),
            role: "COACH".to_owned(),
            created_at: Utc::now(),
        };
        let user = User::try_from(row).expect("valid row");
        assert_eq!(user.role, Role::Coach);
        assert_eq!(user.email.as_ref(), "zoe@example.com");
    }

    #[rstest]
    fn unknown_role_fails_conversion() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Zoe".to_owned(),
            email: "zoe@example.com".to_owned(),
            credential: "hash".to_owned(),
            role: "WIZARD".to_owned(),
            created_at: Utc::now(),
        };
        assert_eq!(
            User::try_from(row),
            Err(UserValidationError::UnknownRole("WIZARD".to_owned()))
        );
    }

    #[rstest]
    fn course_row_converts_to_domain_course() {
        let start_at = Utc::now();
        let row = CourseRow {
            id: Uuid::new_v4(),
            coach_id: None,
            name: "Beginner yoga".to_owned(),
            description: Some("Gentle stretching".to_owned()),
            start_at,
            end_at: start_at + Duration::hours(1),
            meeting_url: None,
            remaining_capacity: 8,
            created_at: start_at,
        };
        let course = Course::try_from(row).expect("valid row");
        assert_eq!(course.name(), "Beginner yoga");
        assert!(course.has_open_seats());
    }
}
