//! Spam reports and per-number counts.

use chrono::Utc;
use diesel::sqlite::SqliteConnection;

use crate::error::{AppError, AppResult};
use crate::models::spam_models::{NewSpamReport, SpamReport};
use crate::models::user_models::User;
use crate::repositories::SpamRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamCount {
    Reported(i64),
    NoneFound,
}

impl From<i64> for SpamCount {
    fn from(count: i64) -> Self {
        if count > 0 {
            Self::Reported(count)
        } else {
            Self::NoneFound
        }
    }
}

/// Record that `reporter` flagged `phone_number`. Repeat reports are kept and
/// the number does not have to be known.
pub fn report(conn: &mut SqliteConnection, reporter: &User, phone_number: &str) -> AppResult<SpamReport> {
    if phone_number.is_empty() {
        return Err(AppError::BadRequest("Phone number is required.".to_string()));
    }

    let report = SpamRepository::create(
        conn,
        &NewSpamReport {
            reported_by: reporter.id,
            phone_number: phone_number.to_string(),
            created_at: Utc::now().naive_utc(),
        },
    )?;
    Ok(report)
}

pub fn count(conn: &mut SqliteConnection, phone_number: &str) -> AppResult<SpamCount> {
    if phone_number.is_empty() {
        return Err(AppError::BadRequest("Phone number is required.".to_string()));
    }
    Ok(SpamRepository::count_for(conn, phone_number)?.into())
}
