use std::collections::HashSet;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::result::Error as DieselError;
use crate::{
    models::spam_models::{NewSpamReport, SpamReport},
    schema::spam_reports,
};

// Stay well below SQLite's bound-parameter limit.
const LOOKUP_CHUNK: usize = 500;

pub struct SpamRepository;

impl SpamRepository {
    pub fn create(conn: &mut SqliteConnection, report: &NewSpamReport) -> Result<SpamReport, DieselError> {
        diesel::insert_into(spam_reports::table)
            .values(report)
            .returning(SpamReport::as_returning())
            .get_result(conn)
    }

    pub fn create_many(conn: &mut SqliteConnection, reports: &[NewSpamReport]) -> Result<usize, DieselError> {
        diesel::insert_into(spam_reports::table)
            .values(reports)
            .execute(conn)
    }

    pub fn count_for(conn: &mut SqliteConnection, phone_number: &str) -> Result<i64, DieselError> {
        spam_reports::table
            .filter(spam_reports::phone_number.eq(phone_number))
            .count()
            .get_result(conn)
    }

    /// The subset of `phone_numbers` with at least one report.
    pub fn reported_numbers(conn: &mut SqliteConnection, phone_numbers: &[&str]) -> Result<HashSet<String>, DieselError> {
        let mut reported = HashSet::new();
        for chunk in phone_numbers.chunks(LOOKUP_CHUNK) {
            let found: Vec<String> = spam_reports::table
                .filter(spam_reports::phone_number.eq_any(chunk.iter().copied()))
                .select(spam_reports::phone_number)
                .distinct()
                .load(conn)?;
            reported.extend(found);
        }
        Ok(reported)
    }

    pub fn by_reporter(conn: &mut SqliteConnection, user_id: i32) -> Result<Vec<SpamReport>, DieselError> {
        spam_reports::table
            .filter(spam_reports::reported_by.eq(user_id))
            .order(spam_reports::id)
            .select(SpamReport::as_select())
            .load(conn)
    }
}
