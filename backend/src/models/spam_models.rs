use chrono::NaiveDateTime;
use diesel::prelude::*;
use crate::schema::spam_reports;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = spam_reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SpamReport {
    pub id: i32,
    pub reported_by: i32,
    pub phone_number: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = spam_reports)]
pub struct NewSpamReport {
    pub reported_by: i32,
    pub phone_number: String,
    pub created_at: NaiveDateTime,
}
