use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::result::Error as DieselError;
use crate::{
    models::user_models::{NewUser, User},
    schema::users,
};
use crate::db::unicode_lower;
use super::like_pattern;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_id(conn: &mut SqliteConnection, user_id: i32) -> Result<Option<User>, DieselError> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_phone_number(conn: &mut SqliteConnection, phone_number: &str) -> Result<Option<User>, DieselError> {
        users::table
            .filter(users::phone_number.eq(phone_number))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn phone_number_taken(conn: &mut SqliteConnection, phone_number: &str) -> Result<bool, DieselError> {
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::phone_number.eq(phone_number)),
        ))
        .get_result(conn)
    }

    /// Users whose name contains `query`, ignoring case. Both sides go through
    /// `unicode_lower`, so non-ASCII letters fold too.
    pub fn search_by_name(conn: &mut SqliteConnection, query: &str) -> Result<Vec<User>, DieselError> {
        users::table
            .filter(unicode_lower(users::name).like(like_pattern(&query.to_lowercase())).escape('\\'))
            .select(User::as_select())
            .load(conn)
    }

    pub fn create(conn: &mut SqliteConnection, new_user: &NewUser) -> Result<User, DieselError> {
        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn delete(conn: &mut SqliteConnection, user_id: i32) -> Result<usize, DieselError> {
        diesel::delete(users::table.find(user_id)).execute(conn)
    }
}
