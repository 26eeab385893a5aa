use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::result::Error as DieselError;
use crate::{
    models::contact_models::{Contact, NewContact},
    schema::contacts,
};
use crate::db::unicode_lower;
use super::like_pattern;

pub struct ContactRepository;

impl ContactRepository {
    pub fn find_by_phone_number(conn: &mut SqliteConnection, phone_number: &str) -> Result<Vec<Contact>, DieselError> {
        contacts::table
            .filter(contacts::phone_number.eq(phone_number))
            .order(contacts::id)
            .select(Contact::as_select())
            .load(conn)
    }

    pub fn search_by_name(conn: &mut SqliteConnection, query: &str) -> Result<Vec<Contact>, DieselError> {
        contacts::table
            .filter(unicode_lower(contacts::name).like(like_pattern(&query.to_lowercase())).escape('\\'))
            .select(Contact::as_select())
            .load(conn)
    }

    /// Whether `owner_id` has `phone_number` saved in their address book.
    pub fn is_saved_by(conn: &mut SqliteConnection, owner_id: i32, phone_number: &str) -> Result<bool, DieselError> {
        diesel::select(diesel::dsl::exists(
            contacts::table
                .filter(contacts::user_id.eq(owner_id))
                .filter(contacts::phone_number.eq(phone_number)),
        ))
        .get_result(conn)
    }

    pub fn for_owner(conn: &mut SqliteConnection, owner_id: i32) -> Result<Vec<Contact>, DieselError> {
        contacts::table
            .filter(contacts::user_id.eq(owner_id))
            .order(contacts::id)
            .select(Contact::as_select())
            .load(conn)
    }

    pub fn create_many(conn: &mut SqliteConnection, new_contacts: &[NewContact]) -> Result<usize, DieselError> {
        diesel::insert_into(contacts::table)
            .values(new_contacts)
            .execute(conn)
    }
}
