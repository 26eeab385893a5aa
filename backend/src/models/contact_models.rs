use diesel::prelude::*;
use crate::schema::contacts;
use super::user_models::User;

/// An address-book entry saved by `user_id`. The number does not have to
/// belong to a registered user.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = contacts)]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Contact {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub phone_number: String,
}

#[derive(Insertable)]
#[diesel(table_name = contacts)]
pub struct NewContact {
    pub user_id: i32,
    pub name: String,
    pub phone_number: String,
}
